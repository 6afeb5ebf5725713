//! Pending delete entity - a remote image delete that failed and awaits
//! retry at the next app start

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pending_delete")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Path in the remote object store to delete
    #[sea_orm(unique)]
    pub remote_path: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
