//! Pending upload entity - an image upload that did not complete
//! synchronously and awaits retry at the next app start

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pending_upload")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Destination path in the remote object store; one pending record
    /// per path, later writes replace earlier ones
    #[sea_orm(unique)]
    pub remote_path: String,

    /// Local source file reference
    pub local_uri: String,

    /// Resumable-upload session token handed back by the object store
    pub session_uri: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
