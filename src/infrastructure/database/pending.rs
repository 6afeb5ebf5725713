//! Pending-operation store
//!
//! Thin CRUD wrapper over the two pending-image tables. Records are read
//! back in id order (insertion order); later writes to the same remote
//! path replace the earlier record, so at most one pending operation
//! exists per path.

use super::entities::{pending_delete, pending_upload};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

/// Handle to the pending upload/delete tables
#[derive(Clone)]
pub struct PendingImages {
    conn: DatabaseConnection,
}

impl PendingImages {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Record an interrupted upload for retry at the next app start.
    /// A later upload to the same path supersedes the existing record.
    pub async fn queue_upload(
        &self,
        remote_path: &str,
        local_uri: &str,
        session_uri: &str,
    ) -> Result<(), DbErr> {
        let record = pending_upload::ActiveModel {
            id: NotSet,
            remote_path: Set(remote_path.to_string()),
            local_uri: Set(local_uri.to_string()),
            session_uri: Set(session_uri.to_string()),
        };
        pending_upload::Entity::insert(record)
            .on_conflict(
                OnConflict::column(pending_upload::Column::RemotePath)
                    .update_columns([
                        pending_upload::Column::LocalUri,
                        pending_upload::Column::SessionUri,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    /// Record a failed remote delete for retry at the next app start
    pub async fn queue_delete(&self, remote_path: &str) -> Result<(), DbErr> {
        let record = pending_delete::ActiveModel {
            id: NotSet,
            remote_path: Set(remote_path.to_string()),
        };
        pending_delete::Entity::insert(record)
            .on_conflict(
                OnConflict::column(pending_delete::Column::RemotePath)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    /// All queued uploads, oldest first
    pub async fn uploads(&self) -> Result<Vec<pending_upload::Model>, DbErr> {
        pending_upload::Entity::find()
            .order_by_asc(pending_upload::Column::Id)
            .all(&self.conn)
            .await
    }

    /// All queued deletes, oldest first
    pub async fn deletes(&self) -> Result<Vec<pending_delete::Model>, DbErr> {
        pending_delete::Entity::find()
            .order_by_asc(pending_delete::Column::Id)
            .all(&self.conn)
            .await
    }

    /// Remove an upload record once the object is confirmed present
    pub async fn clear_upload(&self, id: i32) -> Result<(), DbErr> {
        pending_upload::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    /// Remove a delete record once the remote delete is confirmed
    pub async fn clear_delete(&self, id: i32) -> Result<(), DbErr> {
        pending_delete::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
