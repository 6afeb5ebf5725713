//! Diary-specific error types

use thiserror::Error;

/// Diary operation errors
#[derive(Error, Debug)]
pub enum DiaryError {
    /// No user is logged in
    #[error("User is not logged in")]
    NotAuthenticated,

    /// The targeted entry does not exist (or belongs to another owner)
    #[error("Diary entry was not found")]
    EntryNotFound,

    /// Bulk operations require connectivity up front
    #[error("No internet connection was found")]
    NoNetwork,

    /// Error surfaced by the remote document or object store,
    /// message forwarded verbatim
    #[error("{0}")]
    RemoteStore(String),

    /// Local database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for DiaryError {
    fn from(err: anyhow::Error) -> Self {
        DiaryError::RemoteStore(err.to_string())
    }
}

/// Result type for diary operations
pub type Result<T> = std::result::Result<T, DiaryError>;
