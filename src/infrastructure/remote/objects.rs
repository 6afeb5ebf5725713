//! Remote object store seam
//!
//! Managed blob storage for entry images, addressed by path under
//! `images/{owner}/`.

use async_trait::async_trait;

/// Result of a put: either the object landed, or the store opened a
/// resumable session that must be driven to completion later
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The object now exists at the target path
    Complete,
    /// Upload interrupted; retry with this session token
    InProgress { session_uri: String },
}

/// Client for the remote object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file to the target path. Overwrites any existing
    /// object at that path.
    async fn put_file(&self, remote_path: &str, local_uri: &str)
        -> anyhow::Result<UploadOutcome>;

    /// Continue an interrupted upload using its session token
    async fn resume_upload(
        &self,
        remote_path: &str,
        local_uri: &str,
        session_uri: &str,
    ) -> anyhow::Result<UploadOutcome>;

    /// Delete the object at the path
    async fn delete(&self, remote_path: &str) -> anyhow::Result<()>;

    /// List every object path under the prefix
    async fn list_prefix(&self, prefix: &str) -> anyhow::Result<Vec<String>>;
}
