//! Startup reconciliation of pending image operations
//!
//! Runs once per process lifetime, off the interactive path. Replays
//! every queued upload and delete against the object store and removes
//! each record only on confirmed success. At-least-once, best effort:
//! no backoff, no retry cap - a record that keeps failing stays queued
//! for the next process start.

use crate::infrastructure::database::PendingImages;
use crate::infrastructure::remote::{ObjectStore, UploadOutcome};
use sea_orm::DbErr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Outcome of one reconciliation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    pub uploads_flushed: usize,
    pub uploads_remaining: usize,
    pub deletes_flushed: usize,
    pub deletes_remaining: usize,
}

/// Replays pending image operations recorded by earlier sessions
pub struct Reconciler {
    pending: PendingImages,
    objects: Arc<dyn ObjectStore>,
}

impl Reconciler {
    pub fn new(pending: PendingImages, objects: Arc<dyn ObjectStore>) -> Self {
        Self { pending, objects }
    }

    /// Fire-and-forget: the app becomes interactive without waiting on
    /// the pass
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            match self.run_once().await {
                Ok(report) => info!(
                    uploads_flushed = report.uploads_flushed,
                    uploads_remaining = report.uploads_remaining,
                    deletes_flushed = report.deletes_flushed,
                    deletes_remaining = report.deletes_remaining,
                    "Pending image reconciliation finished"
                ),
                Err(e) => warn!("Pending image reconciliation aborted: {e}"),
            }
        })
    }

    /// One linear pass over both tables. Records are independent and
    /// idempotent at their target path, so order between them does not
    /// matter; stored order is kept for determinism.
    pub async fn run_once(&self) -> Result<ReconcileReport, DbErr> {
        let mut report = ReconcileReport::default();

        for record in self.pending.uploads().await? {
            match self
                .objects
                .resume_upload(&record.remote_path, &record.local_uri, &record.session_uri)
                .await
            {
                Ok(UploadOutcome::Complete) => {
                    self.pending.clear_upload(record.id).await?;
                    report.uploads_flushed += 1;
                    debug!(path = %record.remote_path, "Flushed pending upload");
                }
                Ok(UploadOutcome::InProgress { .. }) => {
                    report.uploads_remaining += 1;
                    debug!(path = %record.remote_path, "Upload still in progress, keeping record");
                }
                Err(e) => {
                    report.uploads_remaining += 1;
                    warn!(path = %record.remote_path, "Pending upload retry failed: {e}");
                }
            }
        }

        for record in self.pending.deletes().await? {
            match self.objects.delete(&record.remote_path).await {
                Ok(()) => {
                    self.pending.clear_delete(record.id).await?;
                    report.deletes_flushed += 1;
                    debug!(path = %record.remote_path, "Flushed pending delete");
                }
                Err(e) => {
                    report.deletes_remaining += 1;
                    warn!(path = %record.remote_path, "Pending delete retry failed: {e}");
                }
            }
        }

        Ok(report)
    }
}
