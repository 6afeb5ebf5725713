//! Entry lifecycle: save, delete and bulk delete
//!
//! Document writes are the operation; image uploads and deletes are side
//! effects. A side effect that cannot complete synchronously is recorded
//! in the pending store and replayed by the reconciler at the next app
//! start - it never fails the enclosing operation.

use crate::domain::{DiaryEntry, EntryDraft, GallerySession};
use crate::error::{DiaryError, Result};
use crate::infrastructure::database::PendingImages;
use crate::infrastructure::remote::{
    ConnectivityObserver, DocumentStore, IdentityProvider, NetworkStatus, ObjectStore,
    UploadOutcome,
};
use crate::shared::IMAGES_PREFIX;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Orchestrates create/update/delete of diary entries
pub struct EntryWriter {
    documents: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
    identity: Arc<dyn IdentityProvider>,
    connectivity: Arc<dyn ConnectivityObserver>,
    pending: PendingImages,
}

impl EntryWriter {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        identity: Arc<dyn IdentityProvider>,
        connectivity: Arc<dyn ConnectivityObserver>,
        pending: PendingImages,
    ) -> Self {
        Self {
            documents,
            objects,
            identity,
            connectivity,
            pending,
        }
    }

    fn owner(&self) -> Result<String> {
        self.identity
            .current_user_id()
            .ok_or(DiaryError::NotAuthenticated)
    }

    /// Save the draft: insert when no entry id is selected, update in
    /// place otherwise. On success the attached gallery images are
    /// uploaded, and (update only) the removed images deleted. The
    /// gallery's removed set is consumed once its deletes are issued.
    pub async fn save(
        &self,
        draft: EntryDraft,
        gallery: &mut GallerySession,
    ) -> Result<DiaryEntry> {
        let owner = self.owner()?;

        let saved = match draft.id {
            None => self.insert(&owner, &draft, gallery).await?,
            Some(id) => {
                let entry = self.update(&owner, id, &draft, gallery).await?;
                self.delete_images(gallery.removed_paths()).await;
                gallery.clear_removed();
                entry
            }
        };

        self.upload_images(gallery).await;

        Ok(saved)
    }

    async fn insert(
        &self,
        owner: &str,
        draft: &EntryDraft,
        gallery: &GallerySession,
    ) -> Result<DiaryEntry> {
        let entry = DiaryEntry {
            id: Uuid::nil(), // assigned by the document store
            owner_id: owner.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            mood: draft.mood,
            date: draft.date.unwrap_or_else(Utc::now),
            images: gallery.remote_paths(),
        };
        let inserted = self.documents.insert(entry).await?;
        debug!(id = %inserted.id, "Inserted diary entry");
        Ok(inserted)
    }

    async fn update(
        &self,
        owner: &str,
        id: Uuid,
        draft: &EntryDraft,
        gallery: &GallerySession,
    ) -> Result<DiaryEntry> {
        let existing = self
            .documents
            .get(id, owner)
            .await?
            .ok_or(DiaryError::EntryNotFound)?;

        let updated = DiaryEntry {
            id: existing.id,
            owner_id: existing.owner_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            mood: draft.mood,
            date: draft.date.unwrap_or(existing.date),
            images: gallery.remote_paths(),
        };
        let updated = self
            .documents
            .update(updated)
            .await?
            .ok_or(DiaryError::EntryNotFound)?;
        debug!(id = %updated.id, "Updated diary entry");
        Ok(updated)
    }

    /// Delete the entry, then best-effort delete its images
    pub async fn delete(&self, entry_id: Uuid) -> Result<DiaryEntry> {
        let owner = self.owner()?;

        let deleted = self
            .documents
            .delete_one(entry_id, &owner)
            .await?
            .ok_or(DiaryError::EntryNotFound)?;

        self.delete_images(deleted.images.clone()).await;

        debug!(id = %deleted.id, "Deleted diary entry");
        Ok(deleted)
    }

    /// Delete every entry and every stored image belonging to the
    /// current user. Requires connectivity up front; returns the number
    /// of deleted documents.
    pub async fn delete_all(&self) -> Result<u64> {
        let owner = self.owner()?;

        if self.connectivity.status() != NetworkStatus::Available {
            return Err(DiaryError::NoNetwork);
        }

        let prefix = format!("{IMAGES_PREFIX}/{owner}");
        let paths = self.objects.list_prefix(&prefix).await?;
        self.delete_images(paths).await;

        let removed = self.documents.delete_all_for_owner(&owner).await?;
        debug!(count = removed, "Deleted all diary entries");
        Ok(removed)
    }

    /// Upload each attached gallery image. An interrupted upload leaves
    /// a resumable session behind; that session is queued for the
    /// reconciler. Hard failures are logged and dropped - the next
    /// explicit save of the entry re-attempts them.
    async fn upload_images(&self, gallery: &GallerySession) {
        for image in gallery.images() {
            match self.objects.put_file(&image.remote_path, &image.local_uri).await {
                Ok(UploadOutcome::Complete) => {
                    debug!(path = %image.remote_path, "Uploaded image");
                }
                Ok(UploadOutcome::InProgress { session_uri }) => {
                    if let Err(e) = self
                        .pending
                        .queue_upload(&image.remote_path, &image.local_uri, &session_uri)
                        .await
                    {
                        warn!(path = %image.remote_path, "Failed to queue pending upload: {e}");
                    }
                }
                Err(e) => {
                    warn!(path = %image.remote_path, "Image upload failed: {e}");
                }
            }
        }
    }

    /// Delete each path from the object store, queueing a pending
    /// delete for any that fail
    async fn delete_images(&self, paths: Vec<String>) {
        for path in paths {
            if let Err(e) = self.objects.delete(&path).await {
                warn!(path = %path, "Image delete failed, queueing for retry: {e}");
                if let Err(e) = self.pending.queue_delete(&path).await {
                    warn!(path = %path, "Failed to queue pending delete: {e}");
                }
            }
        }
    }
}
