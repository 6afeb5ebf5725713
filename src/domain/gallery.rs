//! In-memory gallery state for an entry-editing session
//!
//! Never persisted. Tracks the images currently attached to the draft and,
//! disjointly, the images the user removed while editing - the latter set
//! drives delete side effects when the entry is saved.

/// A local image paired with the remote path it will occupy once uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    /// Local source reference (file URI on device)
    pub local_uri: String,

    /// Destination path in the remote object store
    pub remote_path: String,
}

impl GalleryImage {
    pub fn new(local_uri: impl Into<String>, remote_path: impl Into<String>) -> Self {
        Self {
            local_uri: local_uri.into(),
            remote_path: remote_path.into(),
        }
    }
}

/// Gallery state for one editing session
#[derive(Debug, Default)]
pub struct GallerySession {
    images: Vec<GalleryImage>,
    removed: Vec<GalleryImage>,
}

impl GallerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_image(&mut self, image: GalleryImage) {
        self.images.push(image);
    }

    /// Attach a freshly picked local image, deriving the remote path it
    /// will be uploaded to
    pub fn attach_local(&mut self, owner_id: &str, local_uri: &str, image_type: &str) {
        let remote_path = crate::shared::remote_image_path(owner_id, local_uri, image_type);
        self.images.push(GalleryImage::new(local_uri, remote_path));
    }

    /// Re-attach an image fetched from remote storage, recovering its
    /// canonical path from the download URL. Ignores URLs that do not
    /// look like storage downloads.
    pub fn attach_downloaded(&mut self, owner_id: &str, download_url: &str) {
        if let Some(remote_path) =
            crate::shared::extract_remote_image_path(owner_id, download_url)
        {
            self.images.push(GalleryImage::new(download_url, remote_path));
        }
    }

    /// Move an attached image into the removed set
    pub fn remove_image(&mut self, remote_path: &str) {
        if let Some(pos) = self.images.iter().position(|i| i.remote_path == remote_path) {
            let image = self.images.remove(pos);
            self.removed.push(image);
        }
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    /// Remote paths of all currently attached images, in insertion order
    pub fn remote_paths(&self) -> Vec<String> {
        self.images.iter().map(|i| i.remote_path.clone()).collect()
    }

    /// Remote paths queued for deletion on the next save
    pub fn removed_paths(&self) -> Vec<String> {
        self.removed.iter().map(|i| i.remote_path.clone()).collect()
    }

    pub fn clear_removed(&mut self) {
        self.removed.clear();
    }
}
