//! Diary Core
//!
//! Backend core for a personal diary app: authenticated users write
//! dated entries with a mood tag and photos, entries sync through a
//! managed document store and images through a managed object store.
//! Image uploads and deletes that fail in-session are queued in a local
//! sqlite table and replayed at the next process start.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod operations;
pub mod services;
pub mod shared;

use crate::config::AppConfig;
use crate::error::Result;
use crate::infrastructure::database::{Database, PendingImages};
use crate::infrastructure::remote::{
    ConnectivityObserver, DocumentStore, IdentityProvider, ObjectStore,
};
use crate::operations::{DiaryFeed, EntryWriter};
use crate::services::Reconciler;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Remote collaborators injected per authenticated session. The
/// document-store client is session-scoped, not a process singleton;
/// callers rebuild a `DiaryCore` on login/logout transitions.
pub struct RemoteClients {
    pub documents: Arc<dyn DocumentStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub connectivity: Arc<dyn ConnectivityObserver>,
}

/// The main context for all diary operations
pub struct DiaryCore {
    /// Application configuration
    config: AppConfig,

    /// Local pending-images database
    db: Database,

    /// Pending-operation store handle
    pending: PendingImages,

    /// Entry lifecycle controller
    writer: EntryWriter,

    /// Reactive diary feed
    feed: Arc<DiaryFeed>,
}

impl DiaryCore {
    /// Initialize the core: load config, open and migrate the local
    /// database, wire the controllers and kick off the startup
    /// reconciliation pass in the background.
    pub async fn new(data_dir: PathBuf, clients: RemoteClients) -> Result<Self> {
        info!("Initializing diary core at {:?}", data_dir);

        let config = AppConfig::load_or_create(&data_dir)?;
        config.ensure_directories()?;

        let db = Database::create(&config.pending_db_path()).await?;
        db.migrate().await?;
        let pending = PendingImages::new(db.conn().clone());

        let writer = EntryWriter::new(
            clients.documents.clone(),
            clients.objects.clone(),
            clients.identity.clone(),
            clients.connectivity.clone(),
            pending.clone(),
        );
        let feed = Arc::new(DiaryFeed::new(
            clients.documents.clone(),
            clients.identity.clone(),
        ));

        // Fire-and-forget: the app is interactive before the pass ends
        Arc::new(Reconciler::new(pending.clone(), clients.objects.clone())).spawn();

        Ok(Self {
            config,
            db,
            pending,
            writer,
            feed,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn writer(&self) -> &EntryWriter {
        &self.writer
    }

    pub fn feed(&self) -> &Arc<DiaryFeed> {
        &self.feed
    }

    /// Direct access to the pending-operation store
    pub fn pending(&self) -> &PendingImages {
        &self.pending
    }

    /// The underlying local database
    pub fn database(&self) -> &Database {
        &self.db
    }
}
