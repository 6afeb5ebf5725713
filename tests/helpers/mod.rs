//! In-memory doubles for the remote collaborator seams
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diary_core::domain::DiaryEntry;
use diary_core::infrastructure::database::{Database, PendingImages};
use diary_core::infrastructure::remote::{
    ConnectivityObserver, DocumentStore, EntryStream, IdentityProvider, NetworkStatus,
    ObjectStore, UploadOutcome, UserSession,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use uuid::Uuid;

/// Open a migrated pending-images store on a temp file
pub async fn pending_store() -> (PendingImages, tempfile::TempDir) {
    diary_core::config::init_tracing("debug");
    let dir = tempfile::tempdir().unwrap();
    let db = Database::create(&dir.path().join("pending_images.db"))
        .await
        .unwrap();
    db.migrate().await.unwrap();
    (PendingImages::new(db.conn().clone()), dir)
}

// ---------------------------------------------------------------------
// Document store double

struct DocumentsInner {
    entries: Mutex<HashMap<Uuid, DiaryEntry>>,
    revision: watch::Sender<u64>,
    active_streams: AtomicUsize,
    peak_streams: AtomicUsize,
}

impl DocumentsInner {
    fn snapshot(
        &self,
        owner: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Vec<DiaryEntry> {
        let entries = self.entries.lock().unwrap();
        let mut result: Vec<DiaryEntry> = entries
            .values()
            .filter(|e| e.owner_id == owner)
            .filter(|e| match range {
                Some((from, until)) => from <= e.date && e.date < until,
                None => true,
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));
        result
    }

    fn bump(&self) {
        self.revision.send_modify(|v| *v += 1);
    }
}

/// Tracks one live snapshot stream for the subscription-count assertions
struct StreamGuard {
    inner: Arc<DocumentsInner>,
}

impl StreamGuard {
    fn new(inner: Arc<DocumentsInner>) -> Self {
        let active = inner.active_streams.fetch_add(1, Ordering::SeqCst) + 1;
        inner.peak_streams.fetch_max(active, Ordering::SeqCst);
        Self { inner }
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.inner.active_streams.fetch_sub(1, Ordering::SeqCst);
    }
}

/// In-memory document store emitting full replacement snapshots
#[derive(Clone)]
pub struct MemoryDocumentStore {
    inner: Arc<DocumentsInner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(DocumentsInner {
                entries: Mutex::new(HashMap::new()),
                revision,
                active_streams: AtomicUsize::new(0),
                peak_streams: AtomicUsize::new(0),
            }),
        }
    }

    pub fn active_streams(&self) -> usize {
        self.inner.active_streams.load(Ordering::SeqCst)
    }

    /// Highest number of concurrently live streams observed so far
    pub fn peak_streams(&self) -> usize {
        self.inner.peak_streams.load(Ordering::SeqCst)
    }

    fn watch(
        &self,
        owner: &str,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> EntryStream {
        let inner = self.inner.clone();
        let owner = owner.to_string();
        let mut rx = inner.revision.subscribe();
        Box::pin(async_stream::stream! {
            let _guard = StreamGuard::new(inner.clone());
            loop {
                yield Ok::<_, anyhow::Error>(inner.snapshot(&owner, range));
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, entry: DiaryEntry) -> anyhow::Result<DiaryEntry> {
        let mut stored = entry;
        stored.id = Uuid::new_v4();
        self.inner
            .entries
            .lock()
            .unwrap()
            .insert(stored.id, stored.clone());
        self.inner.bump();
        Ok(stored)
    }

    async fn get(&self, id: Uuid, owner_id: &str) -> anyhow::Result<Option<DiaryEntry>> {
        Ok(self
            .inner
            .entries
            .lock()
            .unwrap()
            .get(&id)
            .filter(|e| e.owner_id == owner_id)
            .cloned())
    }

    async fn update(&self, entry: DiaryEntry) -> anyhow::Result<Option<DiaryEntry>> {
        let mut entries = self.inner.entries.lock().unwrap();
        if !entries.contains_key(&entry.id) {
            return Ok(None);
        }
        entries.insert(entry.id, entry.clone());
        drop(entries);
        self.inner.bump();
        Ok(Some(entry))
    }

    async fn delete_one(&self, id: Uuid, owner_id: &str) -> anyhow::Result<Option<DiaryEntry>> {
        let mut entries = self.inner.entries.lock().unwrap();
        let deleted = match entries.get(&id) {
            Some(e) if e.owner_id == owner_id => entries.remove(&id),
            _ => None,
        };
        drop(entries);
        if deleted.is_some() {
            self.inner.bump();
        }
        Ok(deleted)
    }

    async fn delete_all_for_owner(&self, owner_id: &str) -> anyhow::Result<u64> {
        let mut entries = self.inner.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, e| e.owner_id != owner_id);
        let removed = (before - entries.len()) as u64;
        drop(entries);
        if removed > 0 {
            self.inner.bump();
        }
        Ok(removed)
    }

    fn watch_owner(&self, owner_id: &str) -> EntryStream {
        self.watch(owner_id, None)
    }

    fn watch_owner_range(
        &self,
        owner_id: &str,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> EntryStream {
        self.watch(owner_id, Some((from, until)))
    }
}

// ---------------------------------------------------------------------
// Object store double

#[derive(Default)]
struct ObjectsInner {
    objects: Mutex<HashMap<String, String>>,
    stalled_uploads: Mutex<HashSet<String>>,
    failing_deletes: Mutex<HashSet<String>>,
    failing_resumes: Mutex<HashSet<String>>,
    remote_calls: AtomicUsize,
}

/// In-memory object store with scriptable failures
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    inner: Arc<ObjectsInner>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `put_file` for this path report a resumable session instead
    /// of completing
    pub fn stall_upload(&self, path: &str) {
        self.inner
            .stalled_uploads
            .lock()
            .unwrap()
            .insert(path.to_string());
    }

    /// Make `delete` for this path fail
    pub fn fail_delete(&self, path: &str) {
        self.inner
            .failing_deletes
            .lock()
            .unwrap()
            .insert(path.to_string());
    }

    pub fn heal_delete(&self, path: &str) {
        self.inner.failing_deletes.lock().unwrap().remove(path);
    }

    /// Make `resume_upload` for this path fail
    pub fn fail_resume(&self, path: &str) {
        self.inner
            .failing_resumes
            .lock()
            .unwrap()
            .insert(path.to_string());
    }

    pub fn heal_resume(&self, path: &str) {
        self.inner.failing_resumes.lock().unwrap().remove(path);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.inner.objects.lock().unwrap().contains_key(path)
    }

    pub fn object_count(&self) -> usize {
        self.inner.objects.lock().unwrap().len()
    }

    /// Total calls made against the store, for no-network assertions
    pub fn remote_calls(&self) -> usize {
        self.inner.remote_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_file(
        &self,
        remote_path: &str,
        local_uri: &str,
    ) -> anyhow::Result<UploadOutcome> {
        self.inner.remote_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.stalled_uploads.lock().unwrap().contains(remote_path) {
            return Ok(UploadOutcome::InProgress {
                session_uri: format!("session://{remote_path}"),
            });
        }
        self.inner
            .objects
            .lock()
            .unwrap()
            .insert(remote_path.to_string(), local_uri.to_string());
        Ok(UploadOutcome::Complete)
    }

    async fn resume_upload(
        &self,
        remote_path: &str,
        local_uri: &str,
        _session_uri: &str,
    ) -> anyhow::Result<UploadOutcome> {
        self.inner.remote_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing_resumes.lock().unwrap().contains(remote_path) {
            anyhow::bail!("resume failed for {remote_path}");
        }
        self.inner
            .objects
            .lock()
            .unwrap()
            .insert(remote_path.to_string(), local_uri.to_string());
        Ok(UploadOutcome::Complete)
    }

    async fn delete(&self, remote_path: &str) -> anyhow::Result<()> {
        self.inner.remote_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing_deletes.lock().unwrap().contains(remote_path) {
            anyhow::bail!("delete failed for {remote_path}");
        }
        self.inner.objects.lock().unwrap().remove(remote_path);
        Ok(())
    }

    async fn list_prefix(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        self.inner.remote_calls.fetch_add(1, Ordering::SeqCst);
        let mut paths: Vec<String> = self
            .inner
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        paths.sort();
        Ok(paths)
    }
}

// ---------------------------------------------------------------------
// Identity and connectivity doubles

/// Identity provider with a settable current user
#[derive(Clone, Default)]
pub struct FakeIdentity {
    user: Arc<Mutex<Option<String>>>,
}

impl FakeIdentity {
    pub fn logged_in(user_id: &str) -> Self {
        Self {
            user: Arc::new(Mutex::new(Some(user_id.to_string()))),
        }
    }

    pub fn logged_out() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn log_in_with_token(&self, id_token: &str) -> anyhow::Result<UserSession> {
        let user_id = format!("user-{id_token}");
        *self.user.lock().unwrap() = Some(user_id.clone());
        Ok(UserSession { user_id })
    }

    async fn log_out(&self) -> anyhow::Result<()> {
        *self.user.lock().unwrap() = None;
        Ok(())
    }

    fn current_user_id(&self) -> Option<String> {
        self.user.lock().unwrap().clone()
    }
}

/// Connectivity observer with a scriptable status
#[derive(Clone)]
pub struct FakeConnectivity {
    tx: Arc<watch::Sender<NetworkStatus>>,
}

impl FakeConnectivity {
    pub fn with_status(status: NetworkStatus) -> Self {
        let (tx, _) = watch::channel(status);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, status: NetworkStatus) {
        self.tx.send_replace(status);
    }
}

impl ConnectivityObserver for FakeConnectivity {
    fn observe(&self) -> watch::Receiver<NetworkStatus> {
        self.tx.subscribe()
    }
}
