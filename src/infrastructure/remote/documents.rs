//! Remote document store seam
//!
//! The managed sync database holding diary entries. Every operation is
//! scoped to an owner id; the scoping predicate is the only ownership
//! enforcement in the system.

use crate::domain::DiaryEntry;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use uuid::Uuid;

/// Reactive snapshot stream: each item is a full replacement of the
/// query result, not a delta
pub type EntryStream = BoxStream<'static, anyhow::Result<Vec<DiaryEntry>>>;

/// Client for the remote document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new entry. The store assigns the id; any id on the
    /// passed entry is ignored. Returns the stored entry.
    async fn insert(&self, entry: DiaryEntry) -> anyhow::Result<DiaryEntry>;

    /// Fetch one entry by id, scoped to its owner
    async fn get(&self, id: Uuid, owner_id: &str) -> anyhow::Result<Option<DiaryEntry>>;

    /// Field-level update of an existing entry. Returns `None` when the
    /// target row no longer exists.
    async fn update(&self, entry: DiaryEntry) -> anyhow::Result<Option<DiaryEntry>>;

    /// Delete one entry by id, scoped to its owner. Returns the deleted
    /// entry, or `None` when it was not found.
    async fn delete_one(&self, id: Uuid, owner_id: &str) -> anyhow::Result<Option<DiaryEntry>>;

    /// Delete every entry belonging to the owner, returning the count
    async fn delete_all_for_owner(&self, owner_id: &str) -> anyhow::Result<u64>;

    /// Subscribe to all of the owner's entries, sorted date descending
    fn watch_owner(&self, owner_id: &str) -> EntryStream;

    /// Subscribe to the owner's entries with `from <= date < until`,
    /// sorted date descending
    fn watch_owner_range(
        &self,
        owner_id: &str,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> EntryStream;
}
