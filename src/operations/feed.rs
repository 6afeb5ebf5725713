//! Reactive diary feed with cancel-and-replace subscriptions
//!
//! At most one document-store subscription is ever active. Changing the
//! date selection aborts the previous subscription task and awaits its
//! termination before the replacement starts, so two streams can never
//! race to overwrite the published snapshot.

use crate::domain::RequestState;
use crate::infrastructure::remote::{DocumentStore, EntryStream, IdentityProvider};
use crate::shared::{group_by_local_date, local_day_bounds_utc, GroupedEntries};
use chrono::NaiveDate;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

/// Published feed state: entries grouped by local calendar date
pub type DiarySnapshot = RequestState<GroupedEntries>;

struct FeedState {
    selected_date: Option<NaiveDate>,
    active: Option<JoinHandle<()>>,
}

/// Maps the date selection to a single live subscription over the
/// owner's entries
pub struct DiaryFeed {
    documents: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    snapshot: watch::Sender<DiarySnapshot>,
    state: Mutex<FeedState>,
}

impl DiaryFeed {
    pub fn new(documents: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        let (snapshot, _) = watch::channel(RequestState::Idle);
        Self {
            documents,
            identity,
            snapshot,
            state: Mutex::new(FeedState {
                selected_date: None,
                active: None,
            }),
        }
    }

    /// Observe the feed; the receiver always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<DiarySnapshot> {
        self.snapshot.subscribe()
    }

    /// The feed as an async stream of snapshots, starting from the
    /// current one
    pub fn snapshots(&self) -> WatchStream<DiarySnapshot> {
        WatchStream::new(self.snapshot.subscribe())
    }

    /// The currently applied date filter, if any
    pub async fn selected_date(&self) -> Option<NaiveDate> {
        self.state.lock().await.selected_date
    }

    /// Apply (or clear) the date filter and swap the live subscription.
    /// The previous subscription is cancelled and its termination
    /// awaited before the new one is started.
    pub async fn select_date(&self, date: Option<NaiveDate>) {
        let mut state = self.state.lock().await;
        state.selected_date = date;

        if let Some(previous) = state.active.take() {
            previous.abort();
            // JoinError::Cancelled is the expected outcome here
            let _ = previous.await;
            debug!("Cancelled previous diary subscription");
        }

        // Only after the old task is dead: a late emission from it could
        // otherwise overwrite Loading with a stale snapshot
        self.snapshot.send_replace(RequestState::Loading);

        let owner = match self.identity.current_user_id() {
            Some(owner) => owner,
            None => {
                self.snapshot
                    .send_replace(RequestState::Error("User is not logged in".to_string()));
                return;
            }
        };

        let stream = match date {
            Some(day) => {
                let (from, until) = local_day_bounds_utc(day);
                debug!(%day, "Subscribing to date-filtered diary entries");
                self.documents.watch_owner_range(&owner, from, until)
            }
            None => {
                debug!("Subscribing to all diary entries");
                self.documents.watch_owner(&owner)
            }
        };

        state.active = Some(self.collect(stream));
    }

    /// Drive the subscription, publishing each snapshot as it arrives
    fn collect(&self, mut stream: EntryStream) -> JoinHandle<()> {
        let snapshot = self.snapshot.clone();
        tokio::spawn(async move {
            while let Some(item) = stream.next().await {
                let next = match item {
                    Ok(entries) => RequestState::Success(group_by_local_date(entries)),
                    Err(e) => RequestState::Error(e.to_string()),
                };
                snapshot.send_replace(next);
            }
        })
    }
}
