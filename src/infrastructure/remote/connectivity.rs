//! Network connectivity observer seam

use tokio::sync::watch;

/// Network reachability as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Available,
    Unavailable,
    Losing,
    Lost,
}

/// Continuous stream of connectivity changes. The last known value is
/// consulted synchronously before bulk operations.
pub trait ConnectivityObserver: Send + Sync {
    /// Subscribe to status changes; the receiver always holds the last
    /// known value
    fn observe(&self) -> watch::Receiver<NetworkStatus>;

    /// Last known status
    fn status(&self) -> NetworkStatus {
        *self.observe().borrow()
    }
}
