//! Trait seams for the managed remote collaborators
//!
//! The document store, object store, identity provider and connectivity
//! observer are external SDKs in production; everything in this crate
//! talks to them through these traits so tests can substitute in-memory
//! doubles.

pub mod connectivity;
pub mod documents;
pub mod identity;
pub mod objects;

pub use connectivity::{ConnectivityObserver, NetworkStatus};
pub use documents::{DocumentStore, EntryStream};
pub use identity::{IdentityProvider, UserSession};
pub use objects::{ObjectStore, UploadOutcome};
