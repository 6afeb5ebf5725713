//! User-facing flows: entry lifecycle and the reactive diary feed

pub mod feed;
pub mod write;

pub use feed::{DiaryFeed, DiarySnapshot};
pub use write::EntryWriter;
