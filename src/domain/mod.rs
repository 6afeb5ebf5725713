//! Core domain types for the diary

pub mod entry;
pub mod gallery;
pub mod request;

pub use entry::{DiaryEntry, EntryDraft, Mood};
pub use gallery::{GalleryImage, GallerySession};
pub use request::RequestState;
