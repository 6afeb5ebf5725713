//! Diary entry - a single dated journal record owned by one user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A diary entry as stored in the remote document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Unique identifier, assigned by the document store on insert
    pub id: Uuid,

    /// Owner's user id; every query is scoped to this
    pub owner_id: String,

    pub title: String,

    pub description: String,

    pub mood: Mood,

    /// Creation or last-edit instant
    pub date: DateTime<Utc>,

    /// Remote image paths, insertion order = upload order
    pub images: Vec<String>,
}

/// User input for a save operation, before the document store has
/// assigned an id. `id` is `Some` when editing an existing entry.
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub mood: Mood,
    /// Explicit timestamp chosen by the user; `None` keeps the existing
    /// date on update, or stamps "now" on insert.
    pub date: Option<DateTime<Utc>>,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, mood: Mood) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            mood,
            date: None,
        }
    }

    /// Target an existing entry for update
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

/// Closed set of mood tags selectable for an entry
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Mood {
    Angry,
    Confounded,
    Cool,
    Crying,
    Dead,
    Disappointed,
    Discouraged,
    Disgusted,
    VeryDisgusted,
    Funny,
    Happy,
    VeryHappy,
    LovingIt,
    #[default]
    Neutral,
    Stressed,
    Surprised,
    Suspicious,
    TiredBored,
}
