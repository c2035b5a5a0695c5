//! Normalized note and tag projections of store rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when a note row has no title.
pub const UNTITLED: &str = "Untitled";

/// A note read from the store.
///
/// Built fresh for every query; nothing here is cached or written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Internal row key (`Z_PK`). Only meaningful inside one store file.
    #[serde(skip)]
    pub pk: i64,
    /// Stable unique identifier.
    pub identifier: String,
    /// Title, `"Untitled"` when the store has none. Not unique.
    pub title: String,
    /// Markdown body, empty when the store has none.
    pub text: String,
    /// When the note was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the note was last modified.
    pub modified_at: Option<DateTime<Utc>>,
    pub is_trashed: bool,
    pub is_archived: bool,
    pub is_pinned: bool,
}

/// A tag read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag title; this is what write-path commands address.
    pub title: String,
    /// Unique identifier of the tag row.
    pub identifier: String,
}

/// Outcome of checking whether the store file is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreStatus {
    /// The store file is present.
    pub fn present() -> Self {
        Self {
            exists: true,
            error: None,
        }
    }

    /// The store file is missing, with a human-readable reason.
    pub fn missing(error: impl Into<String>) -> Self {
        Self {
            exists: false,
            error: Some(error.into()),
        }
    }
}
