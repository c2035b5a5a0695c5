//! Request and result types of the facade operations.

use serde::{Deserialize, Serialize};

/// Separator placed before appended content unless the caller picks one.
pub const DEFAULT_APPEND_SEPARATOR: &str = "\n\n";

/// Uniform result shape handed to the protocol shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> OperationResult<T> {
    /// Successful result carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed result with a message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Payload of a successful write-path operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReceipt {
    /// Verb that was dispatched.
    pub verb: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// Create a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Replace the whole content of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNote {
    /// Title or identifier of the note to update.
    pub identifier: String,
    /// New title; the identifier is sent when absent or blank.
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Append content to a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendToNote {
    pub identifier: String,
    pub content: String,
    /// Text inserted before `content`; [`DEFAULT_APPEND_SEPARATOR`] when absent.
    #[serde(default)]
    pub separator: Option<String>,
}

/// Trash or archive a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAction {
    pub identifier: String,
    #[serde(default)]
    pub show_window: bool,
}

/// Delete a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTag {
    pub name: String,
    #[serde(default)]
    pub show_window: bool,
}
