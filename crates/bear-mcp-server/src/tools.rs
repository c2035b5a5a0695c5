//! Tool catalogue: names, input schemas, argument types and result views.

use bear_domain::{AppendToNote, CreateNote, DEFAULT_APPEND_SEPARATOR, DeleteTag, NoteAction, UpdateNote};
use bear_store::Note;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::protocol::ToolInfo;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const DEFAULT_RECENT_DAYS: u32 = 7;

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    CreateNote,
    SearchNotes,
    GetNote,
    OpenNote,
    ListTags,
    UpdateNote,
    AppendToNote,
    GetNotesByTag,
    TrashNote,
    ArchiveNote,
    DeleteTag,
    GetRecentNotes,
    GetNoteBacklinks,
}

impl Tool {
    pub const ALL: [Tool; 13] = [
        Tool::CreateNote,
        Tool::SearchNotes,
        Tool::GetNote,
        Tool::OpenNote,
        Tool::ListTags,
        Tool::UpdateNote,
        Tool::AppendToNote,
        Tool::GetNotesByTag,
        Tool::TrashNote,
        Tool::ArchiveNote,
        Tool::DeleteTag,
        Tool::GetRecentNotes,
        Tool::GetNoteBacklinks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateNote => "create_note",
            Self::SearchNotes => "search_notes",
            Self::GetNote => "get_note",
            Self::OpenNote => "open_note",
            Self::ListTags => "list_tags",
            Self::UpdateNote => "update_note",
            Self::AppendToNote => "append_to_note",
            Self::GetNotesByTag => "get_notes_by_tag",
            Self::TrashNote => "trash_note",
            Self::ArchiveNote => "archive_note",
            Self::DeleteTag => "delete_tag",
            Self::GetRecentNotes => "get_recent_notes",
            Self::GetNoteBacklinks => "get_note_backlinks",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CreateNote => "Create a new note in Bear",
            Self::SearchNotes => "Search for notes in Bear and return results with content",
            Self::GetNote => "Get a specific note by title or ID",
            Self::OpenNote => "Open a note in the Bear app",
            Self::ListTags => "List all tags in Bear",
            Self::UpdateNote => "Replace the content of an existing note",
            Self::AppendToNote => "Append content to the end of an existing note",
            Self::GetNotesByTag => "Get all notes with a specific tag",
            Self::TrashNote => "Move a note to the trash",
            Self::ArchiveNote => "Archive a note",
            Self::DeleteTag => "Delete a tag from all notes",
            Self::GetRecentNotes => "Get notes modified in the last N days",
            Self::GetNoteBacklinks => "Get notes that link to a specific note",
        }
    }

    pub fn input_schema(&self) -> Value {
        let identifier = |description: &str| {
            json!({"type": "string", "minLength": 1, "description": description})
        };
        let limit = |default: usize| {
            json!({
                "type": "integer", "minimum": 1, "maximum": 100, "default": default,
                "description": "Maximum number of results to return"
            })
        };
        let tags = json!({
            "type": "array", "items": {"type": "string"},
            "description": "Tags to add to the note"
        });
        let show_window = json!({
            "type": "boolean", "default": false,
            "description": "Whether to show Bear window after operation"
        });

        let (properties, required): (Value, Vec<&str>) = match self {
            Self::CreateNote => (
                json!({
                    "title": {"type": "string", "minLength": 1, "description": "Title of the note"},
                    "content": {"type": "string", "description": "Content of the note (supports Markdown)"},
                    "tags": tags,
                }),
                vec!["title", "content"],
            ),
            Self::SearchNotes => (
                json!({
                    "query": {"type": "string", "minLength": 1, "description": "Search query"},
                    "limit": limit(DEFAULT_SEARCH_LIMIT),
                }),
                vec!["query"],
            ),
            Self::GetNote | Self::OpenNote => (
                json!({"identifier": identifier("Note title or unique identifier")}),
                vec!["identifier"],
            ),
            Self::ListTags => (json!({}), vec![]),
            Self::UpdateNote => (
                json!({
                    "identifier": identifier("Note title or unique identifier to update"),
                    "title": {"type": "string", "description": "New title for the note (optional)"},
                    "content": {"type": "string", "description": "New content for the note (replaces existing content)"},
                    "tags": tags,
                }),
                vec!["identifier", "content"],
            ),
            Self::AppendToNote => (
                json!({
                    "identifier": identifier("Note title or unique identifier to append to"),
                    "content": {"type": "string", "minLength": 1, "description": "Content to append to the note"},
                    "separator": {
                        "type": "string", "default": DEFAULT_APPEND_SEPARATOR,
                        "description": "Separator to use before appended content"
                    },
                }),
                vec!["identifier", "content"],
            ),
            Self::GetNotesByTag => (
                json!({
                    "tag": {"type": "string", "minLength": 1, "description": "The tag name to search for (without # prefix)"},
                    "limit": limit(DEFAULT_LIST_LIMIT),
                }),
                vec!["tag"],
            ),
            Self::TrashNote => (
                json!({
                    "identifier": identifier("Note title or unique identifier to trash"),
                    "show_window": show_window,
                }),
                vec!["identifier"],
            ),
            Self::ArchiveNote => (
                json!({
                    "identifier": identifier("Note title or unique identifier to archive"),
                    "show_window": show_window,
                }),
                vec!["identifier"],
            ),
            Self::DeleteTag => (
                json!({
                    "name": {"type": "string", "minLength": 1, "description": "The tag name to delete (without # prefix)"},
                    "show_window": show_window,
                }),
                vec!["name"],
            ),
            Self::GetRecentNotes => (
                json!({
                    "days": {
                        "type": "integer", "minimum": 1, "maximum": 365,
                        "default": DEFAULT_RECENT_DAYS, "description": "Number of days to look back"
                    },
                    "limit": limit(DEFAULT_LIST_LIMIT),
                }),
                vec![],
            ),
            Self::GetNoteBacklinks => (
                json!({"identifier": identifier("Note title or unique identifier to find backlinks for")}),
                vec!["identifier"],
            ),
        };

        json!({"type": "object", "properties": properties, "required": required})
    }

    pub fn info(&self) -> ToolInfo {
        ToolInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Definitions for `tools/list`.
pub fn definitions() -> Vec<ToolInfo> {
    Tool::ALL.iter().map(Tool::info).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Arguments
// ─────────────────────────────────────────────────────────────────────────────

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

fn default_recent_days() -> u32 {
    DEFAULT_RECENT_DAYS
}

fn default_separator() -> String {
    DEFAULT_APPEND_SEPARATOR.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateNoteArgs {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<CreateNoteArgs> for CreateNote {
    fn from(args: CreateNoteArgs) -> Self {
        Self {
            title: args.title,
            content: args.content,
            tags: args.tags,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

/// Arguments naming a single note.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentifierArgs {
    pub identifier: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateNoteArgs {
    pub identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<UpdateNoteArgs> for UpdateNote {
    fn from(args: UpdateNoteArgs) -> Self {
        Self {
            identifier: args.identifier,
            title: args.title,
            content: args.content,
            tags: args.tags,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppendArgs {
    pub identifier: String,
    pub content: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl From<AppendArgs> for AppendToNote {
    fn from(args: AppendArgs) -> Self {
        Self {
            identifier: args.identifier,
            content: args.content,
            separator: Some(args.separator),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagArgs {
    pub tag: String,
    #[serde(default = "default_list_limit")]
    pub limit: usize,
}

/// Trash / archive arguments.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteActionArgs {
    pub identifier: String,
    #[serde(default)]
    pub show_window: bool,
}

impl From<NoteActionArgs> for NoteAction {
    fn from(args: NoteActionArgs) -> Self {
        Self {
            identifier: args.identifier,
            show_window: args.show_window,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteTagArgs {
    pub name: String,
    #[serde(default)]
    pub show_window: bool,
}

impl From<DeleteTagArgs> for DeleteTag {
    fn from(args: DeleteTagArgs) -> Self {
        Self {
            name: args.name,
            show_window: args.show_window,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecentArgs {
    #[serde(default = "default_recent_days")]
    pub days: u32,
    #[serde(default = "default_list_limit")]
    pub limit: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Result views
// ─────────────────────────────────────────────────────────────────────────────

/// A note as returned to MCP clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    pub is_pinned: bool,
    pub is_archived: bool,
}

impl<'a> From<&'a Note> for NoteView<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            id: &note.identifier,
            title: &note.title,
            content: &note.text,
            created_at: note.created_at.map(rfc3339),
            modified_at: note.modified_at.map(rfc3339),
            is_pinned: note.is_pinned,
            is_archived: note.is_archived,
        }
    }
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `{count, notes}` plus one context field.
pub fn note_list(notes: &[Note], context_key: &str, context: Value) -> Value {
    let views: Vec<NoteView<'_>> = notes.iter().map(NoteView::from).collect();
    let mut value = json!({"count": notes.len(), "notes": views});
    value[context_key] = context;
    value
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_thirteen_unique_tools() {
        let defs = definitions();
        assert_eq!(defs.len(), 13);
        let mut names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
            assert_eq!(tool.input_schema()["type"], "object");
        }
        assert_eq!(Tool::from_name("nope"), None);
    }

    #[test]
    fn test_argument_defaults() {
        let search: SearchArgs = serde_json::from_value(json!({"query": "x"})).unwrap();
        assert_eq!(search.limit, 10);

        let recent: RecentArgs = serde_json::from_value(json!({})).unwrap();
        assert_eq!((recent.days, recent.limit), (7, 50));

        let tag: TagArgs = serde_json::from_value(json!({"tag": "work"})).unwrap();
        assert_eq!(tag.limit, 50);

        let append: AppendArgs =
            serde_json::from_value(json!({"identifier": "a", "content": "b"})).unwrap();
        assert_eq!(append.separator, "\n\n");

        let trash: NoteActionArgs = serde_json::from_value(json!({"identifier": "a"})).unwrap();
        assert!(!trash.show_window);
    }

    #[test]
    fn test_unknown_or_mistyped_arguments_rejected() {
        assert!(serde_json::from_value::<SearchArgs>(json!({"query": "x", "limit": "ten"})).is_err());
        assert!(serde_json::from_value::<IdentifierArgs>(json!({"id": "x"})).is_err());
        assert!(serde_json::from_value::<RecentArgs>(json!({"days": -1})).is_err());
    }

    #[test]
    fn test_note_view_format() {
        let note = Note {
            pk: 1,
            identifier: "ID-1".into(),
            title: "Groceries".into(),
            text: "milk".into(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            modified_at: None,
            is_trashed: false,
            is_archived: true,
            is_pinned: false,
        };
        let value = serde_json::to_value(NoteView::from(&note)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "ID-1",
                "title": "Groceries",
                "content": "milk",
                "createdAt": "2024-01-02T03:04:05.000Z",
                "modifiedAt": null,
                "isPinned": false,
                "isArchived": true
            })
        );

        let list = note_list(std::slice::from_ref(&note), "query", json!("groc"));
        assert_eq!(list["count"], 1);
        assert_eq!(list["query"], "groc");
        assert_eq!(list["notes"][0]["id"], "ID-1");
    }
}
