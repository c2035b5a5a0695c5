//! Mapping raw store rows to [`Note`] and [`Tag`] values.

use rusqlite::Row;

use crate::timestamp::to_standard;
use crate::types::{Note, Tag, UNTITLED};

/// A note row as it comes out of `ZSFNOTE`, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNoteRow {
    pub pk: i64,
    pub title: Option<String>,
    pub text: Option<String>,
    pub identifier: Option<String>,
    pub creation_date: Option<f64>,
    pub modification_date: Option<f64>,
    pub trashed: Option<i64>,
    pub archived: Option<i64>,
    pub pinned: Option<i64>,
}

impl RawNoteRow {
    /// Read the columns selected by the note queries.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            pk: row.get(0)?,
            title: row.get(1)?,
            text: row.get(2)?,
            identifier: row.get(3)?,
            creation_date: row.get(4)?,
            modification_date: row.get(5)?,
            trashed: row.get(6)?,
            archived: row.get(7)?,
            pinned: row.get(8)?,
        })
    }
}

/// Normalize a raw note row.
pub fn map_note_row(raw: RawNoteRow) -> Note {
    Note {
        pk: raw.pk,
        identifier: raw.identifier.unwrap_or_default(),
        title: raw
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string()),
        text: raw.text.unwrap_or_default(),
        created_at: to_standard(raw.creation_date),
        modified_at: to_standard(raw.modification_date),
        is_trashed: flag(raw.trashed),
        is_archived: flag(raw.archived),
        is_pinned: flag(raw.pinned),
    }
}

/// Read a tag row (`ZTITLE`, `ZUNIQUEIDENTIFIER`).
pub fn map_tag_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    let title: String = row.get(0)?;
    let identifier: Option<String> = row.get(1)?;
    Ok(Tag {
        title,
        identifier: identifier.unwrap_or_default(),
    })
}

fn flag(value: Option<i64>) -> bool {
    value.is_some_and(|v| v != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_and_text_defaults() {
        let note = map_note_row(RawNoteRow {
            pk: 1,
            identifier: Some("ABC".to_string()),
            ..Default::default()
        });
        assert_eq!(note.title, "Untitled");
        assert_eq!(note.text, "");
        assert_eq!(note.identifier, "ABC");
        assert!(note.created_at.is_none());
        assert!(note.modified_at.is_none());
    }

    #[test]
    fn test_empty_title_is_untitled() {
        let note = map_note_row(RawNoteRow {
            title: Some(String::new()),
            text: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(note.title, "Untitled");
        assert_eq!(note.text, "");
    }

    #[test]
    fn test_flags_from_nonzero_integers() {
        let note = map_note_row(RawNoteRow {
            trashed: Some(0),
            archived: Some(1),
            pinned: Some(2),
            ..Default::default()
        });
        assert!(!note.is_trashed);
        assert!(note.is_archived);
        assert!(note.is_pinned);
    }

    #[test]
    fn test_present_values_pass_through() {
        let note = map_note_row(RawNoteRow {
            pk: 42,
            title: Some("Groceries".to_string()),
            text: Some("# Groceries\n- milk".to_string()),
            identifier: Some("ID-1".to_string()),
            creation_date: Some(0.0),
            modification_date: Some(60.5),
            ..Default::default()
        });
        assert_eq!(note.pk, 42);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.text, "# Groceries\n- milk");
        let modified = note.modified_at.unwrap();
        assert_eq!(modified.timestamp(), 978_307_260);
        assert_eq!(modified.timestamp_subsec_millis(), 500);
    }
}
