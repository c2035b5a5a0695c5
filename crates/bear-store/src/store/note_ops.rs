//! Note and tag queries.

use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::error::Result;
use crate::mapper::{RawNoteRow, map_note_row, map_tag_row};
use crate::schema;
use crate::timestamp::cutoff_days_ago;
use crate::types::{Note, Tag};

use super::BearDatabase;

impl BearDatabase {
    /// Search live notes whose title or body contains `query` (ASCII
    /// case-insensitive), newest modification first.
    pub async fn search_notes(&self, query: &str, limit: usize) -> Result<Vec<Note>> {
        let pattern = schema::like_pattern(query);
        let notes = self
            .with_connection(move |conn| {
                let mut stmt = conn.prepare_cached(schema::SEARCH_NOTES)?;
                let rows = stmt.query_map(params![pattern, limit as i64], RawNoteRow::from_row)?;
                collect_notes(rows)
            })
            .await?;

        debug!(query, limit, count = notes.len(), "searched notes");
        Ok(notes)
    }

    /// Get one live note by unique identifier or title.
    ///
    /// An identifier match wins over a title match; among equal titles the most
    /// recently modified note is returned.
    pub async fn get_note(&self, key: &str) -> Result<Option<Note>> {
        let key_owned = key.to_string();
        let note = self
            .with_connection(move |conn| {
                let mut stmt = conn.prepare_cached(schema::GET_NOTE)?;
                let raw = stmt
                    .query_row(params![key_owned], RawNoteRow::from_row)
                    .optional()?;
                Ok(raw.map(map_note_row))
            })
            .await?;

        debug!(key, found = note.is_some(), "looked up note");
        Ok(note)
    }

    /// Live notes carrying the tag titled `tag`, newest first.
    pub async fn get_notes_by_tag(&self, tag: &str, limit: usize) -> Result<Vec<Note>> {
        let tag_owned = tag.to_string();
        let notes = self
            .with_connection(move |conn| {
                let mut stmt = conn.prepare_cached(schema::GET_NOTES_BY_TAG)?;
                let rows =
                    stmt.query_map(params![tag_owned, limit as i64], RawNoteRow::from_row)?;
                collect_notes(rows)
            })
            .await?;

        debug!(tag, limit, count = notes.len(), "listed notes by tag");
        Ok(notes)
    }

    /// Live notes modified within the last `days` days, newest first.
    pub async fn get_recent_notes(&self, days: u32, limit: usize) -> Result<Vec<Note>> {
        let cutoff = cutoff_days_ago(Utc::now(), days);
        let notes = self
            .with_connection(move |conn| {
                let mut stmt = conn.prepare_cached(schema::GET_RECENT_NOTES)?;
                let rows = stmt.query_map(params![cutoff, limit as i64], RawNoteRow::from_row)?;
                collect_notes(rows)
            })
            .await?;

        debug!(days, limit, cutoff, count = notes.len(), "listed recent notes");
        Ok(notes)
    }

    /// All titled tags, alphabetical.
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags = self
            .with_connection(|conn| {
                let mut stmt = conn.prepare_cached(schema::LIST_TAGS)?;
                let rows = stmt.query_map([], map_tag_row)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            })
            .await?;

        debug!(count = tags.len(), "listed tags");
        Ok(tags)
    }

    /// Live notes that link to the note named by `key` (identifier or title).
    ///
    /// Returns an empty list when `key` does not resolve to a note.
    pub async fn get_backlinks(&self, key: &str) -> Result<Vec<Note>> {
        let key_owned = key.to_string();
        let notes = self
            .with_connection(move |conn| {
                let target: Option<i64> = conn
                    .prepare_cached(schema::GET_NOTE_PK)?
                    .query_row(params![key_owned], |row| row.get(0))
                    .optional()?;

                let Some(target) = target else {
                    return Ok(Vec::new());
                };

                let mut stmt = conn.prepare_cached(schema::GET_BACKLINKS)?;
                let rows = stmt.query_map(params![target], RawNoteRow::from_row)?;
                collect_notes(rows)
            })
            .await?;

        debug!(key, count = notes.len(), "resolved backlinks");
        Ok(notes)
    }
}

fn collect_notes<I>(rows: I) -> Result<Vec<Note>>
where
    I: Iterator<Item = rusqlite::Result<RawNoteRow>>,
{
    let mut notes = Vec::new();
    for raw in rows {
        notes.push(map_note_row(raw?));
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::fixtures::{FixtureNote, FixtureStore};

    fn minutes_ago(minutes: i64) -> chrono::DateTime<Utc> {
        Utc::now() - Duration::minutes(minutes)
    }

    #[tokio::test]
    async fn test_search_limit_order_and_trash() {
        let fixture = FixtureStore::new();
        for i in 0..7 {
            fixture.insert_note(
                FixtureNote::new(format!("M{i}"))
                    .title(format!("Meeting {i}"))
                    .modified(minutes_ago(100 - i)),
            );
        }
        fixture.insert_note(
            FixtureNote::new("T1")
                .title("Meeting in trash")
                .modified(minutes_ago(1))
                .trashed(),
        );
        fixture.insert_note(
            FixtureNote::new("D1")
                .title("Deleted meeting")
                .modified(minutes_ago(1))
                .permanently_deleted(),
        );

        let db = BearDatabase::new(fixture.path());
        let notes = db.search_notes("meeting", 5).await.unwrap();

        assert_eq!(notes.len(), 5);
        let ids: Vec<_> = notes.iter().map(|n| n.identifier.as_str()).collect();
        assert_eq!(ids, ["M6", "M5", "M4", "M3", "M2"]);
        assert!(notes.iter().all(|n| !n.is_trashed));
    }

    #[tokio::test]
    async fn test_search_matches_body_case_insensitive() {
        let fixture = FixtureStore::new();
        fixture.insert_note(FixtureNote::new("A").title("Plans").text("Call the DENTIST"));
        fixture.insert_note(FixtureNote::new("B").title("Other").text("nothing here"));

        let db = BearDatabase::new(fixture.path());
        let notes = db.search_notes("dentist", 10).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].identifier, "A");

        assert!(db.search_notes("absent", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let fixture = FixtureStore::new();
        fixture.insert_note(FixtureNote::new("A").title("100% done"));
        fixture.insert_note(FixtureNote::new("B").title("1000 done"));

        let db = BearDatabase::new(fixture.path());
        let notes = db.search_notes("0%", 10).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].identifier, "A");
    }

    #[tokio::test]
    async fn test_get_note_by_identifier_or_title() {
        let fixture = FixtureStore::new();
        fixture.insert_note(FixtureNote::new("ID-1").title("Alpha").text("body"));
        fixture.insert_note(FixtureNote::new("ID-2").title("Beta"));

        let db = BearDatabase::new(fixture.path());
        let by_id = db.get_note("ID-1").await.unwrap().unwrap();
        assert_eq!(by_id.title, "Alpha");
        assert_eq!(by_id.text, "body");

        let by_title = db.get_note("Beta").await.unwrap().unwrap();
        assert_eq!(by_title.identifier, "ID-2");

        assert!(db.get_note("Gamma").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_note_prefers_identifier_match() {
        let fixture = FixtureStore::new();
        // A note titled like another note's identifier, and modified later.
        fixture.insert_note(
            FixtureNote::new("OTHER")
                .title("ID-1")
                .modified(minutes_ago(1)),
        );
        fixture.insert_note(
            FixtureNote::new("ID-1")
                .title("Real")
                .modified(minutes_ago(60)),
        );

        let db = BearDatabase::new(fixture.path());
        let note = db.get_note("ID-1").await.unwrap().unwrap();
        assert_eq!(note.identifier, "ID-1");
        assert_eq!(note.title, "Real");
    }

    #[tokio::test]
    async fn test_get_note_empty_title_reads_untitled() {
        let fixture = FixtureStore::new();
        fixture.insert_note(FixtureNote::new("ID-1").title("").archived());

        let db = BearDatabase::new(fixture.path());
        let note = db.get_note("ID-1").await.unwrap().unwrap();
        assert_eq!(note.title, "Untitled");
        assert!(note.is_archived);
    }

    #[tokio::test]
    async fn test_get_note_skips_trashed() {
        let fixture = FixtureStore::new();
        fixture.insert_note(FixtureNote::new("ID-1").title("Gone").trashed());

        let db = BearDatabase::new(fixture.path());
        assert!(db.get_note("ID-1").await.unwrap().is_none());
        assert!(db.get_note("Gone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_notes_by_tag() {
        let fixture = FixtureStore::new();
        let work = fixture.insert_tag("work", "TAG-W");
        let home = fixture.insert_tag("home", "TAG-H");
        let a = fixture.insert_note(FixtureNote::new("A").modified(minutes_ago(30)));
        let b = fixture.insert_note(FixtureNote::new("B").modified(minutes_ago(10)));
        let c = fixture.insert_note(FixtureNote::new("C"));
        let t = fixture.insert_note(FixtureNote::new("T").trashed());
        fixture.tag_note(a, work);
        fixture.tag_note(b, work);
        fixture.tag_note(c, home);
        fixture.tag_note(t, work);

        let db = BearDatabase::new(fixture.path());
        let notes = db.get_notes_by_tag("work", 50).await.unwrap();
        let ids: Vec<_> = notes.iter().map(|n| n.identifier.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);

        assert_eq!(db.get_notes_by_tag("work", 1).await.unwrap().len(), 1);
        assert!(db.get_notes_by_tag("missing", 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_recent_notes_window() {
        let fixture = FixtureStore::new();
        fixture.insert_note(
            FixtureNote::new("FRESH").modified(Utc::now() - Duration::hours(2)),
        );
        fixture.insert_note(FixtureNote::new("OLD").modified(Utc::now() - Duration::days(3)));

        let db = BearDatabase::new(fixture.path());
        let notes = db.get_recent_notes(1, 50).await.unwrap();
        let ids: Vec<_> = notes.iter().map(|n| n.identifier.as_str()).collect();
        assert_eq!(ids, ["FRESH"]);

        assert_eq!(db.get_recent_notes(7, 50).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_tags_alphabetical_and_titled() {
        let fixture = FixtureStore::new();
        fixture.insert_tag("work", "T1");
        fixture.insert_tag("Archive", "T2");
        fixture.insert_tag("books", "T3");
        fixture.insert_untitled_tag("T4");

        let db = BearDatabase::new(fixture.path());
        let titles: Vec<_> = db
            .list_tags()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["Archive", "books", "work"]);
    }

    #[tokio::test]
    async fn test_backlinks() {
        let fixture = FixtureStore::new();
        let target = fixture.insert_note(FixtureNote::new("TARGET").title("Hub"));
        let a = fixture.insert_note(FixtureNote::new("A").modified(minutes_ago(20)));
        let b = fixture.insert_note(FixtureNote::new("B").modified(minutes_ago(5)));
        let trashed = fixture.insert_note(FixtureNote::new("X").trashed());
        fixture.insert_note(FixtureNote::new("UNLINKED"));
        fixture.link(a, target);
        fixture.link(b, target);
        fixture.link(trashed, target);

        let db = BearDatabase::new(fixture.path());
        let by_id: Vec<_> = db
            .get_backlinks("TARGET")
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.identifier)
            .collect();
        assert_eq!(by_id, ["B", "A"]);

        let by_title = db.get_backlinks("Hub").await.unwrap();
        assert_eq!(by_title.len(), 2);
    }

    #[tokio::test]
    async fn test_backlinks_for_unknown_note_are_empty() {
        let fixture = FixtureStore::new();
        fixture.insert_note(FixtureNote::new("A"));

        let db = BearDatabase::new(fixture.path());
        assert!(db.get_backlinks("nope").await.unwrap().is_empty());
    }
}
