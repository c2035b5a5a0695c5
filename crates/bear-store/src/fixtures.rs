//! Temporary Bear-schema databases for tests.
//!
//! Enabled for this crate's own tests and, through the `fixtures` feature, for
//! dependent crates' tests. Panics on setup failure.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use tempfile::TempDir;

use crate::timestamp::to_store_native;

const SCHEMA: &str = r#"
CREATE TABLE ZSFNOTE (
    Z_PK INTEGER PRIMARY KEY,
    ZTITLE VARCHAR,
    ZTEXT VARCHAR,
    ZUNIQUEIDENTIFIER VARCHAR,
    ZCREATIONDATE TIMESTAMP,
    ZMODIFICATIONDATE TIMESTAMP,
    ZTRASHED INTEGER,
    ZARCHIVED INTEGER,
    ZPINNED INTEGER,
    ZPERMANENTLYDELETED INTEGER
);
CREATE TABLE ZSFNOTETAG (
    Z_PK INTEGER PRIMARY KEY,
    ZTITLE VARCHAR,
    ZUNIQUEIDENTIFIER VARCHAR
);
CREATE TABLE Z_5TAGS (
    Z_5NOTES INTEGER,
    Z_13TAGS INTEGER,
    PRIMARY KEY (Z_5NOTES, Z_13TAGS)
);
CREATE TABLE ZSFNOTEBACKLINK (
    Z_PK INTEGER PRIMARY KEY,
    ZLINKEDBY INTEGER,
    ZLINKINGTO INTEGER
);
"#;

/// A note row to insert into a [`FixtureStore`].
#[derive(Debug, Clone)]
pub struct FixtureNote {
    identifier: String,
    title: Option<String>,
    text: Option<String>,
    created: Option<f64>,
    modified: Option<f64>,
    trashed: bool,
    archived: bool,
    pinned: bool,
    deleted: bool,
}

impl FixtureNote {
    /// A live note with the given identifier, modified now, no title or text.
    pub fn new(identifier: impl Into<String>) -> Self {
        let now = to_store_native(Utc::now());
        Self {
            identifier: identifier.into(),
            title: None,
            text: None,
            created: Some(now),
            modified: Some(now),
            trashed: false,
            archived: false,
            pinned: false,
            deleted: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn modified(mut self, at: DateTime<Utc>) -> Self {
        self.modified = Some(to_store_native(at));
        self
    }

    pub fn trashed(mut self) -> Self {
        self.trashed = true;
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn permanently_deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

/// A Bear-schema SQLite file in a temporary directory.
///
/// The file is removed when the fixture is dropped.
pub struct FixtureStore {
    dir: TempDir,
    conn: Connection,
}

impl FixtureStore {
    /// Create an empty store with the Bear tables.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let conn = Connection::open(dir.path().join("database.sqlite")).expect("open fixture db");
        conn.execute_batch(SCHEMA).expect("create Bear schema");
        Self { dir, conn }
    }

    /// Path of the database file.
    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("database.sqlite")
    }

    /// Directory holding the database file.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Insert a note, returning its row key.
    pub fn insert_note(&self, note: FixtureNote) -> i64 {
        self.conn
            .execute(
                "INSERT INTO ZSFNOTE (ZTITLE, ZTEXT, ZUNIQUEIDENTIFIER, ZCREATIONDATE, \
                 ZMODIFICATIONDATE, ZTRASHED, ZARCHIVED, ZPINNED, ZPERMANENTLYDELETED) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    note.title,
                    note.text,
                    note.identifier,
                    note.created,
                    note.modified,
                    note.trashed as i64,
                    note.archived as i64,
                    note.pinned as i64,
                    note.deleted as i64,
                ],
            )
            .expect("insert note");
        self.conn.last_insert_rowid()
    }

    /// Insert a tag, returning its row key.
    pub fn insert_tag(&self, title: &str, identifier: &str) -> i64 {
        self.conn
            .execute(
                "INSERT INTO ZSFNOTETAG (ZTITLE, ZUNIQUEIDENTIFIER) VALUES (?1, ?2)",
                params![title, identifier],
            )
            .expect("insert tag");
        self.conn.last_insert_rowid()
    }

    /// Insert a tag row with a NULL title.
    pub fn insert_untitled_tag(&self, identifier: &str) -> i64 {
        self.conn
            .execute(
                "INSERT INTO ZSFNOTETAG (ZTITLE, ZUNIQUEIDENTIFIER) VALUES (NULL, ?1)",
                params![identifier],
            )
            .expect("insert tag");
        self.conn.last_insert_rowid()
    }

    /// Attach a tag to a note.
    pub fn tag_note(&self, note_pk: i64, tag_pk: i64) {
        self.conn
            .execute(
                "INSERT INTO Z_5TAGS (Z_5NOTES, Z_13TAGS) VALUES (?1, ?2)",
                params![note_pk, tag_pk],
            )
            .expect("tag note");
    }

    /// Record that note `from_pk` links to note `to_pk`.
    pub fn link(&self, from_pk: i64, to_pk: i64) {
        self.conn
            .execute(
                "INSERT INTO ZSFNOTEBACKLINK (ZLINKEDBY, ZLINKINGTO) VALUES (?1, ?2)",
                params![from_pk, to_pk],
            )
            .expect("link notes");
    }
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new()
    }
}
