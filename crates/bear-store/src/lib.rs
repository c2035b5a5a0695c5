//! Read-only access to the Bear notes store.
//!
//! Bear keeps its notes in a Core Data SQLite file with an undocumented
//! schema. This crate reads that file directly and projects rows into plain
//! [`Note`] and [`Tag`] values.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  BearDatabase                                                │
//! │  - lazily opened read-only connection, close + re-open       │
//! │  - search / get / by-tag / recent / tags / backlinks         │
//! └──────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  mapper + timestamp                                          │
//! │  - ZSFNOTE rows → Note, Core Data seconds → DateTime<Utc>    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! # async fn demo() -> bear_store::Result<()> {
//! use bear_store::BearDatabase;
//!
//! let db = BearDatabase::new("/path/to/database.sqlite");
//! if !db.verify().exists {
//!     return Ok(());
//! }
//!
//! for note in db.search_notes("meeting", 5).await? {
//!     println!("{} ({})", note.title, note.identifier);
//! }
//! db.close();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mapper;
pub mod schema;
pub mod store;
pub mod timestamp;
pub mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use error::{Result, StoreError};
pub use mapper::{RawNoteRow, map_note_row};
pub use store::BearDatabase;
pub use timestamp::{CORE_DATA_EPOCH_OFFSET, cutoff_days_ago, to_standard, to_store_native};
pub use types::{Note, StoreStatus, Tag, UNTITLED};
