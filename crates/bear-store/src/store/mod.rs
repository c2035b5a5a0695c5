//! Read-only handle on the Bear SQLite store.
//!
//! The connection is opened lazily on first use, can be released with
//! [`BearDatabase::close`], and is re-opened transparently by the next query.
//! Queries run on tokio's blocking pool so callers never block the scheduler.

mod note_ops;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::types::StoreStatus;

/// Read-only access to a Bear database file.
///
/// Cloning is cheap; clones share the same connection slot.
#[derive(Clone)]
pub struct BearDatabase {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl std::fmt::Debug for BearDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearDatabase")
            .field("path", &self.inner.path)
            .field("open", &self.is_open())
            .finish()
    }
}

impl BearDatabase {
    /// Create a handle for the database at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                conn: Mutex::new(None),
            }),
        }
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Check that the database file exists, without opening it.
    pub fn verify(&self) -> StoreStatus {
        if self.inner.path.exists() {
            StoreStatus::present()
        } else {
            StoreStatus::missing(self.inner.not_found().to_string())
        }
    }

    /// Whether a connection is currently held.
    pub fn is_open(&self) -> bool {
        self.inner.conn.lock().is_some()
    }

    /// Release the connection. The next query opens a new one.
    pub fn close(&self) {
        if self.inner.conn.lock().take().is_some() {
            info!(path = %self.inner.path.display(), "Bear database connection closed");
        }
    }

    /// Run `f` against the (lazily opened) connection on the blocking pool.
    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut guard = inner.conn.lock();
            let conn = match guard.take() {
                Some(conn) => conn,
                None => inner.open()?,
            };
            let conn = guard.insert(conn);
            f(conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

impl Inner {
    fn not_found(&self) -> StoreError {
        StoreError::StoreNotFound {
            path: self.path.clone(),
        }
    }

    fn open(&self) -> Result<Connection> {
        if !self.path.exists() {
            return Err(self.not_found());
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        info!(path = %self.path.display(), "Bear database opened read-only");
        Ok(conn)
    }
}
