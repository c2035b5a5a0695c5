//! Error types for the store crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading the Bear store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file does not exist at the configured path.
    #[error("Bear database not found at: {}. Is Bear installed?", path.display())]
    StoreNotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// SQLite open or query failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The blocking query task panicked or was cancelled.
    #[error("Query task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// Whether this error means the store itself is unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::StoreNotFound { .. })
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
