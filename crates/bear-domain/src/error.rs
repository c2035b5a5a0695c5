//! Domain error types.

use thiserror::Error;

/// Domain-level errors.
///
/// Dispatch failures never appear here; they are reported inside
/// [`crate::OperationResult`].
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller input rejected before reaching the store or the builder.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Read path failure (missing store, SQLite error).
    #[error(transparent)]
    Store(#[from] bear_store::StoreError),
}

impl DomainError {
    /// Whether the store file is unreachable.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_connectivity())
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
