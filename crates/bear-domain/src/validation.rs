//! Input checks applied before any store query or command is built.
//!
//! The protocol shell validates arguments first; these run again so the
//! facade never relies on that.

use crate::error::{DomainError, Result};

/// Inclusive bounds for result limits.
pub const LIMIT_RANGE: std::ops::RangeInclusive<usize> = 1..=100;

/// Inclusive bounds for day windows.
pub const DAYS_RANGE: std::ops::RangeInclusive<u32> = 1..=365;

/// Reject empty or whitespace-only strings.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Reject limits outside 1–100.
pub fn validate_limit(limit: usize) -> Result<()> {
    if !LIMIT_RANGE.contains(&limit) {
        return Err(DomainError::Validation(format!(
            "limit must be between {} and {}, got {limit}",
            LIMIT_RANGE.start(),
            LIMIT_RANGE.end()
        )));
    }
    Ok(())
}

/// Reject day windows outside 1–365.
pub fn validate_days(days: u32) -> Result<()> {
    if !DAYS_RANGE.contains(&days) {
        return Err(DomainError::Validation(format!(
            "days must be between {} and {}, got {days}",
            DAYS_RANGE.start(),
            DAYS_RANGE.end()
        )));
    }
    Ok(())
}
