//! Error types for command dispatch.

use thiserror::Error;

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Reasons a command could not be handed to the host.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command reference is not a valid URL for the target scheme.
    #[error("malformed command reference: {0}")]
    Malformed(String),

    /// The host open facility could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The host open facility ran but reported failure.
    #[error("'{program}' exited with code {code}{}", format_stderr(.stderr))]
    HandoffFailed {
        /// Program that was invoked.
        program: String,
        /// Exit code, -1 when killed by a signal.
        code: i32,
        /// Captured standard error.
        stderr: String,
    },
}

impl DispatchError {
    /// Create a malformed reference error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handoff_failed_display() {
        let err = DispatchError::HandoffFailed {
            program: "open".to_string(),
            code: 1,
            stderr: "No application knows how to open URL\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'open' exited with code 1: No application knows how to open URL"
        );

        let err = DispatchError::HandoffFailed {
            program: "open".to_string(),
            code: 2,
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "'open' exited with code 2");
    }

    #[test]
    fn test_malformed_display() {
        let err = DispatchError::malformed("relative URL without a base");
        assert!(err.to_string().contains("malformed"));
    }
}
