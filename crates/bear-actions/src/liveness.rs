//! Checking whether the target application is running.
//!
//! Independent of dispatch: callers may consult it before sending a command,
//! the dispatcher never does.

use async_trait::async_trait;
use tracing::debug;

/// Default process name of the Bear application.
pub const BEAR_PROCESS_NAME: &str = "Bear";

/// Reports whether the target application process is alive.
#[async_trait]
pub trait AppLiveness: Send + Sync {
    /// `true` if the application is running. Failures to check read as `false`.
    async fn is_running(&self) -> bool;
}

/// Liveness via `pgrep -x <name>`.
#[derive(Debug, Clone)]
pub struct PgrepLiveness {
    process_name: String,
}

impl PgrepLiveness {
    pub fn new(process_name: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
        }
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }
}

impl Default for PgrepLiveness {
    fn default() -> Self {
        Self::new(BEAR_PROCESS_NAME)
    }
}

#[async_trait]
impl AppLiveness for PgrepLiveness {
    async fn is_running(&self) -> bool {
        let output = tokio::process::Command::new("pgrep")
            .arg("-x")
            .arg(&self.process_name)
            .stdin(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .output()
            .await;

        let running = match output {
            Ok(output) => {
                output.status.success() && !String::from_utf8_lossy(&output.stdout).trim().is_empty()
            }
            Err(e) => {
                debug!(error = %e, "pgrep unavailable");
                false
            }
        };
        debug!(process = %self.process_name, running, "checked application liveness");
        running
    }
}
