//! Handing command references to the host environment.
//!
//! A successful dispatch only means the host accepted the reference for
//! delivery. Whether the target application then performed the action is not
//! observable from here.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::command::{BEAR_SCHEME, redact_token};
use crate::error::{DispatchError, Result};

/// Host facility that opens a URI (e.g. macOS `open`).
#[async_trait]
pub trait HostOpener: Send + Sync {
    /// Hand `reference` to the host. Returns once the host has accepted or
    /// rejected it.
    async fn open(&self, reference: &str) -> Result<()>;
}

/// Opens references by running an external program with the reference as its
/// only argument. No shell is involved.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
}

impl SystemOpener {
    /// Use `program` to open references.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `open` on macOS, `xdg-open` elsewhere.
    pub fn platform_default() -> Self {
        Self::new(default_open_program())
    }

    /// The program that will be run.
    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Name of the platform's "open by URI" program.
pub fn default_open_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::platform_default()
    }
}

#[async_trait]
impl HostOpener for SystemOpener {
    async fn open(&self, reference: &str) -> Result<()> {
        let output = tokio::process::Command::new(&self.program)
            .arg(reference)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| DispatchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DispatchError::HandoffFailed {
                program: self.program.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

/// Result of a dispatch, in the shape returned to tool callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchOutcome {
    /// The handoff succeeded.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// The handoff failed with `error`.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Validates references and hands them to a [`HostOpener`].
///
/// Dispatch is attempted regardless of whether the target application is
/// running; see [`crate::AppLiveness`] for that check.
#[derive(Clone)]
pub struct ActionDispatcher {
    opener: Arc<dyn HostOpener>,
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("scheme", &BEAR_SCHEME)
            .finish_non_exhaustive()
    }
}

impl ActionDispatcher {
    /// Dispatch Bear references through `opener`.
    pub fn new(opener: Arc<dyn HostOpener>) -> Self {
        Self { opener }
    }


    /// Hand `reference` to the host. Never fails; errors are reported in the
    /// outcome.
    ///
    /// Logged references have their token masked.
    pub async fn dispatch(&self, reference: &str) -> DispatchOutcome {
        match self.try_dispatch(reference).await {
            Ok(()) => {
                debug!(reference = %redact_token(reference), "command handed off");
                DispatchOutcome::ok()
            }
            Err(e) => {
                warn!(
                    reference = %redact_token(reference),
                    error = %e,
                    "command dispatch failed"
                );
                DispatchOutcome::failed(e.to_string())
            }
        }
    }

    async fn try_dispatch(&self, reference: &str) -> Result<()> {
        let parsed = url::Url::parse(reference)
            .map_err(|e| {
                DispatchError::malformed(format!("{}: {e}", redact_token(reference)))
            })?;
        if parsed.scheme() != BEAR_SCHEME {
            return Err(DispatchError::malformed(format!(
                "expected scheme '{BEAR_SCHEME}', got '{}'",
                parsed.scheme()
            )));
        }
        self.opener.open(reference).await
    }
}
