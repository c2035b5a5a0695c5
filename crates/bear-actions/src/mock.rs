//! In-memory doubles for the host capabilities.
//!
//! Used by tests here and in dependent crates, behind the `mock` feature.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::dispatcher::HostOpener;
use crate::error::{DispatchError, Result};
use crate::liveness::AppLiveness;

/// Records every reference it is asked to open.
#[derive(Debug, Default)]
pub struct MockOpener {
    opened: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl MockOpener {
    /// An opener that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// An opener that rejects everything with `stderr`.
    pub fn failing(stderr: impl Into<String>) -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            failure: Some(stderr.into()),
        }
    }

    /// References received so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    /// The most recent reference received.
    pub fn last(&self) -> Option<String> {
        self.opened.lock().last().cloned()
    }
}

#[async_trait]
impl HostOpener for MockOpener {
    async fn open(&self, reference: &str) -> Result<()> {
        self.opened.lock().push(reference.to_string());
        match &self.failure {
            Some(stderr) => Err(DispatchError::HandoffFailed {
                program: "mock-open".to_string(),
                code: 1,
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Liveness with a settable answer.
#[derive(Debug, Default)]
pub struct MockLiveness {
    running: AtomicBool,
}

impl MockLiveness {
    pub fn new(running: bool) -> Self {
        Self {
            running: AtomicBool::new(running),
        }
    }
}

#[async_trait]
impl AppLiveness for MockLiveness {
    async fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
