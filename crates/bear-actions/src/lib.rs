//! Write path to Bear through its `x-callback-url` scheme.
//!
//! Bear exposes no writable API over its store, so every mutation is a URL
//! handed to the operating system's URI opener:
//!
//! ```text
//! ActionCommand ──► CommandBuilder ──► "bear://x-callback-url/create?title=..."
//!                                              │
//!                                              ▼
//!                                      ActionDispatcher ──► HostOpener (open / xdg-open)
//! ```
//!
//! [`AppLiveness`] is a separate capability for checking whether Bear is
//! running; dispatch does not depend on it.
//!
//! # Usage
//!
//! ```no_run
//! # async fn demo() {
//! use std::sync::Arc;
//! use bear_actions::{ActionCommand, ActionDispatcher, CommandBuilder, SystemOpener, Verb};
//!
//! let builder = CommandBuilder::new(None);
//! let reference = builder.build(
//!     &ActionCommand::new(Verb::OpenNote).text("title", "Groceries"),
//! );
//!
//! let dispatcher = ActionDispatcher::new(Arc::new(SystemOpener::platform_default()));
//! let outcome = dispatcher.dispatch(&reference).await;
//! assert!(outcome.success);
//! # }
//! ```

pub mod command;
pub mod dispatcher;
pub mod error;
pub mod liveness;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use command::{
    ActionCommand, BEAR_SCHEME, CALLBACK_HOST, CommandBuilder, ParamValue, Verb, flatten_tags,
};
pub use dispatcher::{
    ActionDispatcher, DispatchOutcome, HostOpener, SystemOpener, default_open_program,
};
pub use error::{DispatchError, Result};
pub use liveness::{AppLiveness, BEAR_PROCESS_NAME, PgrepLiveness};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockLiveness, MockOpener};
