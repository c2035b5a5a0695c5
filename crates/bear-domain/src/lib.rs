//! Access facade over Bear's read and write paths.
//!
//! [`BearService`] validates caller input, answers reads from the local
//! store through [`bear_store`], and turns writes into x-callback-url
//! commands through [`bear_actions`]. Every operation returns an
//! [`OperationResult`].
//!
//! Read failures propagate as [`DomainError`]; dispatch failures are
//! captured in the result with `success: false`.

pub mod error;
pub mod services;
pub mod types;
pub mod validation;

pub use error::{DomainError, Result};
pub use services::BearService;
pub use types::{
    ActionReceipt, AppendToNote, CreateNote, DEFAULT_APPEND_SEPARATOR, DeleteTag, NoteAction,
    OperationResult, UpdateNote,
};
pub use validation::{DAYS_RANGE, LIMIT_RANGE};
