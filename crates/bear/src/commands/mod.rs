//! CLI command handlers.

pub mod check;
pub mod serve;

use bear_config::BearConfig;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Merged configuration.
    pub config: BearConfig,
    /// Verbose output enabled.
    pub verbose: bool,
}
