//! Configuration for the Bear MCP server.
//!
//! Defaults point at Bear's macOS database location. A TOML file in the
//! user config directory and a handful of environment variables override them
//! (see [`discovery`]).

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    API_TOKEN_ENV, CONFIG_DIR_ENV, DB_PATH_ENV, LoadedConfig, PREFER_API_ENV,
    apply_env_overrides, load_config, load_config_file, load_config_with_options,
    xdg_config_dir,
};
pub use error::{ConfigError, Result};
pub use types::{
    BEAR_DATABASE_RELATIVE_PATH, BearConfig, ConfigFile, DEFAULT_APP_PROCESS_NAME,
    DEFAULT_SERVER_NAME,
};
