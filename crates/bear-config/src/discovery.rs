//! Config file discovery, layering and environment overrides.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults (database under the home directory)
//! 2. `<config dir>/config.toml`
//! 3. Environment: `BEAR_DB_PATH`, `BEAR_API_TOKEN`, `BEAR_PREFER_API`

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{BearConfig, ConfigError, ConfigFile, Result};

/// Config filename within the config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for platform config directory resolution.
const APP_NAME: &str = "bear-mcp";

/// Environment variable to override the config directory.
pub const CONFIG_DIR_ENV: &str = "BEAR_MCP_CONFIG_DIR";
/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "BEAR_DB_PATH";
/// Environment variable carrying the API token.
pub const API_TOKEN_ENV: &str = "BEAR_API_TOKEN";
/// Environment variable enabling the prefer-API flag (`"true"`).
pub const PREFER_API_ENV: &str = "BEAR_PREFER_API";

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged configuration.
    pub config: BearConfig,
    /// Config file that was checked.
    pub source: Option<PathBuf>,
    /// Whether that file was found and applied.
    pub loaded: bool,
    /// Problems that did not stop loading (e.g. an unparsable file).
    pub warnings: Vec<String>,
}

/// Load configuration from the default locations and the process environment.
pub fn load_config() -> Result<LoadedConfig> {
    load_config_with_options(None, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit config directory and environment.
///
/// `config_dir` overrides both `BEAR_MCP_CONFIG_DIR` and the platform default.
/// `env` looks up environment variables, which keeps tests hermetic.
pub fn load_config_with_options<F>(config_dir: Option<&Path>, env: F) -> Result<LoadedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let home = dirs::home_dir();
    let mut config = match (&home, env(DB_PATH_ENV)) {
        (Some(home), _) => BearConfig::with_home(home),
        // The env override below supplies the path; the placeholder is replaced.
        (None, Some(_)) => BearConfig::with_home(""),
        (None, None) => return Err(ConfigError::NoHomeDir),
    };
    let mut warnings = Vec::new();

    let source = match config_dir {
        Some(dir) => Some(dir.join(USER_CONFIG_FILE)),
        None => config_dir_from(&env).map(|d| d.join(USER_CONFIG_FILE)),
    };

    let mut loaded = false;
    if let Some(path) = &source
        && path.is_file()
    {
        match load_config_file(path) {
            Ok(layer) => {
                config.merge(layer);
                loaded = true;
                debug!(path = %path.display(), "loaded config file");
            }
            Err(e) => warnings.push(format!("Failed to load {}: {}", path.display(), e)),
        }
    }

    apply_env_overrides(&mut config, &env);

    Ok(LoadedConfig {
        config,
        source,
        loaded,
        warnings,
    })
}

/// Read one config file.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    ConfigFile::from_toml(&contents)
}

/// Apply environment overrides. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut BearConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(path) = non_empty(DB_PATH_ENV) {
        config.database_path = PathBuf::from(path);
    }
    if let Some(token) = non_empty(API_TOKEN_ENV) {
        config.api_token = Some(token);
    }
    if let Some(prefer) = non_empty(PREFER_API_ENV) {
        config.prefer_api_token = prefer == "true";
    }
}

/// Get the config directory for bear-mcp.
///
/// Checks `BEAR_MCP_CONFIG_DIR` first, then falls back to the platform default
/// (`~/.config/bear-mcp` on Linux, `~/Library/Application Support/bear-mcp`
/// on macOS).
pub fn xdg_config_dir() -> Option<PathBuf> {
    config_dir_from(|key| std::env::var(key).ok())
}

fn config_dir_from<F>(env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = env(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
