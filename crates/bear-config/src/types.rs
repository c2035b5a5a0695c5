//! Configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name reported to MCP clients.
pub const DEFAULT_SERVER_NAME: &str = "bear-mcp-server";

/// Default Bear process name for liveness checks.
pub const DEFAULT_APP_PROCESS_NAME: &str = "Bear";

/// Location of Bear's database inside the user's home directory (macOS).
pub const BEAR_DATABASE_RELATIVE_PATH: &str = "Library/Group Containers/9K33E3U3T4.net.shinyfrog.bear/Application Data/database.sqlite";

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearConfig {
    /// Path of the Bear SQLite database (read path).
    pub database_path: PathBuf,
    /// API token appended to x-callback-url commands.
    pub api_token: Option<String>,
    /// Server name for MCP registration.
    pub server_name: String,
    /// Server version for MCP registration.
    pub server_version: String,
    /// Prefer the URL-scheme API over the database when both could serve a
    /// request. Carried for clients; no current operation consults it.
    pub prefer_api_token: bool,
    /// Program used to open x-callback-url references. Platform default when
    /// unset.
    pub opener: Option<String>,
    /// Process name used to check whether Bear is running.
    pub app_process_name: String,
}

impl BearConfig {
    /// Defaults with the database under `home`.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            database_path: home.into().join(BEAR_DATABASE_RELATIVE_PATH),
            api_token: None,
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            prefer_api_token: false,
            opener: None,
            app_process_name: DEFAULT_APP_PROCESS_NAME.to_string(),
        }
    }

    /// Apply one file layer. Only keys present in the file override.
    pub fn merge(&mut self, layer: ConfigFile) {
        if let Some(path) = layer.database_path {
            self.database_path = path;
        }
        if let Some(token) = layer.api_token.filter(|t| !t.is_empty()) {
            self.api_token = Some(token);
        }
        if let Some(name) = layer.server_name {
            self.server_name = name;
        }
        if let Some(prefer) = layer.prefer_api_token {
            self.prefer_api_token = prefer;
        }
        if let Some(opener) = layer.opener {
            self.opener = Some(opener);
        }
        if let Some(name) = layer.app_process_name {
            self.app_process_name = name;
        }
    }
}

/// On-disk TOML layer. Every key is optional.
///
/// ```toml
/// database_path = "/Users/me/backup/database.sqlite"
/// api_token = "XXXX-XXXX"
/// prefer_api_token = false
/// opener = "open"
/// app_process_name = "Bear"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub database_path: Option<PathBuf>,
    pub api_token: Option<String>,
    pub server_name: Option<String>,
    pub prefer_api_token: Option<bool>,
    pub opener: Option<String>,
    pub app_process_name: Option<String>,
}

impl ConfigFile {
    /// Parse a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BearConfig::with_home("/Users/me");
        assert_eq!(
            config.database_path,
            PathBuf::from("/Users/me/Library/Group Containers/9K33E3U3T4.net.shinyfrog.bear/Application Data/database.sqlite")
        );
        assert_eq!(config.server_name, "bear-mcp-server");
        assert!(config.api_token.is_none());
        assert!(!config.prefer_api_token);
        assert_eq!(config.app_process_name, "Bear");
    }

    #[test]
    fn test_merge_only_overrides_present_keys() {
        let mut config = BearConfig::with_home("/home/u");
        let layer = ConfigFile::from_toml(
            r#"
api_token = "abc"
opener = "xdg-open"
"#,
        )
        .unwrap();
        config.merge(layer);

        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(config.opener.as_deref(), Some("xdg-open"));
        assert!(config.database_path.starts_with("/home/u"));
    }

    #[test]
    fn test_empty_token_in_file_is_ignored() {
        let mut config = BearConfig::with_home("/home/u");
        config.merge(ConfigFile {
            api_token: Some(String::new()),
            ..Default::default()
        });
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(ConfigFile::from_toml("databse_path = \"/x\"").is_err());
    }
}
