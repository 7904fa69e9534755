//! Configuration loading
//!
//! Every setting is resolved in this order:
//! 1. Command-line argument (clap also fills it from the matching environment variable)
//! 2. TOML config file
//! 3. Compiled default
//!
//! A missing config file is not an error: the service starts with defaults.
//! A config file that exists but does not parse is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Largest accepted CSV upload unless configured otherwise (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Settings as they appear in `config.toml`
///
/// ```toml
/// host = "0.0.0.0"
/// port = 5080
/// database_path = "/var/lib/wedlist/wedlist.db"
/// log_level = "debug"
/// max_upload_bytes = 1048576
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

/// Fallback values compiled into the binary
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
    pub max_upload_bytes: usize,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5080,
            database_path: default_database_path(),
            log_level: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Values given on the command line (or via environment variables)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Merge overrides, file settings and compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Self {
        let defaults = CompiledDefaults::for_current_platform();

        Self {
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or(defaults.database_path),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
            max_upload_bytes: overrides
                .max_upload_bytes
                .or(file.max_upload_bytes)
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// `host:port` string for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Locate the TOML config file
///
/// With an explicit path the file must exist. Without one, the platform
/// config directory is tried (`~/.config/wedlist/config.toml` on Linux);
/// `None` means no file, so defaults apply.
pub fn config_file_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        ))),
        None => Ok(default_config_path().filter(|path| path.exists())),
    }
}

/// Parse one TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Locate and parse the TOML config file; no file yields an empty [`TomlConfig`]
///
/// Runs before logging is set up, so it does not log. Callers report the
/// source themselves once the subscriber exists.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    match config_file_path(explicit)? {
        Some(path) => read_toml_config(&path),
        None => Ok(TomlConfig::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wedlist").join("config.toml"))
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("wedlist"))
        .unwrap_or_else(|| PathBuf::from("./wedlist_data"))
        .join("wedlist.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_file() {
        let overrides = ConfigOverrides {
            port: Some(9000),
            ..Default::default()
        };
        let file = TomlConfig {
            port: Some(8000),
            host: Some("0.0.0.0".to_string()),
            ..Default::default()
        };

        let config = ServerConfig::resolve(overrides, file);
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_defaults_fill_gaps() {
        let config = ServerConfig::resolve(ConfigOverrides::default(), TomlConfig::default());
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.database_path.ends_with("wedlist.db"));
    }
}
