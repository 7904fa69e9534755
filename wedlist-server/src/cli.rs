//! Command line arguments
//!
//! Every setting can also come from a `WEDLIST_*` environment variable.
//! Anything left unset falls through to the TOML file, then to compiled
//! defaults (see [`wedlist_common::config::ServerConfig::resolve`]).

use clap::Parser;
use std::path::PathBuf;
use wedlist_common::config::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "wedlist-server")]
#[command(about = "Wedding guest list and RSVP service")]
#[command(version)]
pub struct Args {
    /// TOML config file (default: platform config dir, wedlist/config.toml)
    #[arg(short, long, env = "WEDLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "WEDLIST_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WEDLIST_PORT")]
    pub port: Option<u16>,

    /// SQLite database file
    #[arg(long, env = "WEDLIST_DATABASE_PATH")]
    pub database_path: Option<PathBuf>,

    /// Tracing filter, e.g. "info" or "wedlist_server=debug"
    #[arg(long, env = "WEDLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Largest accepted CSV upload, in bytes
    #[arg(long, env = "WEDLIST_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<usize>,
}

impl Args {
    pub fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host,
            port: self.port,
            database_path: self.database_path,
            log_level: self.log_level,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_flags_become_overrides() {
        let args = Args::parse_from([
            "wedlist-server",
            "--port",
            "6000",
            "--database-path",
            "/tmp/w.db",
        ]);
        assert!(args.config.is_none());

        let overrides = args.into_overrides();
        assert_eq!(overrides.port, Some(6000));
        assert_eq!(overrides.database_path, Some(PathBuf::from("/tmp/w.db")));
        assert_eq!(overrides.host, None);
    }

    #[test]
    #[serial]
    fn test_env_fallback() {
        std::env::set_var("WEDLIST_LOG_LEVEL", "debug");
        let args = Args::parse_from(["wedlist-server"]);
        std::env::remove_var("WEDLIST_LOG_LEVEL");

        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    #[serial]
    fn test_flag_beats_env() {
        std::env::set_var("WEDLIST_PORT", "7000");
        let args = Args::parse_from(["wedlist-server", "--port", "7001"]);
        std::env::remove_var("WEDLIST_PORT");

        assert_eq!(args.port, Some(7001));
    }
}
