//! Config file loading tests

use std::io::Write;
use tempfile::NamedTempFile;
use wedlist_common::config::{config_file_path, load_toml_config, ConfigOverrides, ServerConfig};
use wedlist_common::Error;

#[test]
fn test_load_explicit_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "host = \"0.0.0.0\"\nport = 8081\nlog_level = \"debug\"\nmax_upload_bytes = 1024"
    )
    .unwrap();

    let toml = load_toml_config(Some(file.path())).unwrap();
    assert_eq!(toml.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(toml.port, Some(8081));

    let config = ServerConfig::resolve(ConfigOverrides::default(), toml);
    assert_eq!(config.bind_address(), "0.0.0.0:8081");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.max_upload_bytes, 1024);
}

#[test]
fn test_missing_explicit_config_file_is_an_error() {
    let result = load_toml_config(Some(std::path::Path::new(
        "/nonexistent/wedlist/config.toml",
    )));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_unknown_keys_are_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "prot = 8081").unwrap();

    let result = load_toml_config(Some(file.path()));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_cli_override_beats_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "port = 8081").unwrap();

    let toml = load_toml_config(Some(file.path())).unwrap();
    let overrides = ConfigOverrides {
        port: Some(9090),
        ..Default::default()
    };
    assert_eq!(ServerConfig::resolve(overrides, toml).port, 9090);
}

#[test]
fn test_config_file_path_reports_explicit_file() {
    let file = NamedTempFile::new().unwrap();

    let found = config_file_path(Some(file.path())).unwrap();
    assert_eq!(found.as_deref(), Some(file.path()));

    let missing = config_file_path(Some(std::path::Path::new("/nonexistent/wedlist.toml")));
    assert!(matches!(missing, Err(Error::Config(_))));
}
