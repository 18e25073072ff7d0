//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! building a client from it.

use std::io::Write;
use std::time::Duration;

use salt_netapi_domain::SaltError;
use salt_netapi_infra::{config, SaltClient};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "url": "https://salt-master:8000",
            "socket_timeout_ms": 30000,
            "proxy": {
                "hostname": "proxy.example.com",
                "port": 8080,
                "username": "proxy-user",
                "password": "proxy-pass"
            }
        }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let config = result.expect("Failed to load config from JSON file");
    assert_eq!(config.url, "https://salt-master:8000");
    assert_eq!(config.socket_timeout(), Some(Duration::from_secs(30)));

    let proxy = config.proxy().expect("proxy should be configured");
    assert_eq!(proxy.url(), "http://proxy.example.com:8080");
    assert_eq!(proxy.username.as_deref(), Some("proxy-user"));
    assert_eq!(proxy.password.as_deref(), Some("proxy-pass"));
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
url = "http://localhost:8000"
socket_timeout_ms = 1500
"#,
        "toml",
    );

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let config = result.expect("Failed to load config from TOML file");
    assert_eq!(config.url, "http://localhost:8000");
    assert_eq!(config.socket_timeout(), Some(Duration::from_millis(1500)));
    assert!(config.proxy().is_none());
}

#[test]
fn test_loaded_config_builds_client() {
    let path = write_config(r#"{"url": "http://localhost:8000", "socket_timeout_ms": 500}"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    let client = SaltClient::builder()
        .config(result.expect("config should load"))
        .build()
        .expect("client should build");
    assert_eq!(client.config().socket_timeout(), Some(Duration::from_millis(500)));
    assert!(!client.is_logged_in());
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/salt-api.json".into()));

    match result {
        Err(SaltError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "url": "http://salt" "#, "json");

    let result = config::load_from_file(Some(path.clone()));
    std::fs::remove_file(path).ok();

    match result {
        Err(SaltError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {:?}", other),
    }
}
