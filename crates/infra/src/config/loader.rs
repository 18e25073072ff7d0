//! Configuration loader
//!
//! Loads the client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SALT_API_URL`: Base URL of the API (required)
//! - `SALT_API_SOCKET_TIMEOUT_MS`: Connect/read timeout in milliseconds
//! - `SALT_API_PROXY_HOST`: Proxy hostname
//! - `SALT_API_PROXY_PORT`: Proxy port (required when a host is set)
//! - `SALT_API_PROXY_USER`: Proxy username
//! - `SALT_API_PROXY_PASSWORD`: Proxy password
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./salt-api.toml` or `./salt-api.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};

use salt_netapi_domain::{ClientConfig, ProxySettings, Result, SaltError};

const CONFIG_FILE_NAMES: [&str; 4] = ["salt-api.toml", "salt-api.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If `SALT_API_URL` is
/// missing or a variable is invalid, falls back to loading from a config
/// file.
///
/// # Errors
/// Returns `SaltError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SaltError::Config` if `SALT_API_URL` is missing or a numeric
/// variable cannot be parsed.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var("SALT_API_URL")?);

    if let Some(timeout) = optional_env_var("SALT_API_SOCKET_TIMEOUT_MS") {
        let millis = timeout
            .parse::<u64>()
            .map_err(|e| SaltError::Config(format!("Invalid socket timeout: {}", e)))?;
        config.socket_timeout_ms = Some(millis);
    }

    if let Some(host) = optional_env_var("SALT_API_PROXY_HOST") {
        let port = env_var("SALT_API_PROXY_PORT")?
            .parse::<u16>()
            .map_err(|e| SaltError::Config(format!("Invalid proxy port: {}", e)))?;
        let mut proxy = ProxySettings::new(host, port);
        if let Some(user) = optional_env_var("SALT_API_PROXY_USER") {
            proxy = proxy.with_credentials(user, optional_env_var("SALT_API_PROXY_PASSWORD"));
        }
        config.set_proxy(proxy);
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SaltError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SaltError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SaltError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SaltError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SaltError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SaltError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SaltError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the standard paths for configuration files
///
/// Searches the current working directory first, then the directory of the
/// executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `SaltError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SaltError::Config(format!("Missing required environment variable: {}", key)))
}

/// Optional environment variable; unset and empty are the same.
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
