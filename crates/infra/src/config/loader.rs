//! Configuration loader
//!
//! Loads application configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Probe the standard paths for a config file; use defaults if none exists
//! 2. Apply environment variable overrides on top
//! 3. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `DAYON_API_BASE_URL`: Base URL for authenticated API calls
//! - `DAYON_AUTH_BASE_URL`: Base URL for the token refresh call
//! - `DAYON_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `DAYON_MAX_ATTEMPTS`: Transport attempts for 5xx/connect failures
//! - `DAYON_GOOGLE_CLIENT_ID`: Google OAuth client id
//! - `DAYON_GOOGLE_REDIRECT_URI`: Google OAuth redirect URI
//! - `DAYON_CREDENTIAL_BACKEND`: `memory`, `file` or `keychain`
//! - `DAYON_KEYCHAIN_SERVICE`: Keychain service name for the token pair
//! - `DAYON_CREDENTIAL_FILE`: Token file used by the `file` backend
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./dayon.json` or `./dayon.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use dayon_domain::{Config, CredentialBackend, DayOnError, Result};

/// Load configuration with automatic fallback strategy
///
/// Reads the first config file found by [`probe_config_paths`] (or starts
/// from defaults) and applies environment overrides.
///
/// # Errors
/// Returns `DayOnError::Config` if a config file exists but cannot be parsed,
/// or an environment variable has an invalid value.
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from defaults plus environment variables only
///
/// # Errors
/// Returns `DayOnError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Format is detected by file extension.
///
/// # Errors
/// Returns `DayOnError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DayOnError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DayOnError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DayOnError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DayOnError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DayOnError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(DayOnError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard paths for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["dayon.json", "dayon.toml", "config.json", "config.toml"];

    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter().flat_map(|dir| NAMES.iter().map(move |name| dir.join(name))).find(|p| p.exists())
}

/// Overwrite `config` fields from any `DAYON_*` variables that are set.
///
/// # Errors
/// Returns `DayOnError::Config` for unparsable numeric or backend values.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(url) = env_opt("DAYON_API_BASE_URL") {
        config.api.base_url = url;
    }
    if let Some(url) = env_opt("DAYON_AUTH_BASE_URL") {
        config.api.auth_base_url = url;
    }
    if let Some(secs) = env_parse::<u64>("DAYON_TIMEOUT_SECS")? {
        config.api.timeout_secs = secs;
    }
    if let Some(attempts) = env_parse::<usize>("DAYON_MAX_ATTEMPTS")? {
        config.api.max_attempts = attempts;
    }
    if let Some(client_id) = env_opt("DAYON_GOOGLE_CLIENT_ID") {
        config.oauth.google_client_id = client_id;
    }
    if let Some(redirect) = env_opt("DAYON_GOOGLE_REDIRECT_URI") {
        config.oauth.google_redirect_uri = Some(redirect);
    }
    if let Some(backend) = env_opt("DAYON_CREDENTIAL_BACKEND") {
        config.credentials.backend =
            CredentialBackend::from_str(&backend).map_err(DayOnError::Config)?;
    }
    if let Some(service) = env_opt("DAYON_KEYCHAIN_SERVICE") {
        config.credentials.keychain_service = service;
    }
    if let Some(path) = env_opt("DAYON_CREDENTIAL_FILE") {
        config.credentials.file_path = Some(PathBuf::from(path));
    }
    Ok(())
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| DayOnError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
