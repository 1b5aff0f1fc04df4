//! Configuration structures
//!
//! Every section has defaults for a locally running backend, so a partial
//! config file (or none at all) still yields a usable configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ACCESS_TOKEN_EXPIRED_CODE, ACCESS_TOKEN_EXPIRED_STATUS, DEFAULT_API_BASE_URL,
    DEFAULT_AUTH_BASE_URL, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_TIMEOUT_SECS,
};

/// Root application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub oauth: OAuthConfig,
    pub credentials: CredentialConfig,
}

/// Backend API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL for authenticated API calls (e.g. `http://localhost:8080/api`)
    pub base_url: String,
    /// Base URL for the unauthenticated token refresh call
    pub auth_base_url: String,
    pub timeout_secs: u64,
    /// Total attempts for transport-level retries (initial try + retries)
    pub max_attempts: usize,
    /// HTTP status that, together with `expired_error_code`, marks an
    /// expired access token
    pub expired_status: u16,
    pub expired_error_code: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: 2,
            expired_status: ACCESS_TOKEN_EXPIRED_STATUS,
            expired_error_code: ACCESS_TOKEN_EXPIRED_CODE.to_string(),
        }
    }
}

/// Social login settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub google_client_id: String,
    /// Where Google sends the user back; `None` falls back to the auth
    /// callback route on the API host.
    pub google_redirect_uri: Option<String>,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            google_client_id: "your-google-client-id.apps.googleusercontent.com".to_string(),
            google_redirect_uri: None,
        }
    }
}

/// Where the credential cookie pair is kept between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialBackend {
    /// Process-local only, lost on exit
    Memory,
    /// JSON file under the user's data directory
    #[default]
    File,
    /// Platform keychain (macOS Keychain, Windows Credential Manager, Linux
    /// kernel keyring)
    Keychain,
}

impl std::str::FromStr for CredentialBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "keychain" => Ok(Self::Keychain),
            other => Err(format!("unknown credential backend: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    pub backend: CredentialBackend,
    pub keychain_service: String,
    /// Location of the `File` backend; the platform data directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            backend: CredentialBackend::default(),
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
            file_path: None,
        }
    }
}
