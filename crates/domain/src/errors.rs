//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for DayOn
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DayOnError {
    /// Login, refresh or hydration failure. Recoverable by logging in again.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Malformed or empty API envelope.
    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DayOnError {
    /// Stable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Data(_) => "data",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the only way forward is a fresh login.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Result type alias for DayOn operations
pub type Result<T> = std::result::Result<T, DayOnError>;
