//! API-specific error types
//!
//! Classifies gateway failures and converts them into [`DayOnError`] at the
//! port boundary.

use std::time::Duration;

use dayon_domain::DayOnError;
use thiserror::Error;

/// Categories of API errors
///
/// Logged with every failed gateway call and used to pick the domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Rejected credentials or a session that could not be recovered
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Envelope reported failure or carried no payload
    Data,
    /// Network/connection errors and timeouts
    Network,
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Refresh was impossible or rejected; credentials have been cleared and
    /// the user sent to the login page.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Invalid response: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) | Self::SessionExpired(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Data(_) => ApiErrorCategory::Data,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }
}

impl From<DayOnError> for ApiError {
    fn from(err: DayOnError) -> Self {
        match err {
            DayOnError::Auth(message) => Self::Auth(message),
            DayOnError::Data(message) => Self::Data(message),
            DayOnError::Network(message) => Self::Network(message),
            DayOnError::Config(message) => Self::Config(message),
            DayOnError::InvalidInput(message) => Self::Client(message),
            DayOnError::Internal(message) => Self::Server(message),
        }
    }
}

impl From<ApiError> for DayOnError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err.category() {
            ApiErrorCategory::Authentication => DayOnError::Auth(message),
            ApiErrorCategory::Data => DayOnError::Data(message),
            ApiErrorCategory::Client => DayOnError::InvalidInput(message),
            ApiErrorCategory::Config => DayOnError::Config(message),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network => {
                DayOnError::Network(message)
            }
        }
    }
}
