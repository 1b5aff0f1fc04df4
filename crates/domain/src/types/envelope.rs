//! Standard backend response envelope

use serde::{Deserialize, Serialize};

use crate::errors::{DayOnError, Result};

/// `{ success, data?, message?, errorCode?, path?, timestamp? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error_code: None,
            path: None,
            timestamp: None,
        }
    }

    pub fn failure(message: impl Into<String>, error_code: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error_code,
            path: None,
            timestamp: None,
        }
    }

    /// Fail with [`DayOnError::Data`] unless the backend reported success.
    ///
    /// Returns the (possibly absent) payload.
    pub fn ensure_success(self, context: &str) -> Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(DayOnError::Data(self.failure_message(context)))
        }
    }

    /// Payload of a successful envelope; `success == false` or a missing
    /// `data` field are both data errors.
    pub fn into_data(self, context: &str) -> Result<T> {
        let fallback = self.failure_message(context);
        self.ensure_success(context)?.ok_or(DayOnError::Data(fallback))
    }

    fn failure_message(&self, context: &str) -> String {
        match (&self.message, &self.error_code) {
            (Some(message), Some(code)) => format!("{context}: {message} ({code})"),
            (Some(message), None) => format!("{context}: {message}"),
            (None, Some(code)) => format!("{context}: error code {code}"),
            (None, None) => format!("{context}: empty response"),
        }
    }
}

/// Payload that some endpoints wrap in the envelope and others send bare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MaybeEnveloped<T> {
    Enveloped(ApiResponse<T>),
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    pub fn into_data(self, context: &str) -> Result<T> {
        match self {
            Self::Enveloped(envelope) => envelope.into_data(context),
            Self::Bare(data) => Ok(data),
        }
    }
}
