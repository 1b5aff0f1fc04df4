//! Conversions from external infrastructure errors into domain errors.

use dayon_domain::DayOnError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DayOnError);

impl From<InfraError> for DayOnError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DayOnError> for InfraError {
    fn from(value: DayOnError) -> Self {
        InfraError(value)
    }
}

trait IntoDayOnError {
    fn into_dayon(self) -> DayOnError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → DayOnError */
/* -------------------------------------------------------------------------- */

impl IntoDayOnError for KeyringError {
    fn into_dayon(self) -> DayOnError {
        use KeyringError::{
            Ambiguous, BadEncoding, Invalid, NoStorageAccess, PlatformFailure, TooLong,
        };

        let description = self.to_string();

        match self {
            BadEncoding(_) => {
                DayOnError::Internal("credential in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => DayOnError::Config(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => {
                DayOnError::Config(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            Ambiguous(entries) => DayOnError::Internal(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => DayOnError::Internal(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => {
                DayOnError::Internal(format!("unable to access secure storage: {err}"))
            }
            _ => DayOnError::Internal(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_dayon())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DayOnError */
/* -------------------------------------------------------------------------- */

impl IntoDayOnError for HttpError {
    fn into_dayon(self) -> DayOnError {
        if self.is_timeout() {
            return DayOnError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return DayOnError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return DayOnError::Data(format!("malformed response body: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => DayOnError::Auth(message),
                400..=499 => DayOnError::InvalidInput(message),
                _ => DayOnError::Network(message),
            };
        }

        DayOnError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_dayon())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn keyring_platform_failure_maps_to_internal() {
        let err = KeyringError::PlatformFailure("locked".into());
        let mapped: DayOnError = InfraError::from(err).into();
        match mapped {
            DayOnError::Internal(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: DayOnError = InfraError::from(error).into();
        match mapped {
            DayOnError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }
}
