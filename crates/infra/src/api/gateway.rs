//! Authenticated API gateway
//!
//! Every backend call made on behalf of a signed-in user goes through
//! [`ApiGateway`]. It attaches the bearer token, absorbs rotated credential
//! cookies and recovers from an expired access token by refreshing once and
//! replaying the request.

use std::sync::Arc;
use std::time::Duration;

use dayon_core::{CredentialStore, Navigator, TokenRefresher};
use dayon_domain::{ApiConfig, ApiResponse, DayOnError, Route};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::cookies::absorb_credential_cookies;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Gateway settings derived from [`ApiConfig`]
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    /// Upper bound for a single attempt, transport retries included
    pub timeout: Duration,
    /// Transport-level attempts for 5xx and connection failures
    pub max_attempts: usize,
    pub expired_status: StatusCode,
    pub expired_error_code: String,
}

impl From<&ApiConfig> for GatewayConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_attempts: config.max_attempts,
            expired_status: StatusCode::from_u16(config.expired_status)
                .unwrap_or(StatusCode::FORBIDDEN),
            expired_error_code: config.expired_error_code.clone(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

/// Where a logical request is in its refresh budget.
///
/// A request may be replayed at most once, and only after a successful
/// refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Fresh,
    RetriedAfterRefresh,
}

struct GatewayRequest<'a> {
    method: Method,
    path: &'a str,
    query: &'a [(&'a str, &'a str)],
    body: Option<Value>,
}

/// HTTP client for the authenticated backend API
pub struct ApiGateway {
    http: HttpClient,
    config: GatewayConfig,
    credentials: Arc<dyn CredentialStore>,
    refresher: Arc<dyn TokenRefresher>,
    navigator: Arc<dyn Navigator>,
}

impl ApiGateway {
    /// Create a gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn new(
        config: GatewayConfig,
        credentials: Arc<dyn CredentialStore>,
        refresher: Arc<dyn TokenRefresher>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http, config, credentials, refresher, navigator })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Execute a GET request and decode the response body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; [`ApiError::SessionExpired`] means the user has
    /// already been sent to the login page.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.get_with_query(path, &[]).await
    }

    /// GET with query parameters.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        self.execute(GatewayRequest { method: Method::GET, path, query, body: None }).await
    }

    /// Execute a POST request with a JSON body.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {e}")))?;
        self.execute(GatewayRequest { method: Method::POST, path, query: &[], body: Some(body) })
            .await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        request: GatewayRequest<'_>,
    ) -> Result<R, ApiError> {
        let url = format!("{}{}", self.config.base_url, request.path);
        let result = self.execute_with_recovery(&request, &url).await;
        if let Err(err) = &result {
            warn!(%url, category = ?err.category(), error = %err, "API request failed");
        }
        result
    }

    async fn execute_with_recovery<R: DeserializeOwned>(
        &self,
        request: &GatewayRequest<'_>,
        url: &str,
    ) -> Result<R, ApiError> {
        let mut attempt = Attempt::Fresh;

        loop {
            let response = self.dispatch(request, url).await?;
            absorb_credential_cookies(&response, self.credentials.as_ref());

            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|e| ApiError::Network(format!("Failed to read response: {e}")))?;

            if status.is_success() {
                debug!(%url, %status, ?attempt, "Request succeeded");
                return decode_body(status, &body);
            }

            if self.is_expired_signature(status, &body) {
                match attempt {
                    Attempt::Fresh => {
                        info!(%url, "Access token expired, refreshing");
                        self.recover_session().await?;
                        attempt = Attempt::RetriedAfterRefresh;
                        continue;
                    }
                    Attempt::RetriedAfterRefresh => {
                        warn!(%url, "Access token rejected again after refresh");
                        return Err(ApiError::Auth(format!(
                            "{url} rejected the refreshed access token"
                        )));
                    }
                }
            }

            return Err(map_status_error(status, url, &body));
        }
    }

    async fn dispatch(&self, request: &GatewayRequest<'_>, url: &str) -> Result<Response, ApiError> {
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header("Content-Type", "application/json");

        if !request.query.is_empty() {
            builder = builder.query(request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = self.credentials.access_token()? {
            builder = builder.bearer_auth(token);
        }

        let timeout = self.config.timeout;
        match tokio::time::timeout(timeout, self.http.send(builder)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(ApiError::from(err)),
            Err(_) => Err(ApiError::Timeout(timeout)),
        }
    }

    fn is_expired_signature(&self, status: StatusCode, body: &[u8]) -> bool {
        if status != self.config.expired_status {
            return false;
        }
        serde_json::from_slice::<ApiResponse<Value>>(body)
            .ok()
            .and_then(|envelope| envelope.error_code)
            .is_some_and(|code| code == self.config.expired_error_code)
    }

    /// Trade the stored refresh token for a new pair.
    ///
    /// Any failure abandons the session.
    async fn recover_session(&self) -> Result<(), ApiError> {
        let refresh_token = match self.credentials.refresh_token() {
            Ok(Some(token)) => token,
            Ok(None) => return Err(self.abandon_session("no refresh token stored")),
            Err(err) => return Err(self.abandon_session(&err.to_string())),
        };

        let response = match self.refresher.refresh(&refresh_token).await {
            Ok(response) => response,
            Err(err) => return Err(self.abandon_session(&err.to_string())),
        };

        let Some(tokens) = response.token_pair(Some(refresh_token.as_str())) else {
            return Err(self.abandon_session("refresh returned no tokens"));
        };
        if tokens.access_token.is_empty() {
            return Err(self.abandon_session("refresh returned no access token"));
        }
        if let Err(err) = self.credentials.store(&tokens) {
            return Err(self.abandon_session(&err.to_string()));
        }

        info!("Access token refreshed");
        Ok(())
    }

    fn abandon_session(&self, reason: &str) -> ApiError {
        warn!(reason, "Token refresh failed, signing out");
        if let Err(err) = self.credentials.clear() {
            warn!(error = %err, "Failed to clear credentials");
        }
        self.navigator.navigate(Route::Login);
        ApiError::SessionExpired(reason.to_string())
    }
}

fn decode_body<R: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<R, ApiError> {
    let no_content = status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT;
    if no_content || body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Data(format!("empty response ({}) where a body was expected", status.as_u16()))
        });
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Data(format!("Failed to parse response: {e}")))
}

fn map_status_error(status: StatusCode, url: &str, body: &[u8]) -> ApiError {
    let text = String::from_utf8_lossy(body);
    let message = if text.trim().is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {text}")
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ApiError::Auth(message);
    }
    if let Ok(envelope) = serde_json::from_slice::<ApiResponse<Value>>(body) {
        if !envelope.success {
            return match envelope.ensure_success(url) {
                Err(DayOnError::Data(reason)) => ApiError::Data(reason),
                _ => ApiError::Data(message),
            };
        }
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        ApiError::RateLimit(message)
    } else if status.is_server_error() {
        ApiError::Server(message)
    } else if status.is_client_error() {
        ApiError::Client(message)
    } else {
        ApiError::Network(message)
    }
}
