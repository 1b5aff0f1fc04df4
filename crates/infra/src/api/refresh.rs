//! Unauthenticated token refresh
//!
//! The refresh endpoint lives on the auth host rather than the API base URL
//! and is called without a bearer token, so it bypasses [`super::ApiGateway`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dayon_core::{CredentialStore, TokenRefresher};
use dayon_domain::constants::REFRESH_TOKEN_PATH;
use dayon_domain::{ApiConfig, DayOnError, LoginResponse, MaybeEnveloped, Result};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::cookies::absorb_credential_cookies;
use crate::http::HttpClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Calls `POST {auth_base_url}/v1/account/refreshToken`.
///
/// The new pair may come back in the body, as credential cookies, or both.
pub struct RefreshClient {
    http: HttpClient,
    url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl RefreshClient {
    /// # Errors
    ///
    /// Returns `Config` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .build()
            .map_err(|e| DayOnError::Config(format!("Failed to build refresh client: {e}")))?;
        let url = format!("{}{}", config.auth_base_url.trim_end_matches('/'), REFRESH_TOKEN_PATH);

        Ok(Self { http, url, credentials })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn from_cookies(&self, cookies_applied: usize) -> Result<Option<LoginResponse>> {
        if cookies_applied == 0 {
            return Ok(None);
        }
        Ok(self.credentials.access_token()?.map(|access_token| LoginResponse {
            access_token,
            refresh_token: self.credentials.refresh_token().ok().flatten(),
            account: None,
        }))
    }
}

#[async_trait]
impl TokenRefresher for RefreshClient {
    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<LoginResponse> {
        let request =
            self.http.request(Method::POST, &self.url).json(&RefreshRequest { refresh_token });
        let response = self.http.send(request).await?;
        let applied = absorb_credential_cookies(&response, self.credentials.as_ref());

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Refresh token rejected");
            return Err(DayOnError::Auth(format!("refresh rejected with status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DayOnError::Network(format!("Failed to read refresh response: {e}")))?;

        let parsed = serde_json::from_slice::<MaybeEnveloped<LoginResponse>>(&body)
            .map_err(|e| DayOnError::Data(format!("refresh: {e}")))
            .and_then(|payload| payload.into_data("refresh"))
            .map(|login| (!login.access_token.is_empty()).then_some(login));

        match parsed {
            Ok(Some(login)) => {
                debug!(rotated = login.refresh_token.is_some(), "Refresh returned tokens in body");
                Ok(login)
            }
            Ok(None) | Err(_) if applied > 0 => self
                .from_cookies(applied)?
                .ok_or_else(|| DayOnError::Auth("refresh cleared the access token".into())),
            Ok(None) => Err(DayOnError::Data("refresh: no access token returned".into())),
            Err(err) => Err(err),
        }
    }
}
