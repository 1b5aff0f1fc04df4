//! Backend auth endpoints
//!
//! Login and account calls go through the gateway so they carry the bearer
//! token and pick up credential cookies. Refresh is delegated to the
//! unauthenticated [`TokenRefresher`].

use std::sync::Arc;

use async_trait::async_trait;
use dayon_core::{AuthApi, CredentialStore, TokenRefresher};
use dayon_domain::constants::{
    ACCOUNT_INFO_PATH, GOOGLE_LOGIN_PATH, KAKAO_LOGIN_PATH, LOGOUT_PATH,
};
use dayon_domain::{
    Account, ApiResponse, DayOnError, LoginResponse, MaybeEnveloped, Provider, Result,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::api::ApiGateway;

#[derive(Serialize)]
struct LoginRequest<'a> {
    code: &'a str,
}

fn login_path(provider: Provider) -> &'static str {
    match provider {
        Provider::Google => GOOGLE_LOGIN_PATH,
        Provider::Kakao => KAKAO_LOGIN_PATH,
    }
}

/// [`AuthApi`] over HTTP.
pub struct AuthService {
    gateway: Arc<ApiGateway>,
    refresher: Arc<dyn TokenRefresher>,
    credentials: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(
        gateway: Arc<ApiGateway>,
        refresher: Arc<dyn TokenRefresher>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self { gateway, refresher, credentials }
    }

    /// Login body, or the access token the backend set as a cookie when the
    /// body carries none.
    fn login_response(&self, body: Value, context: &str) -> Result<LoginResponse> {
        if let Ok(envelope) = serde_json::from_value::<ApiResponse<Value>>(body.clone()) {
            envelope.ensure_success(context)?;
        }
        let parsed = serde_json::from_value::<MaybeEnveloped<LoginResponse>>(body)
            .map_err(|e| DayOnError::Data(format!("{context}: {e}")))
            .and_then(|payload| payload.into_data(context));

        match parsed {
            Ok(login) if !login.access_token.is_empty() => Ok(login),
            Ok(_) | Err(DayOnError::Data(_)) => {
                let access_token = self.credentials.access_token()?.ok_or_else(|| {
                    DayOnError::Auth(format!("{context}: no access token returned"))
                })?;
                debug!("Login tokens taken from credential cookies");
                Ok(LoginResponse { access_token, refresh_token: None, account: None })
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl AuthApi for AuthService {
    #[instrument(skip(self, code), fields(provider = %provider))]
    async fn login(&self, provider: Provider, code: &str) -> Result<LoginResponse> {
        let context = format!("{} login", provider.display_name());
        let body: Value = self.gateway.post(login_path(provider), &LoginRequest { code }).await?;
        self.login_response(body, &context)
    }

    #[instrument(skip(self))]
    async fn fetch_account(&self) -> Result<Account> {
        let payload: MaybeEnveloped<Account> = self.gateway.get(ACCOUNT_INFO_PATH).await?;
        payload.into_data("account info")
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        let body: Value = self.gateway.post(LOGOUT_PATH, &json!({})).await?;
        if let Ok(envelope) = serde_json::from_value::<ApiResponse<Value>>(body) {
            envelope.ensure_success("logout")?;
        }
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<LoginResponse> {
        self.refresher.refresh(refresh_token).await
    }
}
