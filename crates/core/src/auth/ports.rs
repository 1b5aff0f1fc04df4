//! Port interfaces for authentication
//!
//! These traits define the boundaries between the session logic and the
//! HTTP/keychain implementations in `dayon-infra`.

use async_trait::async_trait;
use dayon_domain::{Account, LoginResponse, Provider, Result, TokenPair};

/// Backend auth endpoints, called through the authenticated gateway.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange an OAuth authorization code for a session.
    async fn login(&self, provider: Provider, code: &str) -> Result<LoginResponse>;

    /// "Who am I" for the current access token.
    async fn fetch_account(&self) -> Result<Account>;

    /// Invalidate the session server-side.
    async fn logout(&self) -> Result<()>;

    /// Trade a refresh token for new credentials.
    async fn refresh(&self, refresh_token: &str) -> Result<LoginResponse>;
}

/// Unauthenticated refresh call used by the gateway's expired-token recovery.
///
/// Kept separate from [`AuthApi`] so the gateway never refreshes through
/// itself.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<LoginResponse>;
}

/// Where the credential cookie pair lives between requests.
///
/// Mirrors browser cookie semantics: each token can be present or absent
/// independently, and an empty value counts as absent.
pub trait CredentialStore: Send + Sync {
    fn access_token(&self) -> Result<Option<String>>;

    fn refresh_token(&self) -> Result<Option<String>>;

    fn set_access_token(&self, token: &str) -> Result<()>;

    fn set_refresh_token(&self, token: &str) -> Result<()>;

    fn clear_access_token(&self) -> Result<()>;

    fn clear_refresh_token(&self) -> Result<()>;

    /// Both tokens, only when both are present.
    fn tokens(&self) -> Result<Option<TokenPair>> {
        match (self.access_token()?, self.refresh_token()?) {
            (Some(access), Some(refresh)) => Ok(Some(TokenPair::new(access, refresh))),
            _ => Ok(None),
        }
    }

    fn store(&self, tokens: &TokenPair) -> Result<()> {
        self.set_access_token(&tokens.access_token)?;
        self.set_refresh_token(&tokens.refresh_token)
    }

    fn clear(&self) -> Result<()> {
        self.clear_access_token()?;
        self.clear_refresh_token()
    }
}
