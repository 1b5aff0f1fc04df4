//! Session store
//!
//! Single owner of the signed-in state. The state sits in a
//! [`tokio::sync::watch`] channel so views can subscribe to changes; every
//! mutation goes through one of the operations below.

use std::sync::Arc;

use dayon_domain::{
    Account, DayOnError, LoginResponse, Provider, Result, Route, Session, TokenPair,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::ports::{AuthApi, CredentialStore};
use crate::navigation::Navigator;

/// Observable, injected session state plus the operations that change it.
///
/// Overlapping operations are not coordinated; whichever finishes last
/// determines the final state.
pub struct SessionStore {
    state: watch::Sender<Session>,
    auth: Arc<dyn AuthApi>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl SessionStore {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self { state, auth, credentials, navigator }
    }

    /// Current state.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver that observes every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Credential pair currently persisted, if both halves exist.
    pub fn stored_tokens(&self) -> Option<TokenPair> {
        match self.credentials.tokens() {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(error = %err, "Failed to read stored credentials");
                None
            }
        }
    }

    /// Adopt a token pair found in the credential cookies and load the
    /// account it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`DayOnError::Auth`] when the account cannot be loaded; the
    /// session and the stored credentials are cleared first.
    pub async fn hydrate_from_cookies(&self, tokens: TokenPair) -> Result<Account> {
        self.state.send_modify(Session::begin_loading);

        if let Err(err) = self.credentials.store(&tokens) {
            return Err(self.fail_auth("Failed to store credentials", &err));
        }

        match self.auth.fetch_account().await {
            Ok(account) => {
                // The account call may have refreshed the pair on the way.
                let current = self.stored_tokens().unwrap_or(tokens);
                info!(nick_name = %account.nick_name, "Session hydrated from cookies");
                self.state.send_modify(|session| session.authenticate(account.clone(), current));
                Ok(account)
            }
            Err(err) => Err(self.fail_auth("Failed to load account", &err)),
        }
    }

    /// Exchange an OAuth authorization code and start a session.
    ///
    /// # Errors
    ///
    /// Returns [`DayOnError::Auth`]; the session keeps its previous state
    /// with `error` set to the backend message or a provider-specific
    /// fallback.
    pub async fn login(&self, provider: Provider, code: &str) -> Result<Account> {
        self.state.send_modify(Session::begin_loading);

        let outcome = match self.auth.login(provider, code).await {
            Ok(response) => self.complete_login(response).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok((account, tokens)) => {
                info!(provider = %provider, nick_name = %account.nick_name, "Login succeeded");
                self.state.send_modify(|session| session.authenticate(account.clone(), tokens));
                Ok(account)
            }
            Err(err) => {
                let message = backend_message(&err)
                    .unwrap_or_else(|| format!("{} login failed", provider.display_name()));
                warn!(provider = %provider, error = %err, "Login failed");
                self.state.send_modify(|session| session.fail(message.clone()));
                Err(DayOnError::Auth(message))
            }
        }
    }

    async fn complete_login(&self, response: LoginResponse) -> Result<(Account, TokenPair)> {
        // The backend may also have delivered the refresh token as a cookie.
        let stored_refresh = self.credentials.refresh_token()?;
        let tokens = response
            .token_pair(stored_refresh.as_deref())
            .ok_or_else(|| DayOnError::Auth("login response carried no refresh token".into()))?;
        self.credentials.store(&tokens)?;

        let account = match response.account {
            Some(account) => account,
            None => self.auth.fetch_account().await?,
        };
        Ok((account, tokens))
    }

    /// End the session.
    ///
    /// The logout call is best effort: its failure is logged and otherwise
    /// ignored. Credentials and state are always cleared and the user lands
    /// on the login page.
    pub async fn logout(&self) {
        self.state.send_modify(Session::begin_loading);

        if let Err(err) = self.auth.logout().await {
            warn!(error = %err, "Logout call failed; clearing local session anyway");
        }

        self.clear_credentials();
        self.state.send_modify(|session| session.sign_out(None));
        info!("Logged out");
        self.navigator.navigate(Route::Login);
    }

    /// Obtain a fresh access token using the refresh token.
    ///
    /// Uses the refresh token held in the session, falling back to the stored
    /// cookie.
    ///
    /// # Errors
    ///
    /// Returns [`DayOnError::Auth`] when no refresh token exists or the
    /// backend rejects it; the session and credentials are cleared.
    pub async fn refresh_token(&self) -> Result<TokenPair> {
        let refresh = match self.snapshot().refresh_token() {
            Some(token) => Some(token.to_string()),
            None => self.credentials.refresh_token().ok().flatten(),
        };
        let Some(refresh) = refresh else {
            let err = DayOnError::Auth("no refresh token".to_string());
            return Err(self.fail_auth("Cannot refresh", &err));
        };

        self.state.send_modify(Session::begin_loading);

        let tokens = match self.auth.refresh(&refresh).await {
            Ok(response) => response.token_pair(Some(refresh.as_str())),
            Err(err) => return Err(self.fail_auth("Token refresh failed", &err)),
        };
        let Some(tokens) = tokens else {
            let err = DayOnError::Data("refresh response carried no tokens".to_string());
            return Err(self.fail_auth("Token refresh failed", &err));
        };

        if let Err(err) = self.credentials.store(&tokens) {
            return Err(self.fail_auth("Failed to store refreshed credentials", &err));
        }
        debug!("Access token refreshed");
        self.state.send_modify(|session| session.update_tokens(tokens.clone()));
        Ok(tokens)
    }

    pub fn clear_error(&self) {
        self.state.send_modify(Session::clear_error);
    }

    /// Clear credentials and state after an auth failure, returning the
    /// error to hand back to the caller.
    fn fail_auth(&self, context: &str, err: &DayOnError) -> DayOnError {
        warn!(error = %err, "{context}");
        let message = format!("{context}: {err}");
        self.clear_credentials();
        self.state.send_modify(|session| session.sign_out(Some(message.clone())));
        DayOnError::Auth(message)
    }

    fn clear_credentials(&self) {
        if let Err(err) = self.credentials.clear() {
            warn!(error = %err, "Failed to clear stored credentials");
        }
    }
}

fn backend_message(err: &DayOnError) -> Option<String> {
    match err {
        DayOnError::Auth(message) | DayOnError::Data(message) => Some(message.clone()),
        _ => None,
    }
}
