//! Client session state

use serde::Serialize;

use crate::types::account::{Account, TokenPair};

/// Snapshot of the signed-in state.
///
/// Fields are private so `is_authenticated` can never be true without an
/// account; transitions go through the methods below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    is_authenticated: bool,
    is_loading: bool,
    account: Option<Account>,
    #[serde(skip)]
    access_token: Option<String>,
    #[serde(skip)]
    refresh_token: Option<String>,
    error: Option<String>,
}

impl Session {
    /// True only while an account is held.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// An auth operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Signed-in account.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Current access token.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Current refresh token.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Message from the last failed operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Both tokens, when the session holds a complete pair.
    pub fn tokens(&self) -> Option<TokenPair> {
        match (&self.access_token, &self.refresh_token) {
            (Some(access), Some(refresh)) => Some(TokenPair::new(access.clone(), refresh.clone())),
            _ => None,
        }
    }

    /// An operation started; clears any previous error.
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn authenticate(&mut self, account: Account, tokens: TokenPair) {
        self.is_authenticated = true;
        self.is_loading = false;
        self.account = Some(account);
        self.access_token = Some(tokens.access_token);
        self.refresh_token = Some(tokens.refresh_token);
        self.error = None;
    }

    pub fn update_tokens(&mut self, tokens: TokenPair) {
        self.access_token = Some(tokens.access_token);
        self.refresh_token = Some(tokens.refresh_token);
        self.is_loading = false;
    }

    /// Back to the logged-out default, optionally remembering why.
    pub fn sign_out(&mut self, error: Option<String>) {
        *self = Self { error, ..Self::default() };
    }

    /// An operation failed without touching the signed-in state.
    pub fn fail(&mut self, error: String) {
        self.is_loading = false;
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account { id: Some(1), nick_name: "하루".to_string(), age: None }
    }

    #[test]
    fn starts_logged_out() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        assert!(session.account().is_none());
        assert!(session.tokens().is_none());
    }

    #[test]
    fn authenticate_sets_account_and_tokens() {
        let mut session = Session::default();
        session.begin_loading();
        session.authenticate(account(), TokenPair::new("a", "r"));

        assert!(session.is_authenticated());
        assert!(!session.is_loading());
        assert_eq!(session.account(), Some(&account()));
        assert_eq!(session.tokens(), Some(TokenPair::new("a", "r")));
    }

    #[test]
    fn sign_out_resets_everything_but_the_error() {
        let mut session = Session::default();
        session.authenticate(account(), TokenPair::new("a", "r"));
        session.begin_loading();
        session.sign_out(Some("refresh rejected".to_string()));

        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        assert!(session.account().is_none());
        assert!(session.access_token().is_none());
        assert_eq!(session.error(), Some("refresh rejected"));
    }

    #[test]
    fn serialized_snapshot_omits_tokens() {
        let mut session = Session::default();
        session.authenticate(account(), TokenPair::new("secret-a", "secret-r"));

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"isAuthenticated\":true"));
        assert!(!json.contains("secret"));
    }
}
