use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dayon_core::{AuthApi, CredentialStore, RecordingNavigator, SessionStore};
use dayon_domain::{Account, DayOnError, LoginResponse, Provider, Result, TokenPair};
use parking_lot::Mutex;

pub fn account(nick_name: &str) -> Account {
    Account { id: Some(1), nick_name: nick_name.to_string(), age: None }
}

/// Scripted `AuthApi`: each endpoint returns the configured result and
/// counts its calls.
pub struct MockAuthApi {
    pub account: Mutex<Result<Account>>,
    pub login: Mutex<Result<LoginResponse>>,
    pub logout: Mutex<Result<()>>,
    pub refresh: Mutex<Result<LoginResponse>>,
    pub fetch_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub refresh_tokens_seen: Mutex<Vec<String>>,
}

impl Default for MockAuthApi {
    fn default() -> Self {
        Self {
            account: Mutex::new(Ok(account("하루"))),
            login: Mutex::new(Err(DayOnError::Network("login not scripted".into()))),
            logout: Mutex::new(Ok(())),
            refresh: Mutex::new(Err(DayOnError::Network("refresh not scripted".into()))),
            fetch_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            refresh_tokens_seen: Mutex::new(Vec::new()),
        }
    }
}

impl MockAuthApi {
    pub fn with_account(self, result: Result<Account>) -> Self {
        *self.account.lock() = result;
        self
    }

    pub fn with_login(self, result: Result<LoginResponse>) -> Self {
        *self.login.lock() = result;
        self
    }

    pub fn with_logout(self, result: Result<()>) -> Self {
        *self.logout.lock() = result;
        self
    }

    pub fn with_refresh(self, result: Result<LoginResponse>) -> Self {
        *self.refresh.lock() = result;
        self
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _provider: Provider, _code: &str) -> Result<LoginResponse> {
        self.login.lock().clone()
    }

    async fn fetch_account(&self) -> Result<Account> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.account.lock().clone()
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout.lock().clone()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<LoginResponse> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_tokens_seen.lock().push(refresh_token.to_string());
        self.refresh.lock().clone()
    }
}

/// Cookie jar stand-in.
#[derive(Default)]
pub struct InMemoryCredentials {
    values: Mutex<HashMap<&'static str, String>>,
}

impl InMemoryCredentials {
    pub fn with_tokens(tokens: &TokenPair) -> Self {
        let store = Self::default();
        store.store(tokens).expect("store tokens");
        store
    }
}

impl CredentialStore for InMemoryCredentials {
    fn access_token(&self) -> Result<Option<String>> {
        Ok(self.values.lock().get("access").cloned())
    }

    fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.values.lock().get("refresh").cloned())
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.values.lock().insert("access", token.to_string());
        Ok(())
    }

    fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.values.lock().insert("refresh", token.to_string());
        Ok(())
    }

    fn clear_access_token(&self) -> Result<()> {
        self.values.lock().remove("access");
        Ok(())
    }

    fn clear_refresh_token(&self) -> Result<()> {
        self.values.lock().remove("refresh");
        Ok(())
    }
}

/// A session store wired to mocks, with handles to each collaborator.
pub struct Harness {
    pub auth: Arc<MockAuthApi>,
    pub credentials: Arc<InMemoryCredentials>,
    pub navigator: Arc<RecordingNavigator>,
    pub session: Arc<SessionStore>,
}

impl Harness {
    pub fn new(auth: MockAuthApi, credentials: InMemoryCredentials) -> Self {
        let auth = Arc::new(auth);
        let credentials = Arc::new(credentials);
        let navigator = Arc::new(RecordingNavigator::new());
        let session =
            Arc::new(SessionStore::new(auth.clone(), credentials.clone(), navigator.clone()));
        Self { auth, credentials, navigator, session }
    }
}
