//! Application context - dependency injection container
//!
//! Wires the infra adapters into the core session, guard and calendar view.
//! The CLI builds one context per invocation.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use dayon_core::{
    AuthCallback, CalendarView, CredentialStore, RecordingNavigator, RouteGuard, SessionStore,
    TokenRefresher,
};
use dayon_domain::{Config, Result};
use dayon_infra::{
    build_credential_store, ApiGateway, AuthService, CalendarService, GatewayConfig,
    RefreshClient,
};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub credentials: Arc<dyn CredentialStore>,
    /// Records every redirect; the CLI reports the last one.
    pub navigator: Arc<RecordingNavigator>,
    pub gateway: Arc<ApiGateway>,
    pub session: Arc<SessionStore>,
    pub guard: RouteGuard,
    pub auth_callback: AuthCallback,
    pub calendar: CalendarView,
}

impl AppContext {
    /// Build the context with the credential store selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if an HTTP client cannot be built, or the credential
    /// store's error if it cannot be opened.
    pub fn new(config: Config) -> Result<Self> {
        let credentials = build_credential_store(&config.credentials)?;
        Self::with_credentials(config, credentials, Local::now().date_naive())
    }

    /// Build the context around an existing credential store, with `today`
    /// as the calendar's starting day.
    ///
    /// # Errors
    ///
    /// Returns `Config` if an HTTP client cannot be built.
    pub fn with_credentials(
        config: Config,
        credentials: Arc<dyn CredentialStore>,
        today: NaiveDate,
    ) -> Result<Self> {
        let navigator = Arc::new(RecordingNavigator::new());
        let refresher: Arc<dyn TokenRefresher> =
            Arc::new(RefreshClient::new(&config.api, credentials.clone())?);
        let gateway = Arc::new(ApiGateway::new(
            GatewayConfig::from(&config.api),
            credentials.clone(),
            refresher.clone(),
            navigator.clone(),
        )?);

        let auth = Arc::new(AuthService::new(gateway.clone(), refresher, credentials.clone()));
        let session =
            Arc::new(SessionStore::new(auth, credentials.clone(), navigator.clone()));
        let guard = RouteGuard::new(session.clone(), navigator.clone());
        let auth_callback = AuthCallback::new(session.clone(), navigator.clone());
        let calendar = CalendarView::new(Arc::new(CalendarService::new(gateway.clone())), today);

        info!(api = %config.api.base_url, backend = ?config.credentials.backend, "App context ready");

        Ok(Self {
            config,
            credentials,
            navigator,
            gateway,
            session,
            guard,
            auth_callback,
            calendar,
        })
    }
}
