#![allow(dead_code)]

use std::sync::Arc;

use dayon_core::{CredentialStore, RecordingNavigator, SessionStore, TokenRefresher};
use dayon_domain::{ApiConfig, Config};
use dayon_infra::{
    ApiGateway, AuthService, CalendarService, GatewayConfig, MemoryCredentialStore, RefreshClient,
};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Every infra adapter wired against one mock backend.
///
/// The API and auth base URLs both point at the mock server, with the API
/// under `/api` as in the default deployment.
pub struct Backend {
    pub server: MockServer,
    pub config: Config,
    pub credentials: Arc<MemoryCredentialStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub gateway: Arc<ApiGateway>,
    pub auth: Arc<AuthService>,
    pub calendar: Arc<CalendarService>,
}

impl Backend {
    pub async fn start() -> Self {
        Self::start_with_attempts(1).await
    }

    /// Backend whose HTTP clients make up to `max_attempts` transport attempts.
    pub async fn start_with_attempts(max_attempts: usize) -> Self {
        let server = MockServer::start().await;
        let config = Config {
            api: ApiConfig {
                base_url: format!("{}/api", server.uri()),
                auth_base_url: server.uri(),
                max_attempts,
                ..ApiConfig::default()
            },
            ..Config::default()
        };

        let credentials = Arc::new(MemoryCredentialStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let refresher: Arc<dyn TokenRefresher> = Arc::new(
            RefreshClient::new(&config.api, credentials.clone()).expect("refresh client"),
        );
        let gateway = Arc::new(
            ApiGateway::new(
                GatewayConfig::from(&config.api),
                credentials.clone(),
                refresher.clone(),
                navigator.clone(),
            )
            .expect("gateway"),
        );
        let auth =
            Arc::new(AuthService::new(gateway.clone(), refresher, credentials.clone()));
        let calendar = Arc::new(CalendarService::new(gateway.clone()));

        Self { server, config, credentials, navigator, gateway, auth, calendar }
    }

    pub fn sign_in_as(&self, access: &str, refresh: &str) {
        self.credentials.set_access_token(access).expect("store access token");
        self.credentials.set_refresh_token(refresh).expect("store refresh token");
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::new(self.auth.clone(), self.credentials.clone(), self.navigator.clone())
    }
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data, "timestamp": "2026-10-16T09:00:00" })
}

pub fn expired_signature() -> Value {
    json!({ "success": false, "message": "JWT signature expired", "errorCode": "APGW0004" })
}

pub fn account_json() -> Value {
    json!({ "id": 7, "nickName": "하루", "age": 29 })
}
