#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use dayon_domain::{ApiConfig, Config};
use dayon_infra::MemoryCredentialStore;
use dayon_lib::AppContext;
use serde_json::{json, Value};
use wiremock::MockServer;

/// App context wired to a mock backend with an in-memory credential store.
pub struct TestContext {
    pub server: MockServer,
    pub credentials: Arc<MemoryCredentialStore>,
    pub ctx: AppContext,
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

/// Create a new test context against a fresh mock server.
pub async fn setup_test_context() -> TestContext {
    let server = MockServer::start().await;
    let mut config = Config {
        api: ApiConfig {
            base_url: format!("{}/api", server.uri()),
            auth_base_url: server.uri(),
            max_attempts: 1,
            ..ApiConfig::default()
        },
        ..Config::default()
    };
    config.oauth.google_client_id = "test-client".to_string();

    let credentials = Arc::new(MemoryCredentialStore::new());
    let ctx = AppContext::with_credentials(config, credentials.clone(), today())
        .expect("failed to build app context");

    TestContext { server, credentials, ctx }
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn account_json() -> Value {
    json!({ "id": 7, "nickName": "하루", "age": 29 })
}
