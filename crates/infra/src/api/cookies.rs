//! Credential cookies carried on backend responses
//!
//! The backend issues and rotates the token pair through `Set-Cookie`. An
//! empty value or an already-expired cookie deletes the token, as a browser
//! would.

use std::time::SystemTime;

use dayon_core::CredentialStore;
use dayon_domain::constants::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use dayon_domain::Result;
use reqwest::Response;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CredentialCookie {
    Access,
    Refresh,
}

impl CredentialCookie {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            ACCESS_TOKEN_COOKIE => Some(Self::Access),
            REFRESH_TOKEN_COOKIE => Some(Self::Refresh),
            _ => None,
        }
    }
}

/// Copy any credential cookies set by `response` into `credentials`.
///
/// Returns the number of credential cookies applied. Storage failures are
/// logged, not propagated: a response is still usable without them.
pub fn absorb_credential_cookies(response: &Response, credentials: &dyn CredentialStore) -> usize {
    let now = SystemTime::now();
    let mut applied = 0;

    for cookie in response.cookies() {
        let Some(kind) = CredentialCookie::from_name(cookie.name()) else {
            continue;
        };
        let expired = cookie.value().is_empty()
            || cookie.max_age().is_some_and(|age| age.is_zero())
            || cookie.expires().is_some_and(|at| at <= now);

        if let Err(err) = apply(credentials, kind, cookie.value(), expired) {
            warn!(cookie = cookie.name(), error = %err, "Failed to store credential cookie");
            continue;
        }
        debug!(cookie = cookie.name(), cleared = expired, "Credential cookie applied");
        applied += 1;
    }

    applied
}

fn apply(
    credentials: &dyn CredentialStore,
    kind: CredentialCookie,
    value: &str,
    expired: bool,
) -> Result<()> {
    match (kind, expired) {
        (CredentialCookie::Access, false) => credentials.set_access_token(value),
        (CredentialCookie::Access, true) => credentials.clear_access_token(),
        (CredentialCookie::Refresh, false) => credentials.set_refresh_token(value),
        (CredentialCookie::Refresh, true) => credentials.clear_refresh_token(),
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::credentials::MemoryCredentialStore;

    async fn response_with_cookies(cookies: &[&str]) -> (MockServer, Response) {
        let server = MockServer::start().await;
        let template = cookies
            .iter()
            .fold(ResponseTemplate::new(200), |t, cookie| t.append_header("Set-Cookie", *cookie));
        Mock::given(method("GET")).respond_with(template).mount(&server).await;

        let response = reqwest::get(server.uri()).await.unwrap();
        (server, response)
    }

    #[tokio::test]
    async fn stores_both_credential_cookies() {
        let (_server, response) = response_with_cookies(&[
            "dayOnAccessToken=access-1; Path=/; HttpOnly",
            "dayOnRefreshToken=refresh-1; Path=/; HttpOnly",
            "JSESSIONID=ignored; Path=/",
        ])
        .await;
        let store = MemoryCredentialStore::new();

        assert_eq!(absorb_credential_cookies(&response, &store), 2);
        assert_eq!(store.access_token().unwrap().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().unwrap().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn expired_cookie_clears_the_token() {
        let (_server, response) = response_with_cookies(&[
            "dayOnAccessToken=; Path=/; Expires=Thu, 01 Jan 1970 00:00:01 GMT",
            "dayOnRefreshToken=stale; Path=/; Max-Age=0",
        ])
        .await;
        let store = MemoryCredentialStore::new();
        store.set_access_token("old-access").unwrap();
        store.set_refresh_token("old-refresh").unwrap();

        absorb_credential_cookies(&response, &store);

        assert_eq!(store.access_token().unwrap(), None);
        assert_eq!(store.refresh_token().unwrap(), None);
    }
}
