//! Social login entry points
//!
//! Where to send the user to start an OAuth login. The provider redirects
//! back to `/auth/callback` (Google) or to the backend (Kakao), which then
//! sets the credential cookies.

use dayon_domain::constants::{GOOGLE_AUTHORIZE_URL, GOOGLE_SCOPE, KAKAO_AUTHORIZATION_PATH};
use dayon_domain::{Config, DayOnError, Provider, Result, Route};
use url::Url;

/// Google consent screen URL.
///
/// # Errors
///
/// Returns `Config` if the authorize URL or auth base URL is malformed.
pub fn google_login_url(config: &Config) -> Result<Url> {
    let redirect_uri = match &config.oauth.google_redirect_uri {
        Some(uri) => uri.clone(),
        None => format!(
            "{}{}",
            config.api.auth_base_url.trim_end_matches('/'),
            Route::AuthCallback.path()
        ),
    };

    let mut url = Url::parse(GOOGLE_AUTHORIZE_URL)
        .map_err(|e| DayOnError::Config(format!("Invalid Google authorize URL: {e}")))?;
    url.query_pairs_mut()
        .append_pair("client_id", &config.oauth.google_client_id)
        .append_pair("redirect_uri", &redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", GOOGLE_SCOPE)
        .append_pair("state", Provider::Google.as_str())
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent");
    Ok(url)
}

/// Backend-hosted Kakao authorization entry point.
///
/// # Errors
///
/// Returns `Config` if the API base URL is malformed.
pub fn kakao_login_url(config: &Config) -> Result<Url> {
    let raw = format!("{}{}", config.api.base_url.trim_end_matches('/'), KAKAO_AUTHORIZATION_PATH);
    Url::parse(&raw).map_err(|e| DayOnError::Config(format!("Invalid API base URL: {e}")))
}

pub fn login_url(provider: Provider, config: &Config) -> Result<Url> {
    match provider {
        Provider::Google => google_login_url(config),
        Provider::Kakao => kakao_login_url(config),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn google_url_carries_consent_parameters() {
        let mut config = Config::default();
        config.oauth.google_client_id = "client-123".to_string();

        let url = google_login_url(&config).unwrap();
        let params = query(&url);

        assert!(url.as_str().starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["redirect_uri"], "http://localhost:8080/auth/callback");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["scope"], "openid email profile");
        assert_eq!(params["state"], "google");
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["prompt"], "consent");
    }

    #[test]
    fn google_url_prefers_configured_redirect() {
        let mut config = Config::default();
        config.oauth.google_redirect_uri = Some("https://dayon.app/auth/callback".to_string());

        let params = query(&google_login_url(&config).unwrap());
        assert_eq!(params["redirect_uri"], "https://dayon.app/auth/callback");
    }

    #[test]
    fn kakao_url_is_on_the_api_host() {
        let url = login_url(Provider::Kakao, &Config::default()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/oauth2/authorization/kakao");
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();

        assert!(matches!(kakao_login_url(&config), Err(DayOnError::Config(_))));
    }
}
