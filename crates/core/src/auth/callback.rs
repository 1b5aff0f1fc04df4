//! Landing step after social login

use std::sync::Arc;

use dayon_domain::Route;
use tracing::{error, info};

use super::session::SessionStore;
use crate::navigation::Navigator;

/// Handles `/auth/callback`: the backend has set the credential cookies and
/// redirected here.
pub struct AuthCallback {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthCallback {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Hydrate from the cookies and forward to the dashboard, or back to the
    /// login page when the cookies are missing or rejected.
    pub async fn handle(&self) -> Route {
        let route = match self.session.stored_tokens() {
            Some(tokens) => match self.session.hydrate_from_cookies(tokens).await {
                Ok(account) => {
                    info!(nick_name = %account.nick_name, "Login callback complete");
                    Route::Dashboard
                }
                Err(err) => {
                    error!(error = %err, "Login callback failed");
                    Route::Login
                }
            },
            None => {
                error!("Credential cookies missing after login");
                Route::Login
            }
        };

        self.navigator.navigate(route);
        route
    }
}
