//! Route guard for protected views

use std::sync::Arc;

use dayon_domain::Route;
use tracing::{debug, warn};

use super::session::SessionStore;
use crate::navigation::Navigator;

/// What a protected route should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Loading,
    Redirect(Route),
}

/// Gate in front of the protected routes.
///
/// On mount it tries to restore a session from the credential cookies; it
/// never yields [`GuardOutcome::Render`] for an unauthenticated session.
pub struct RouteGuard {
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Restore the session from stored cookies if needed, then decide.
    ///
    /// A redirect outcome is also handed to the navigator.
    pub async fn on_mount(&self) -> GuardOutcome {
        let snapshot = self.session.snapshot();
        if !snapshot.is_authenticated() && !snapshot.is_loading() {
            if let Some(tokens) = self.session.stored_tokens() {
                debug!("Restoring session from stored credentials");
                if let Err(err) = self.session.hydrate_from_cookies(tokens).await {
                    warn!(error = %err, "Could not restore session");
                    return self.redirect(Route::Login);
                }
            }
        }

        match self.outcome() {
            GuardOutcome::Redirect(route) => self.redirect(route),
            outcome => outcome,
        }
    }

    /// Decision for the current session state, without side effects.
    pub fn outcome(&self) -> GuardOutcome {
        let session = self.session.snapshot();
        if session.is_loading() {
            GuardOutcome::Loading
        } else if session.is_authenticated() {
            GuardOutcome::Render
        } else {
            GuardOutcome::Redirect(Route::Login)
        }
    }

    /// Outcome for an arbitrary route; public routes always render.
    pub async fn check(&self, route: Route) -> GuardOutcome {
        if route.is_protected() {
            self.on_mount().await
        } else {
            GuardOutcome::Render
        }
    }

    fn redirect(&self, route: Route) -> GuardOutcome {
        self.navigator.navigate(route);
        GuardOutcome::Redirect(route)
    }
}
