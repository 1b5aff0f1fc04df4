//! Navigation port
//!
//! Redirects are commands handed to a [`Navigator`] instead of side effects
//! on a global location, so callers and tests can observe them.

use dayon_domain::Route;
use parking_lot::Mutex;
use tracing::debug;

/// Performs redirects to client routes.
pub trait Navigator: Send + Sync {
    /// Leave the current page for `route`.
    fn navigate(&self, route: Route);
}

/// Navigator that remembers every redirect it was asked to perform.
///
/// Used by the CLI (which reports the final route) and by tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Navigator with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every redirect so far, oldest first.
    pub fn history(&self) -> Vec<Route> {
        self.history.lock().clone()
    }

    /// Most recent redirect.
    pub fn last(&self) -> Option<Route> {
        self.history.lock().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        debug!(route = %route, "navigate");
        self.history.lock().push(route);
    }
}
