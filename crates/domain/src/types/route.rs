//! Client-side routes

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    /// Landing page after social login
    AuthCallback,
    Dashboard,
    /// Calendar view
    Home,
    /// Landing page after connecting an external calendar
    CalendarCallback,
}

impl Route {
    pub const ALL: [Route; 5] =
        [Self::Login, Self::AuthCallback, Self::Dashboard, Self::Home, Self::CalendarCallback];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::AuthCallback => "/auth/callback",
            Self::Dashboard => "/dashboard",
            Self::Home => "/",
            Self::CalendarCallback => "/calendar/callback",
        }
    }

    /// Protected routes only render for an authenticated session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Home)
    }

    /// Match a path, ignoring any query string and trailing slash.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
