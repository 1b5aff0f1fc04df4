//! Landing step after connecting an external calendar

use dayon_domain::Route;
use tracing::{info, warn};

use crate::navigation::Navigator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarConnectOutcome {
    Connected,
    Failed,
}

impl CalendarConnectOutcome {
    /// Notice shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Connected => "캘린더 연동이 완료되었습니다!",
            Self::Failed => "캘린더 연동에 실패했습니다. 다시 시도해주세요.",
        }
    }
}

/// Interpret the `connected` query parameter of `/calendar/callback` and send
/// the user back to the calendar. Only the exact value `true` counts as
/// success.
pub fn handle_calendar_callback(
    connected: Option<&str>,
    navigator: &dyn Navigator,
) -> CalendarConnectOutcome {
    let outcome = if connected == Some("true") {
        info!("External calendar connected");
        CalendarConnectOutcome::Connected
    } else {
        warn!(connected = ?connected, "External calendar connection failed");
        CalendarConnectOutcome::Failed
    };

    navigator.navigate(Route::Home);
    outcome
}
