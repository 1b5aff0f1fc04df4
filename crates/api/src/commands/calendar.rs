//! Calendar commands

use std::fmt::Write as _;
use std::time::Instant;

use dayon_core::{
    handle_calendar_callback, CalendarConnectOutcome, GuardOutcome, SlotEntryKind, TimeSlot,
};
use dayon_domain::{CalendarProvider, DayOnError, Result, Route};
use serde::Serialize;
use tracing::debug;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// One rendered day of the calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: String,
    pub label: String,
    pub is_today: bool,
    pub is_connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_type: Option<CalendarProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub slots: Vec<TimeSlot>,
}

impl DayView {
    fn capture(ctx: &AppContext) -> Self {
        let state = ctx.calendar.state();
        Self {
            date: ctx.calendar.api_date(),
            label: ctx.calendar.label(),
            is_today: ctx.calendar.is_today(),
            is_connected: state.connection.is_connected,
            connect_type: state.connection.connect_type,
            error: state.error,
            slots: ctx.calendar.timeline(),
        }
    }

    /// Plain-text timeline for the terminal.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let today = if self.is_today { " · 오늘" } else { "" };
        let _ = writeln!(out, "{}{today}", self.label);
        match self.connect_type {
            Some(provider) if self.is_connected => {
                let _ = writeln!(out, "{} 캘린더 연동됨", provider.display_name());
            }
            _ => {
                let _ = writeln!(out, "연동된 캘린더 없음");
            }
        }
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }

        for slot in &self.slots {
            if let Some(free) = slot.free_label() {
                let _ = writeln!(out, "{}  {free}", slot.label());
                continue;
            }
            for (index, entry) in slot.entries.iter().enumerate() {
                let hour = if index == 0 { slot.label() } else { " ".repeat(5) };
                let marker = match entry.kind {
                    SlotEntryKind::Start => format!(
                        "{} ({}-{})",
                        entry.schedule.title, entry.schedule.start_time, entry.schedule.end_time
                    ),
                    SlotEntryKind::Continues => format!("│ {}", entry.schedule.title),
                    SlotEntryKind::Ends => {
                        format!("└ {} ~{}", entry.schedule.title, entry.schedule.end_time)
                    }
                };
                let _ = writeln!(out, "{hour}  {marker}");
            }
        }
        out
    }
}

/// Protected calendar view for `date` (`YYYY-MM-DD`, default today).
///
/// A failed fetch is not an error here: the view shows its empty default
/// and the message.
///
/// # Errors
///
/// `Auth` when the guard redirects to login; `InvalidInput` for a bad date.
pub async fn show_calendar(ctx: &AppContext, date: Option<&str>) -> Result<DayView> {
    let start = Instant::now();
    let result = show_calendar_inner(ctx, date).await;
    log_command_execution("calendar::show", start.elapsed(), result.as_ref().map(|_| ()));
    result
}

async fn show_calendar_inner(ctx: &AppContext, date: Option<&str>) -> Result<DayView> {
    if let GuardOutcome::Redirect(route) = ctx.guard.check(Route::Home).await {
        return Err(DayOnError::Auth(format!("not signed in (redirected to {route})")));
    }
    if let Some(date) = date {
        ctx.calendar.select_date_input(date)?;
    }
    // The failure is kept in the view state and rendered with the empty day.
    if let Err(err) = ctx.calendar.load().await {
        debug!(error = %err, "Showing calendar without schedules");
    }
    Ok(DayView::capture(ctx))
}

/// URL that starts connecting an external calendar.
pub async fn connect_calendar(ctx: &AppContext, provider: CalendarProvider) -> Result<String> {
    let start = Instant::now();
    let result = ctx.calendar.connect_calendar(provider).await.map(|oauth| oauth.url);
    log_command_execution("calendar::connect", start.elapsed(), result.as_ref().map(|_| ()));
    result
}

/// Notice shown after returning from the calendar connection flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCallbackView {
    pub connected: bool,
    pub message: &'static str,
    pub redirect: &'static str,
}

/// `/calendar/callback?connected=...`
pub fn calendar_callback(ctx: &AppContext, connected: Option<&str>) -> CalendarCallbackView {
    let outcome = handle_calendar_callback(connected, ctx.navigator.as_ref());
    CalendarCallbackView {
        connected: outcome == CalendarConnectOutcome::Connected,
        message: outcome.message(),
        redirect: Route::Home.path(),
    }
}
