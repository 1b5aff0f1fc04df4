//! Application commands
//!
//! Each command drives the core objects held by [`crate::AppContext`] and
//! returns a serializable view of the result.

pub mod auth;
pub mod calendar;

pub use auth::{auth_callback, login, login_url, logout, refresh, whoami, SessionSummary};
pub use calendar::{
    calendar_callback, connect_calendar, show_calendar, CalendarCallbackView, DayView,
};
