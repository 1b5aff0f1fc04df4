//! # DayOn Core
//!
//! Client logic layer - no HTTP or keychain code.
//!
//! This crate contains:
//! - Port interfaces (traits) for the backend and credential storage
//! - The observable session store and the route guard
//! - The calendar view model and its hourly timeline
//!
//! ## Architecture Principles
//! - Only depends on `dayon-domain`
//! - All external effects (HTTP, cookies, redirects) go through traits
//! - Pure, testable logic

pub mod auth;
pub mod calendar;
pub mod navigation;

pub use auth::{
    AuthApi, AuthCallback, CredentialStore, GuardOutcome, RouteGuard, SessionStore, TokenRefresher,
};
pub use calendar::{
    build_timeline, handle_calendar_callback, CalendarApi, CalendarConnectOutcome, CalendarView,
    CalendarViewState, SlotEntry, SlotEntryKind, TimeSlot,
};
pub use navigation::{Navigator, RecordingNavigator};
