//! Domain types and models
//!
//! Wire shapes follow the backend: the envelope and auth payloads are
//! camelCase, calendar payloads are snake_case.

pub mod account;
pub mod calendar;
pub mod envelope;
pub mod route;
pub mod session;

pub use account::{Account, LoginResponse, Provider, TokenPair};
pub use calendar::{
    CalendarConnection, CalendarDay, CalendarProvider, CalendarResponse, OAuthUrl, Schedule,
    ScheduleStatus,
};
pub use envelope::{ApiResponse, MaybeEnveloped};
pub use route::Route;
pub use session::Session;
