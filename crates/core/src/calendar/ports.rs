//! Port interfaces for calendar data

use async_trait::async_trait;
use chrono::NaiveDate;
use dayon_domain::{CalendarDay, CalendarProvider, OAuthUrl, Result};

/// Calendar endpoints of the backend.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Schedules and connection state for one local calendar day.
    async fn get_calendar_by_date(&self, date: NaiveDate) -> Result<CalendarDay>;

    /// URL that starts the external calendar connection flow.
    async fn get_oauth_url(&self, provider: CalendarProvider) -> Result<OAuthUrl>;
}
