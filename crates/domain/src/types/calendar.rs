//! Calendar and schedule types
//!
//! The calendar endpoints speak snake_case; camelCase aliases are accepted so
//! fixtures written against the typed client still deserialize.

use serde::{Deserialize, Serialize};

use crate::constants::ACTIVE_USE_FLAG;
use crate::types::account::Provider;
use crate::utils::dates::parse_clock_minutes;

/// Provider a third-party calendar is connected through.
pub type CalendarProvider = Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    /// Anything the backend adds later
    #[serde(other)]
    Unknown,
}

/// A single calendar entry for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub contents: Option<String>,
    #[serde(alias = "useYn")]
    pub use_yn: String,
    #[serde(default, alias = "tagIds")]
    pub tag_ids: Option<String>,
    pub status: ScheduleStatus,
    /// "HH:MM" or "HH:MM:SS"
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
    #[serde(default, alias = "relationTypes")]
    pub relation_types: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Schedule {
    /// Only active schedules are shown on the timeline.
    pub fn is_active(&self) -> bool {
        self.use_yn == ACTIVE_USE_FLAG
    }

    pub fn start_minutes(&self) -> Option<u32> {
        parse_clock_minutes(&self.start_time)
    }

    pub fn end_minutes(&self) -> Option<u32> {
        parse_clock_minutes(&self.end_time)
    }

    /// Provider this schedule was imported from, if any.
    pub fn relation(&self) -> Option<CalendarProvider> {
        self.relation_types.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Connection state of the user's external calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConnection {
    pub is_connected: bool,
    pub connect_type: Option<CalendarProvider>,
}

/// Wire payload of `GET /v1/calendar/{date}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResponse {
    #[serde(default, alias = "connectType")]
    pub connect_type: Option<String>,
    #[serde(default, alias = "isConnected")]
    pub is_connected: bool,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// One day of schedules plus the connection state, as the view consumes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDay {
    pub connection: CalendarConnection,
    pub schedules: Vec<Schedule>,
}

impl From<CalendarResponse> for CalendarDay {
    fn from(response: CalendarResponse) -> Self {
        let connect_type = response.connect_type.as_deref().and_then(|raw| raw.parse().ok());
        Self {
            connection: CalendarConnection { is_connected: response.is_connected, connect_type },
            schedules: response.schedules,
        }
    }
}

/// Authorization URL for connecting an external calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthUrl {
    pub url: String,
}
