//! Calendar view model
//!
//! Holds the selected day, its active schedules and the connection state.
//! Loads are not cancelled when the date changes again; whichever load
//! completes last decides what is shown.

use std::sync::Arc;

use chrono::NaiveDate;
use dayon_domain::{
    format_date_for_api, format_date_label, parse_date_input, CalendarConnection, CalendarProvider,
    OAuthUrl, Result, Schedule,
};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::ports::CalendarApi;
use super::timeline::{build_timeline, TimeSlot};

/// What the calendar page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarViewState {
    /// Day being shown
    pub selected_date: NaiveDate,
    /// Active schedules only
    pub schedules: Vec<Schedule>,
    /// External calendar link status from the last load
    pub connection: CalendarConnection,
    pub is_loading: bool,
    /// Message from the last failed load
    pub error: Option<String>,
}

impl CalendarViewState {
    fn new(selected_date: NaiveDate) -> Self {
        Self {
            selected_date,
            schedules: Vec::new(),
            connection: CalendarConnection::default(),
            is_loading: false,
            error: None,
        }
    }
}

/// Calendar page state for one selected day.
///
/// The last load to finish wins; earlier loads are not cancelled.
pub struct CalendarView {
    api: Arc<dyn CalendarApi>,
    today: NaiveDate,
    state: RwLock<CalendarViewState>,
}

impl CalendarView {
    /// New view showing `today`.
    pub fn new(api: Arc<dyn CalendarApi>, today: NaiveDate) -> Self {
        Self { api, today, state: RwLock::new(CalendarViewState::new(today)) }
    }

    /// Copy of the current state.
    pub fn state(&self) -> CalendarViewState {
        self.state.read().clone()
    }

    /// Day being shown.
    pub fn selected_date(&self) -> NaiveDate {
        self.state.read().selected_date
    }

    /// Change the day without loading it.
    pub fn select_date(&self, date: NaiveDate) {
        self.state.write().selected_date = date;
    }

    /// Path segment for the calendar endpoint.
    pub fn api_date(&self) -> String {
        format_date_for_api(self.selected_date())
    }

    /// Value for the date picker; same shape as [`Self::api_date`].
    pub fn date_input_value(&self) -> String {
        self.api_date()
    }

    /// Apply a date picker value (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` and leaves the selection untouched when the
    /// value is not a real date.
    pub fn select_date_input(&self, value: &str) -> Result<()> {
        let date = parse_date_input(value)?;
        self.select_date(date);
        Ok(())
    }

    /// Header text, e.g. `10월 16일 (금)`.
    pub fn label(&self) -> String {
        format_date_label(self.selected_date())
    }

    /// Whether the selected day is the day the view was opened on.
    pub fn is_today(&self) -> bool {
        self.selected_date() == self.today
    }

    /// Fetch the selected day.
    ///
    /// On failure the view falls back to no schedules and a disconnected
    /// calendar, and records the error.
    pub async fn load(&self) -> Result<()> {
        let date = {
            let mut state = self.state.write();
            state.is_loading = true;
            state.error = None;
            state.selected_date
        };
        debug!(date = %date, "Loading calendar");

        match self.api.get_calendar_by_date(date).await {
            Ok(day) => {
                let schedules: Vec<_> =
                    day.schedules.into_iter().filter(Schedule::is_active).collect();
                info!(date = %date, count = schedules.len(), "Calendar loaded");

                let mut state = self.state.write();
                state.schedules = schedules;
                state.connection = day.connection;
                state.is_loading = false;
                Ok(())
            }
            Err(err) => {
                warn!(date = %date, error = %err, "Failed to load calendar");

                let mut state = self.state.write();
                state.schedules.clear();
                state.connection = CalendarConnection::default();
                state.is_loading = false;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Select a day and load it.
    pub async fn load_date(&self, date: NaiveDate) -> Result<()> {
        self.select_date(date);
        self.load().await
    }

    /// URL to open for connecting an external calendar.
    pub async fn connect_calendar(&self, provider: CalendarProvider) -> Result<OAuthUrl> {
        let url = self.api.get_oauth_url(provider).await?;
        info!(provider = %provider, "Calendar connection URL issued");
        Ok(url)
    }

    /// Hour slots for the loaded schedules.
    pub fn timeline(&self) -> Vec<TimeSlot> {
        build_timeline(&self.state.read().schedules)
    }
}
