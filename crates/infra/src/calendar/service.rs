//! Calendar endpoints over the API gateway

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use dayon_core::CalendarApi;
use dayon_domain::constants::{CALENDAR_OAUTH_URL_PATH, CALENDAR_PATH};
use dayon_domain::{
    format_date_for_api, ApiResponse, CalendarDay, CalendarProvider, CalendarResponse,
    DayOnError, OAuthUrl, Result,
};
use tracing::{debug, instrument};

use crate::api::ApiGateway;

/// [`CalendarApi`] over HTTP.
pub struct CalendarService {
    gateway: Arc<ApiGateway>,
}

impl CalendarService {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CalendarApi for CalendarService {
    #[instrument(skip(self), fields(date = %date))]
    async fn get_calendar_by_date(&self, date: NaiveDate) -> Result<CalendarDay> {
        let path = format!("{CALENDAR_PATH}/{}", format_date_for_api(date));
        let envelope: ApiResponse<CalendarResponse> = self.gateway.get(&path).await?;
        let response = envelope.into_data("calendar")?;
        debug!(
            connected = response.is_connected,
            schedules = response.schedules.len(),
            "Calendar fetched"
        );
        Ok(CalendarDay::from(response))
    }

    #[instrument(skip(self), fields(provider = %provider))]
    async fn get_oauth_url(&self, provider: CalendarProvider) -> Result<OAuthUrl> {
        // The URL arrives as the bare `data` string of the envelope.
        let envelope: ApiResponse<String> = self
            .gateway
            .get_with_query(CALENDAR_OAUTH_URL_PATH, &[("provider", provider.as_str())])
            .await?;
        let url = envelope.into_data("calendar oauth url")?;
        if url.trim().is_empty() {
            return Err(DayOnError::Data("calendar oauth url: empty url".into()));
        }
        Ok(OAuthUrl { url })
    }
}
