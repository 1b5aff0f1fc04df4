use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dayon_core::CalendarApi;
use dayon_domain::{
    CalendarConnection, CalendarDay, CalendarProvider, DayOnError, OAuthUrl, Result, Schedule,
    ScheduleStatus,
};
use parking_lot::Mutex;
use tokio::sync::oneshot;

pub fn schedule(id: i64, use_yn: &str, start: &str, end: &str) -> Schedule {
    Schedule {
        id,
        title: format!("schedule {id}"),
        contents: None,
        use_yn: use_yn.to_string(),
        tag_ids: None,
        status: ScheduleStatus::Pending,
        start_time: start.to_string(),
        end_time: end.to_string(),
        relation_types: None,
        location: None,
    }
}

pub fn connected_day(schedules: Vec<Schedule>) -> CalendarDay {
    CalendarDay {
        connection: CalendarConnection {
            is_connected: true,
            connect_type: Some(CalendarProvider::Google),
        },
        schedules,
    }
}

/// `CalendarApi` returning the same scripted day for every date.
pub struct MockCalendarApi {
    pub day: Mutex<Result<CalendarDay>>,
    pub oauth_url: Mutex<Result<OAuthUrl>>,
    pub requested_dates: Mutex<Vec<NaiveDate>>,
    pub calls: AtomicUsize,
}

impl MockCalendarApi {
    pub fn returning(day: Result<CalendarDay>) -> Self {
        Self {
            day: Mutex::new(day),
            oauth_url: Mutex::new(Err(DayOnError::Data("OAuth URL is empty".into()))),
            requested_dates: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_oauth_url(self, result: Result<OAuthUrl>) -> Self {
        *self.oauth_url.lock() = result;
        self
    }
}

#[async_trait]
impl CalendarApi for MockCalendarApi {
    async fn get_calendar_by_date(&self, date: NaiveDate) -> Result<CalendarDay> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested_dates.lock().push(date);
        self.day.lock().clone()
    }

    async fn get_oauth_url(&self, _provider: CalendarProvider) -> Result<OAuthUrl> {
        self.oauth_url.lock().clone()
    }
}

/// `CalendarApi` whose responses are released by the test, one per date, in
/// whatever order the test chooses.
#[derive(Default)]
pub struct GatedCalendarApi {
    waiting: Mutex<HashMap<NaiveDate, oneshot::Sender<Result<CalendarDay>>>>,
}

impl GatedCalendarApi {
    /// Wait until a request for `date` is in flight.
    pub async fn wait_for(&self, date: NaiveDate) {
        while !self.waiting.lock().contains_key(&date) {
            tokio::task::yield_now().await;
        }
    }

    /// Wait until a request for `date` is in flight, then answer it.
    pub async fn release(&self, date: NaiveDate, result: Result<CalendarDay>) {
        loop {
            let waiter = self.waiting.lock().remove(&date);
            if let Some(waiter) = waiter {
                waiter.send(result).ok();
                return;
            }
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl CalendarApi for GatedCalendarApi {
    async fn get_calendar_by_date(&self, date: NaiveDate) -> Result<CalendarDay> {
        let (tx, rx) = oneshot::channel();
        self.waiting.lock().insert(date, tx);
        rx.await.map_err(|_| DayOnError::Network("request dropped".into()))?
    }

    async fn get_oauth_url(&self, _provider: CalendarProvider) -> Result<OAuthUrl> {
        Err(DayOnError::Data("not gated".into()))
    }
}
