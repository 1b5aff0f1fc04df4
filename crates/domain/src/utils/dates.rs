//! Date and clock helpers for the calendar view
//!
//! The API addresses a day by its local calendar date (`YYYY-MM-DD`), never by
//! an instant, so everything here works on [`NaiveDate`].

use chrono::{Datelike, NaiveDate, Weekday};

use crate::constants::{HOURS_PER_DAY, MINUTES_PER_HOUR};
use crate::errors::{DayOnError, Result};

/// Format a date as the API path segment `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dayon_domain::utils::dates::format_date_for_api;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
/// assert_eq!(format_date_for_api(date), "2026-03-07");
/// ```
#[must_use]
pub fn format_date_for_api(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a `YYYY-MM-DD` date picker value.
///
/// The date is rebuilt from its year, month and day components, so the result
/// is the same calendar day that was typed regardless of the local offset.
///
/// # Errors
///
/// Returns [`DayOnError::InvalidInput`] when the value is not three numeric
/// components or does not name a real day (e.g. `2026-02-30`).
///
/// # Examples
///
/// ```
/// use dayon_domain::utils::dates::{format_date_for_api, parse_date_input};
///
/// let date = parse_date_input("2026-10-16").unwrap();
/// assert_eq!(format_date_for_api(date), "2026-10-16");
/// assert!(parse_date_input("2026-13-01").is_err());
/// ```
pub fn parse_date_input(value: &str) -> Result<NaiveDate> {
    let invalid = || DayOnError::InvalidInput(format!("expected YYYY-MM-DD, got {value:?}"));

    let mut parts = value.trim().splitn(3, '-');
    let year = parts.next().and_then(|p| p.parse::<i32>().ok()).ok_or_else(invalid)?;
    let month = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(invalid)?;
    let day = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Korean header label, e.g. `10월 16일 (금)`.
#[must_use]
pub fn format_date_label(date: NaiveDate) -> String {
    format!("{}월 {}일 ({})", date.month(), date.day(), weekday_short_ko(date.weekday()))
}

fn weekday_short_ko(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}

/// Minutes since midnight for an `HH:MM` or `HH:MM:SS` clock string.
///
/// Seconds are accepted but ignored. `24:00` is allowed as an end-of-day
/// marker; anything past it is rejected.
///
/// # Examples
///
/// ```
/// use dayon_domain::utils::dates::parse_clock_minutes;
///
/// assert_eq!(parse_clock_minutes("10:30"), Some(630));
/// assert_eq!(parse_clock_minutes("12:30:00"), Some(750));
/// assert_eq!(parse_clock_minutes("25:00"), None);
/// ```
#[must_use]
pub fn parse_clock_minutes(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    if let Some(seconds) = parts.next() {
        let seconds: u32 = seconds.parse().ok()?;
        if seconds >= 60 {
            return None;
        }
    }
    if parts.next().is_some() || minute >= MINUTES_PER_HOUR {
        return None;
    }

    let total = hour.checked_mul(MINUTES_PER_HOUR)?.checked_add(minute)?;
    (total <= HOURS_PER_DAY * MINUTES_PER_HOUR).then_some(total)
}
