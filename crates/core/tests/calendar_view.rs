//! Calendar view loading, date selection and timeline.

#![allow(dead_code)]

mod support;

use std::sync::Arc;

use chrono::NaiveDate;
use dayon_core::{CalendarView, SlotEntryKind};
use dayon_domain::{CalendarConnection, CalendarProvider, DayOnError, OAuthUrl};
use support::calendar::{connected_day, schedule, GatedCalendarApi, MockCalendarApi};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn test_load_keeps_only_active_schedules() {
    let api = Arc::new(MockCalendarApi::returning(Ok(connected_day(vec![
        schedule(1, "Y", "09:00", "10:00"),
        schedule(2, "N", "11:00", "12:00"),
        schedule(3, "Y", "13:00", "14:00"),
    ]))));
    let view = CalendarView::new(api.clone(), date(2026, 10, 16));

    view.load().await.expect("load");

    let state = view.state();
    let ids: Vec<_> = state.schedules.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(state.connection.is_connected);
    assert_eq!(state.connection.connect_type, Some(CalendarProvider::Google));
    assert!(!state.is_loading);
    assert_eq!(*api.requested_dates.lock(), vec![date(2026, 10, 16)]);
}

#[tokio::test]
async fn test_load_failure_resets_to_empty_and_disconnected() {
    let api = Arc::new(MockCalendarApi::returning(Ok(connected_day(vec![schedule(
        1, "Y", "09:00", "10:00",
    )]))));
    let view = CalendarView::new(api.clone(), date(2026, 10, 16));
    view.load().await.expect("first load");

    *api.day.lock() = Err(DayOnError::Data("날짜 응답이 비어 있습니다".into()));
    view.load().await.expect_err("second load fails");

    let state = view.state();
    assert!(state.schedules.is_empty());
    assert_eq!(state.connection, CalendarConnection::default());
    assert!(!state.is_loading);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn test_timeline_for_loaded_day() {
    let api = Arc::new(MockCalendarApi::returning(Ok(connected_day(vec![schedule(
        7, "Y", "10:00:00", "12:30:00",
    )]))));
    let view = CalendarView::new(api, date(2026, 10, 16));
    view.load().await.expect("load");

    let timeline = view.timeline();
    assert_eq!(timeline.len(), 24);

    let marked: Vec<_> = timeline
        .iter()
        .filter(|slot| !slot.is_free())
        .map(|slot| (slot.hour, slot.entries[0].kind))
        .collect();
    assert_eq!(
        marked,
        vec![(10, SlotEntryKind::Start), (11, SlotEntryKind::Continues), (12, SlotEntryKind::Ends)]
    );
    assert_eq!(timeline[9].free_label(), Some("여유 시간"));
}

#[tokio::test]
async fn test_date_input_selection_and_labels() {
    let api = Arc::new(MockCalendarApi::returning(Ok(connected_day(Vec::new()))));
    let view = CalendarView::new(api.clone(), date(2026, 10, 16));

    assert!(view.is_today());
    assert_eq!(view.label(), "10월 16일 (금)");

    view.select_date_input("2026-01-31").expect("valid input");
    assert_eq!(view.selected_date(), date(2026, 1, 31));
    assert_eq!(view.api_date(), "2026-01-31");
    assert_eq!(view.date_input_value(), "2026-01-31");
    assert!(!view.is_today());

    view.select_date_input("2026-02-31").expect_err("no such day");
    assert_eq!(view.selected_date(), date(2026, 1, 31));

    view.load().await.expect("load");
    assert_eq!(*api.requested_dates.lock(), vec![date(2026, 1, 31)]);
}

#[tokio::test]
async fn test_last_completed_load_wins() {
    let api = Arc::new(GatedCalendarApi::default());
    let view = Arc::new(CalendarView::new(api.clone(), date(2026, 10, 16)));
    let first = date(2026, 10, 16);
    let second = date(2026, 10, 17);

    view.select_date(first);
    let slow = tokio::spawn({
        let view = view.clone();
        async move { view.load().await }
    });
    api.wait_for(first).await;

    view.select_date(second);
    let fast = tokio::spawn({
        let view = view.clone();
        async move { view.load().await }
    });
    api.wait_for(second).await;

    api.release(second, Ok(connected_day(vec![schedule(2, "Y", "09:00", "10:00")]))).await;
    fast.await.expect("join").expect("second load");
    api.release(first, Ok(connected_day(vec![schedule(1, "Y", "09:00", "10:00")]))).await;
    slow.await.expect("join").expect("first load");

    let state = view.state();
    assert_eq!(state.selected_date, second);
    assert_eq!(state.schedules.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_connect_calendar_returns_oauth_url() {
    let api = MockCalendarApi::returning(Ok(connected_day(Vec::new())))
        .with_oauth_url(Ok(OAuthUrl { url: "https://accounts.google.com/o/oauth2".into() }));
    let view = CalendarView::new(Arc::new(api), date(2026, 10, 16));

    let url = view.connect_calendar(CalendarProvider::Google).await.expect("url");
    assert!(url.url.starts_with("https://accounts.google.com"));
}

#[tokio::test]
async fn test_connect_calendar_surfaces_empty_url() {
    let view = CalendarView::new(
        Arc::new(MockCalendarApi::returning(Ok(connected_day(Vec::new())))),
        date(2026, 10, 16),
    );

    let err = view.connect_calendar(CalendarProvider::Google).await.expect_err("empty url");
    assert!(matches!(err, DayOnError::Data(_)));
}
