//! Hourly timeline for a single day
//!
//! A schedule `[start, end)` appears in every hour slot it overlaps at minute
//! granularity:
//!
//! - the slot of its start hour marks it [`SlotEntryKind::Start`]
//! - the slot of its end hour marks it [`SlotEntryKind::Ends`], unless the end
//!   falls exactly on the hour (then that slot is not touched at all)
//! - every slot strictly between marks it [`SlotEntryKind::Continues`]
//!
//! A schedule ending before it starts runs to the end of the day. A
//! zero-length schedule shows as a start in its own hour.

use dayon_domain::constants::{FREE_TIME_LABEL, HOURS_PER_DAY, MINUTES_PER_HOUR};
use dayon_domain::Schedule;
use serde::Serialize;
use tracing::warn;

const MINUTES_PER_DAY: u32 = HOURS_PER_DAY * MINUTES_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotEntryKind {
    Start,
    Continues,
    Ends,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotEntry {
    pub schedule: Schedule,
    pub kind: SlotEntryKind,
}

/// One hour of the day and the schedules that touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub hour: u32,
    pub entries: Vec<SlotEntry>,
}

impl TimeSlot {
    /// `HH:00`
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }

    pub fn is_free(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text for an empty slot.
    pub fn free_label(&self) -> Option<&'static str> {
        self.is_free().then_some(FREE_TIME_LABEL)
    }
}

/// Minute span of a schedule, normalised to `start <= end <= 24:00`.
fn span(schedule: &Schedule) -> Option<(u32, u32)> {
    let (Some(start), Some(end)) = (schedule.start_minutes(), schedule.end_minutes()) else {
        warn!(
            schedule_id = schedule.id,
            start_time = %schedule.start_time,
            end_time = %schedule.end_time,
            "Skipping schedule with unreadable times"
        );
        return None;
    };
    if start >= MINUTES_PER_DAY {
        return None;
    }
    let end = if end < start { MINUTES_PER_DAY } else { end };
    Some((start, end))
}

fn entry_kind(hour: u32, start: u32, end: u32) -> Option<SlotEntryKind> {
    let slot_start = hour * MINUTES_PER_HOUR;
    let slot_end = slot_start + MINUTES_PER_HOUR;
    let start_hour = start / MINUTES_PER_HOUR;

    if hour == start_hour {
        return Some(SlotEntryKind::Start);
    }
    if start >= slot_end || end <= slot_start {
        return None;
    }
    if hour == end / MINUTES_PER_HOUR && end % MINUTES_PER_HOUR != 0 {
        Some(SlotEntryKind::Ends)
    } else {
        Some(SlotEntryKind::Continues)
    }
}

/// Build the 24 hour slots for a day's schedules, preserving input order
/// within each slot.
pub fn build_timeline(schedules: &[Schedule]) -> Vec<TimeSlot> {
    let spans: Vec<_> =
        schedules.iter().filter_map(|schedule| span(schedule).map(|s| (schedule, s))).collect();

    (0..HOURS_PER_DAY)
        .map(|hour| TimeSlot {
            hour,
            entries: spans
                .iter()
                .filter_map(|(schedule, (start, end))| {
                    entry_kind(hour, *start, *end)
                        .map(|kind| SlotEntry { schedule: (*schedule).clone(), kind })
                })
                .collect(),
        })
        .collect()
}
