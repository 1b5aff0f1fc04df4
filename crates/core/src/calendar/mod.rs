//! Calendar: data port, day view model and hourly timeline.

pub mod callback;
pub mod ports;
pub mod timeline;
pub mod view;

pub use callback::{handle_calendar_callback, CalendarConnectOutcome};
pub use ports::CalendarApi;
pub use timeline::{build_timeline, SlotEntry, SlotEntryKind, TimeSlot};
pub use view::{CalendarView, CalendarViewState};
