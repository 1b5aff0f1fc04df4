//! # DayOn Domain
//!
//! Business domain types and models for the DayOn client.
//!
//! This crate contains:
//! - Wire types shared with the backend (envelope, account, schedules)
//! - Session state and navigation routes
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Date and clock helpers used by the calendar view
//!
//! ## Architecture
//! - No dependencies on other DayOn crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::dates::{
    format_date_for_api, format_date_label, parse_clock_minutes, parse_date_input,
};
