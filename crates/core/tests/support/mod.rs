//! Shared test helpers for `dayon-core` integration tests.
//!
//! Lightweight in-memory stand-ins for the ports so tests can focus on
//! session and view behaviour instead of HTTP plumbing.

pub mod auth;
pub mod calendar;
