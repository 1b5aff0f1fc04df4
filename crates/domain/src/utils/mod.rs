//! Pure utility functions shared across layers

pub mod dates;
