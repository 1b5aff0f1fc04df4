//! # DayOn Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The authenticated API gateway and the token refresh client
//! - HTTP implementations of `AuthApi` and `CalendarApi`
//! - Credential stores (memory, file, OS keychain)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `dayon-core`
//! - Depends on `dayon-domain` and `dayon-core`
//! - Contains all "impure" code (HTTP, keychain, filesystem)

pub mod api;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiError, ApiGateway, GatewayConfig, RefreshClient};
pub use auth::{login_url, AuthService};
pub use calendar::CalendarService;
pub use credentials::{
    build_credential_store, FileCredentialStore, KeychainCredentialStore, MemoryCredentialStore,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
