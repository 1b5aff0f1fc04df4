//! Backend API access
//!
//! - [`ApiGateway`]: authenticated calls with expired-token recovery
//! - [`RefreshClient`]: the unauthenticated refresh call
//! - credential cookie absorption shared by both

pub mod cookies;
pub mod errors;
pub mod gateway;
pub mod refresh;

pub use cookies::absorb_credential_cookies;
pub use errors::{ApiError, ApiErrorCategory};
pub use gateway::{ApiGateway, Attempt, GatewayConfig};
pub use refresh::RefreshClient;
