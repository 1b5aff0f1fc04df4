//! Authentication adapters

pub mod login_url;
pub mod service;

pub use login_url::{google_login_url, kakao_login_url, login_url};
pub use service::AuthService;
