//! Authentication: session store, route guard and the login callback.

pub mod callback;
pub mod guard;
pub mod ports;
pub mod session;

pub use callback::AuthCallback;
pub use guard::{GuardOutcome, RouteGuard};
pub use ports::{AuthApi, CredentialStore, TokenRefresher};
pub use session::SessionStore;
