//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Credential cookies issued by the backend after OAuth login
pub const ACCESS_TOKEN_COOKIE: &str = "dayOnAccessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "dayOnRefreshToken";

// Gateway error code returned with 403 when the access token has expired
pub const ACCESS_TOKEN_EXPIRED_CODE: &str = "APGW0004";
pub const ACCESS_TOKEN_EXPIRED_STATUS: u16 = 403;

// Backend endpoints (relative to the API base URL)
pub const GOOGLE_LOGIN_PATH: &str = "/auth/google";
pub const KAKAO_LOGIN_PATH: &str = "/auth/kakao";
pub const ACCOUNT_INFO_PATH: &str = "/v1/account/info";
pub const LOGOUT_PATH: &str = "/v1/logout";
pub const CALENDAR_PATH: &str = "/v1/calendar";
pub const CALENDAR_OAUTH_URL_PATH: &str = "/v1/calendar/oauth-url";
pub const KAKAO_AUTHORIZATION_PATH: &str = "/oauth2/authorization/kakao";

// Refresh endpoint (relative to the auth base URL, called unauthenticated)
pub const REFRESH_TOKEN_PATH: &str = "/v1/account/refreshToken";

// Google OAuth consent screen
pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_SCOPE: &str = "openid email profile";

// Calendar timeline
pub const HOURS_PER_DAY: u32 = 24;
pub const MINUTES_PER_HOUR: u32 = 60;
pub const ACTIVE_USE_FLAG: &str = "Y";
pub const FREE_TIME_LABEL: &str = "여유 시간";

// Defaults for a locally running backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "DayOn.session";
