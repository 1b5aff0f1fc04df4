//! Session commands: login, callback, whoami, logout, refresh

use std::time::Instant;

use dayon_core::{GuardOutcome, Navigator};
use dayon_domain::{Account, DayOnError, Provider, Result, Route};
use dayon_infra::login_url as provider_login_url;
use serde::Serialize;
use tracing::info;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// What the user would see after a session command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Path of the last redirect, if the command caused one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

impl SessionSummary {
    fn capture(ctx: &AppContext) -> Self {
        let session = ctx.session.snapshot();
        Self {
            authenticated: session.is_authenticated(),
            account: session.account().cloned(),
            error: session.error().map(str::to_string),
            redirect: ctx.navigator.last().map(|route| route.path()),
        }
    }
}

fn timed<T>(command: &str, start: Instant, result: Result<T>) -> Result<T> {
    log_command_execution(command, start.elapsed(), result.as_ref().map(|_| ()));
    result
}

/// Where to send the user to start a social login.
pub fn login_url(ctx: &AppContext, provider: Provider) -> Result<String> {
    provider_login_url(provider, &ctx.config).map(String::from)
}

/// Exchange an authorization code; lands on the dashboard on success.
pub async fn login(ctx: &AppContext, provider: Provider, code: &str) -> Result<SessionSummary> {
    let start = Instant::now();
    let result = ctx.session.login(provider, code).await.map(|account| {
        info!(provider = %provider, nick_name = %account.nick_name, "Signed in");
        ctx.navigator.navigate(Route::Dashboard);
        SessionSummary::capture(ctx)
    });
    timed("auth::login", start, result)
}

/// `/auth/callback`: adopt the cookies set by the backend.
pub async fn auth_callback(ctx: &AppContext) -> SessionSummary {
    let start = Instant::now();
    let route = ctx.auth_callback.handle().await;
    let outcome = if route == Route::Dashboard {
        Ok(())
    } else {
        Err(DayOnError::Auth("auth callback redirected to login".into()))
    };
    log_command_execution("auth::callback", start.elapsed(), outcome.as_ref().copied());
    SessionSummary::capture(ctx)
}

/// Restore the session through the route guard and report it.
///
/// # Errors
///
/// Returns `Auth` when the guard redirects to the login page.
pub async fn whoami(ctx: &AppContext) -> Result<SessionSummary> {
    let start = Instant::now();
    let result = match ctx.guard.on_mount().await {
        GuardOutcome::Render | GuardOutcome::Loading => Ok(SessionSummary::capture(ctx)),
        GuardOutcome::Redirect(route) => {
            Err(DayOnError::Auth(format!("not signed in (redirected to {route})")))
        }
    };
    timed("auth::whoami", start, result)
}

/// Sign out; never fails.
pub async fn logout(ctx: &AppContext) -> SessionSummary {
    let start = Instant::now();
    ctx.session.logout().await;
    log_command_execution("auth::logout", start.elapsed(), Ok(()));
    SessionSummary::capture(ctx)
}

/// Trade the stored refresh token for a new pair.
pub async fn refresh(ctx: &AppContext) -> Result<SessionSummary> {
    let start = Instant::now();
    let result = ctx.session.refresh_token().await.map(|_| SessionSummary::capture(ctx));
    timed("auth::refresh", start, result)
}
