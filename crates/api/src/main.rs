//! DayOn - day planner client
//!
//! Command-line entry point. Every subcommand corresponds to a page or
//! action of the client; output goes to stdout, logs to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dayon_domain::{CredentialBackend, Provider};
use dayon_infra::config;
use dayon_lib::utils::{init_tracing, LogFormat};
use dayon_lib::{commands, AppContext};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "dayon", version, about = "DayOn day planner client")]
struct Cli {
    /// Config file (JSON or TOML); probed from the standard locations if
    /// omitted.
    #[arg(long, env = "DAYON_CONFIG")]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long)]
    api_base_url: Option<String>,

    /// Where to keep the token pair.
    #[arg(long, value_enum)]
    credentials: Option<BackendArg>,

    /// Token file for the `file` backend.
    #[arg(long)]
    credential_file: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Memory,
    File,
    Keychain,
}

impl From<BackendArg> for CredentialBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Memory => Self::Memory,
            BackendArg::File => Self::File,
            BackendArg::Keychain => Self::Keychain,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    Google,
    Kakao,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Google => Self::Google,
            ProviderArg::Kakao => Self::Kakao,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the URL that starts a social login.
    LoginUrl {
        #[arg(value_enum)]
        provider: ProviderArg,
    },
    /// Exchange an OAuth authorization code for a session.
    Login {
        #[arg(value_enum)]
        provider: ProviderArg,
        #[arg(long)]
        code: String,
    },
    /// Adopt the credential cookies left by the backend after login.
    Callback,
    /// Show the signed-in account, restoring the session if needed.
    Whoami,
    /// Sign out and clear stored credentials.
    Logout,
    /// Refresh the access token.
    Refresh,
    /// Show the hourly timeline for a day.
    Calendar {
        /// Day to show (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Print the URL that connects an external calendar.
    ConnectCalendar {
        #[arg(value_enum, default_value = "google")]
        provider: ProviderArg,
    },
    /// Handle the return from the calendar connection flow.
    CalendarCallback {
        /// Value of the `connected` query parameter.
        #[arg(long)]
        connected: Option<String>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<dayon_domain::Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone()))?,
        None => config::load()?,
    };
    config::apply_env_overrides(&mut config)?;
    if let Some(url) = &cli.api_base_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(path) = cli.credential_file.clone() {
        config.credentials.file_path = Some(path);
    }
    if let Some(backend) = cli.credentials {
        config.credentials.backend = backend.into();
    }
    Ok(config)
}

#[allow(clippy::print_stdout)]
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn describe(summary: &commands::SessionSummary) -> String {
    let mut lines = Vec::new();
    match &summary.account {
        Some(account) if summary.authenticated => {
            lines.push(format!("{}님, 안녕하세요!", account.nick_name));
        }
        _ => lines.push("로그인되지 않음".to_string()),
    }
    if let Some(error) = &summary.error {
        lines.push(format!("! {error}"));
    }
    if let Some(path) = summary.redirect {
        lines.push(format!("→ {path}"));
    }
    lines.join("\n")
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let ctx = AppContext::new(config).context("failed to initialise DayOn")?;
    let json = cli.json;

    match cli.command {
        Command::LoginUrl { provider } => {
            let url = commands::login_url(&ctx, provider.into())?;
            emit(json, &url, || url.clone())?;
        }
        Command::Login { provider, code } => {
            let summary = commands::login(&ctx, provider.into(), &code).await?;
            emit(json, &summary, || describe(&summary))?;
        }
        Command::Callback => {
            let summary = commands::auth_callback(&ctx).await;
            emit(json, &summary, || describe(&summary))?;
        }
        Command::Whoami => {
            let summary = commands::whoami(&ctx).await?;
            emit(json, &summary, || describe(&summary))?;
        }
        Command::Logout => {
            let summary = commands::logout(&ctx).await;
            emit(json, &summary, || describe(&summary))?;
        }
        Command::Refresh => {
            let summary = commands::refresh(&ctx).await?;
            emit(json, &summary, || describe(&summary))?;
        }
        Command::Calendar { date } => {
            let day = commands::show_calendar(&ctx, date.as_deref()).await?;
            emit(json, &day, || day.render_text())?;
        }
        Command::ConnectCalendar { provider } => {
            let url = commands::connect_calendar(&ctx, provider.into()).await?;
            emit(json, &url, || url.clone())?;
        }
        Command::CalendarCallback { connected } => {
            let view = commands::calendar_callback(&ctx, connected.as_deref());
            emit(json, &view, || format!("{}\n→ {}", view.message, view.redirect))?;
        }
    }
    Ok(())
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let format = if cli.log_json { LogFormat::Json } else { LogFormat::Pretty };
    init_tracing(format, "warn,dayon_core=info,dayon_infra=info");
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("dayon: {err:#}");
            ExitCode::FAILURE
        }
    }
}
