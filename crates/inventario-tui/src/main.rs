//! `inventario`: terminal client for a small stock-control backend.
//!
//! Shows products, recent movements and low-stock items in three tabs,
//! with summary statistics on top, and lets the user create products and
//! record stock movements through modal forms.
//!
//! Logs are written to a file (default `/tmp/inventario.log`) to avoid
//! corrupting the terminal UI. A background data bridge forwards every
//! controller state change into the TUI action loop.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use inventario_config::{Config, load_config, resolve_client_config, validate_api_url};
use inventario_core::{ClientConfig, Controller};

use crate::app::App;

/// Browse stock and record inventory movements from the terminal.
#[derive(Parser, Debug)]
#[command(name = "inventario", version, about)]
struct Cli {
    /// Backend API root (e.g., http://192.168.5.59:5010/api)
    #[arg(short = 'u', long, env = "INVENTARIO_API_URL")]
    api_url: Option<String>,

    /// Config profile to use (defaults to the file's default_profile)
    #[arg(short = 'p', long, env = "INVENTARIO_PROFILE")]
    profile: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    /// Log file path (defaults to /tmp/inventario.log)
    #[arg(long, default_value = "/tmp/inventario.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing; stdout belongs to the TUI. The returned guard must
/// be held until exit so buffered logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "inventario_tui={log_level},inventario_core={log_level},inventario_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("inventario.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Priority: CLI flags > environment > config file > built-in default.
fn build_client_config(cli: &Cli) -> Result<ClientConfig> {
    let cfg = load_config().unwrap_or_else(|e| {
        warn!(error = %e, "could not read config file, using defaults");
        Config::default()
    });

    let mut config = resolve_client_config(&cfg, cli.profile.as_deref())?;

    if let Some(ref url) = cli.api_url {
        config.api_url = validate_api_url(url)?;
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Some(secs).filter(|s| *s > 0).map(Duration::from_secs));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks go in BEFORE the terminal is taken over
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let config = build_client_config(&cli)?;
    info!(
        api_url = %config.api_url,
        timeout = ?config.timeout,
        profile = cli.profile.as_deref().unwrap_or("(default)"),
        "starting inventario"
    );

    let controller = Controller::new(config)?;
    let mut app = App::new(controller);
    app.run().await?;

    Ok(())
}
