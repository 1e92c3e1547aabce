/// Tracing setup for the CLI
use std::path::PathBuf;

use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_TARGET_STARTUP: &str = "football_report::startup";

const APP_DIR_NAME: &str = "FootballReport";
const LOG_FILE_NAME: &str = "football-report.log";

/// Directory for log files
///
/// - macOS: ~/Library/Application Support/FootballReport/logs/
/// - Windows: %APPDATA%/FootballReport/logs/
/// - Linux: ~/.config/FootballReport/logs/
pub fn log_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize tracing with a daily rotating file and a console layer on
/// stderr. `RUST_LOG` overrides the default filter; `verbose` lowers the
/// default from `info` to `debug` so per-fixture decisions are logged.
pub fn init_tracing(verbose: bool) -> PathBuf {
    let log_dir = log_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, LOG_FILE_NAME);

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    // A global subscriber may already be installed (tests, embedding hosts)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    tracing::info!(target: LOG_TARGET_STARTUP, "Log directory: {}", log_dir.display());
    log_dir
}

/// One startup line with version and platform
pub fn log_runtime_environment() {
    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Starting football-report v{} on {} ({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}
