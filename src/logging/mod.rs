//! Application logging functionality
//!
//! Sets up `tracing` output to stderr and, on request, to daily log files
//! under ~/.config/tracefont/logs/

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config_file::ConfigFile;

/// Log level used when RUST_LOG is not set
const DEFAULT_FILTER: &str = "info";

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// Get the path to the current log file. The daily appender rolls over on
/// UTC dates.
pub fn current_log_file() -> PathBuf {
    current_log_file_at(chrono::Utc::now())
}

fn current_log_file_at(now: chrono::DateTime<chrono::Utc>) -> PathBuf {
    let timestamp = now.format("%Y-%m-%d");
    logs_dir().join(format!("tracefont.log.{}", timestamp))
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    let logs_dir = logs_dir();
    fs::create_dir_all(&logs_dir)?;
    Ok(())
}

/// Install the global subscriber.
///
/// With `log_to_file`, records are also appended to a daily file in
/// [`logs_dir`]; keep the returned guard alive until exit so buffered lines
/// are flushed.
pub fn init_logging(log_to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if !log_to_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()?;
        return Ok(None);
    }

    initialize_logs_directory()?;
    let appender = tracing_appender::rolling::daily(logs_dir(), "tracefont.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()?;

    tracing::info!(
        "=== tracefont started at {} ===",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    tracing::info!("Logging to {:?}", current_log_file());
    Ok(Some(guard))
}
