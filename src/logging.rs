//! File logging
//!
//! The terminal belongs to the UI, so log output only ever goes to a file.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "APCMD_LOG";

/// Filter from `APCMD_LOG`, else the configured level, else `info`
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `<directory>/<file>`.
///
/// Returns the appender guard; dropping it flushes pending lines. Logging
/// stays off if the directory cannot be created.
pub fn init(config: &LoggingConfig, directory: Option<&Path>) -> Option<WorkerGuard> {
    let directory = directory?;
    if let Err(e) = fs::create_dir_all(directory) {
        eprintln!("Warning: Could not create log directory: {}", e);
        return None;
    }

    let appender = tracing_appender::rolling::never(directory, &config.file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(build_filter(&config.level));

    if tracing_subscriber::registry().with(file_layer).try_init().is_err() {
        return None;
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Some(guard)
}
