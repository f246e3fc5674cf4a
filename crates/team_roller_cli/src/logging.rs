//! Logging setup for the CLI.
//!
//! Log lines go to the console and, for the lifecycle commands, are appended to a
//! per-command file (`create.log`, `archive.log`, ...) in the log directory.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::errors::Error;

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "TEAM_ROLLER_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Creates an append-only, never-rotated writer for `file_name` inside `log_dir`.
pub fn log_file_appender(log_dir: &Path, file_name: &str) -> Result<RollingFileAppender, Error> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| Error::Logging(format!("cannot create {}: {}", log_dir.display(), e)))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(log_dir)
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Installs the global subscriber.
///
/// `log_file` is the file name to append to inside `log_dir`; `None` logs to the
/// console only.
pub fn init_logging(log_dir: &Path, log_file: Option<&str>) -> Result<(), Error> {
    let file_layer = match log_file {
        Some(file_name) => Some(
            fmt::layer()
                .with_writer(log_file_appender(log_dir, file_name)?)
                .with_ansi(false)
                .with_target(false)
                .with_filter(env_filter()),
        ),
        None => None,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(false)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
