use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the TeamRoller CLI application.
///
/// Per-repository failures never show up here; they are counted by the
/// commands. These are the errors that stop a command as a whole.
#[derive(Error, Debug)]
pub enum Error {
    /// The environment-sourced settings are missing or invalid.
    ///
    /// Returned before any GitHub call is made, e.g. when `GITHUB_TOKEN` is
    /// not set or `REPO_VISIBILITY` holds an unknown value.
    #[error("Configuration error: {0}")]
    Config(#[from] config_manager::ConfigurationError),

    /// A lifecycle operation could not run at all.
    #[error(transparent)]
    Core(#[from] team_roller_core::Error),

    /// The GitHub client could not be created.
    #[error("GitHub error: {0}")]
    GitHub(#[from] github_client::Error),

    /// Invalid command-line arguments were provided.
    ///
    /// For example `--mode specific` without any `--repos`.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The log directory or log file could not be set up.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// Failed to write a file to the filesystem.
    #[error("Failed to write file.")]
    WriteFile(io::Error),

    /// Failed to produce CSV output.
    #[error("Failed to write CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to flush the standard output buffer.
    #[error("Failed to flush the std out buffer.")]
    StdOutFlushFailed,

    /// Failed to read an answer from standard input.
    #[error("Failed to read from standard input.")]
    StdInReadFailed,
}
