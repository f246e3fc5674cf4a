//! Error types for the team repository lifecycle operations.
//!
//! Errors fall into two groups. Configuration-level errors (bad settings, a
//! missing or malformed roster) abort a run before any remote call is made.
//! Everything else is reported per item and folded into a [`BatchTally`](crate::BatchTally).

use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while reading a roster file.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read roster file {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Roster file {} contains no worksheets", path.display())]
    NoWorksheet { path: PathBuf },

    #[error("Missing required columns in roster: {missing:?} (available: {available:?})")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
}

/// Top level error for the lifecycle orchestrators.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config_manager::ConfigurationError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("GitHub error: {0}")]
    GitHub(#[from] github_client::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Template repository '{name}' not found")]
    TemplateNotFound { name: String },

    #[error("No leader given for team '{team_name}'")]
    MissingLeader { team_name: String },

    #[error("No GitHub user found for '{leader}'")]
    LeaderNotFound { leader: String },

    #[error("Git configuration failed: {0}")]
    GitConfig(#[from] git2::Error),
}

impl Error {
    /// Returns true for errors that are raised before any remote call and abort the run.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Roster(_))
    }

    /// Returns true when the platform reported that the target does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::GitHub(e) => e.is_not_found(),
            Self::TemplateNotFound { .. } | Self::LeaderNotFound { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for lifecycle operations.
pub type TeamRollerResult<T> = Result<T, Error>;
