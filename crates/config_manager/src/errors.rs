//! Configuration system error types.
//!
//! Domain-specific errors for loading and validating the environment-sourced
//! settings. All of these are fatal: they are raised before any remote call is made.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Configuration system errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The GitHub access token is not configured.
    #[error("GitHub token is required. Please set the {key} environment variable.")]
    MissingToken { key: String },

    /// A configuration value is present but cannot be interpreted.
    #[error("Invalid configuration: {key}={value:?} - {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// A configuration value that has no usable default is empty.
    #[error("Required configuration missing: {key}")]
    RequiredConfigMissing { key: String },
}

impl ConfigurationError {
    pub(crate) fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
