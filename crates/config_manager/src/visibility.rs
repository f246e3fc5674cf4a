//! Repository visibility type.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ConfigurationError;

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;

/// Repository visibility level applied to newly created team repositories.
///
/// # Examples
///
/// ```rust
/// use config_manager::RepositoryVisibility;
///
/// let visibility: RepositoryVisibility = "private".parse().unwrap();
/// assert!(visibility.is_private());
/// ```
///
/// # Serialization
///
/// Serializes to/from lowercase strings: "public", "private"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryVisibility {
    /// Visible to all GitHub users
    Public,

    /// Visible only to repository collaborators and organization owners
    Private,
}

impl RepositoryVisibility {
    /// Convert visibility to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    /// Convert visibility to the boolean `private` flag used by the GitHub API.
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

impl FromStr for RepositoryVisibility {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(ConfigurationError::invalid_value(
                crate::settings::REPO_VISIBILITY,
                s,
                "expected 'private' or 'public'",
            )),
        }
    }
}

impl std::fmt::Display for RepositoryVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
