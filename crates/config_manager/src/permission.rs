//! Collaborator permission levels.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ConfigurationError;

#[cfg(test)]
#[path = "permission_tests.rs"]
mod tests;

/// Permission granted to a team leader on their repository.
///
/// Variants are declared from least to most privileged, so they compare in that order.
///
/// # Examples
///
/// ```rust
/// use config_manager::Permission;
///
/// let permission: Permission = "push".parse().unwrap();
/// assert_eq!(permission.as_str(), "push");
/// assert!(permission < Permission::Admin);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Read-only access
    Pull,
    /// Manage issues and pull requests without write access
    Triage,
    /// Read and write access
    Push,
    /// Write access plus some repository settings
    Maintain,
    /// Full administrative access
    Admin,
}

impl Permission {
    /// Returns the value GitHub expects in the collaborator API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Triage => "triage",
            Self::Push => "push",
            Self::Maintain => "maintain",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Permission {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pull" => Ok(Self::Pull),
            "triage" => Ok(Self::Triage),
            "push" => Ok(Self::Push),
            "maintain" => Ok(Self::Maintain),
            "admin" => Ok(Self::Admin),
            _ => Err(ConfigurationError::invalid_value(
                crate::settings::DEFAULT_PERMISSION,
                s,
                "expected one of 'pull', 'triage', 'push', 'maintain', 'admin'",
            )),
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
