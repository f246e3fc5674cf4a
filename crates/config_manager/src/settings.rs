//! Runtime settings sourced from environment variables.
//!
//! Every value has a default except the GitHub token, which is only required by
//! operations that talk to GitHub. Present-but-empty variables are treated as unset.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{ConfigurationError, ConfigurationResult};
use crate::permission::Permission;
use crate::visibility::RepositoryVisibility;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const GITHUB_ORG_NAME: &str = "GITHUB_ORG_NAME";
pub const TEMPLATE_REPO_NAME: &str = "TEMPLATE_REPO_NAME";
pub const EXCEL_FILE_PATH: &str = "EXCEL_FILE_PATH";
pub const TEAM_NAME_COLUMN: &str = "TEAM_NAME_COLUMN";
pub const LEADER_EMAIL_COLUMN: &str = "LEADER_EMAIL_COLUMN";
pub const LEADER_USERNAME_COLUMN: &str = "LEADER_USERNAME_COLUMN";
pub const REPO_PREFIX: &str = "REPO_PREFIX";
pub const REPO_DESCRIPTION: &str = "REPO_DESCRIPTION";
pub const REPO_VISIBILITY: &str = "REPO_VISIBILITY";
pub const DEFAULT_PERMISSION: &str = "DEFAULT_PERMISSION";
pub const SCRIPT_GIT_USER_NAME: &str = "SCRIPT_GIT_USER_NAME";
pub const SCRIPT_GIT_USER_EMAIL: &str = "SCRIPT_GIT_USER_EMAIL";
pub const MAX_RETRIES: &str = "MAX_RETRIES";
pub const RETRY_DELAY: &str = "RETRY_DELAY";

const DEFAULT_ORGANIZATION: &str = "your-organization-name";
const DEFAULT_TEMPLATE: &str = "hackathon_template";
const DEFAULT_ROSTER_PATH: &str = "teams_data.xlsx";
const DEFAULT_TEAM_NAME_COLUMN: &str = "team_name";
const DEFAULT_LEADER_COLUMN: &str = "leader_email";
const DEFAULT_USERNAME_COLUMN: &str = "leader_username";
const DEFAULT_PREFIX: &str = "hackathon-";
const DEFAULT_DESCRIPTION: &str = "Hackathon project repository";
const DEFAULT_GIT_USER_NAME: &str = "Hackathon Organizer";
const DEFAULT_GIT_USER_EMAIL: &str = "organizer@hackathon.com";
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Where the team roster lives and which columns to read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSettings {
    pub path: PathBuf,
    pub team_name_column: String,
    /// Column holding the leader's email address or GitHub username.
    pub leader_column: String,
    /// Optional column holding an explicit GitHub username. Wins over `leader_column`
    /// for rows where it is filled in.
    pub username_column: String,
}

/// Defaults applied to every repository the tool creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDefaults {
    pub prefix: String,
    pub description: String,
    pub visibility: RepositoryVisibility,
    pub permission: Permission,
}

impl RepositoryDefaults {
    /// Builds the description for a team's repository.
    ///
    /// ```rust
    /// use config_manager::Settings;
    ///
    /// let settings = Settings::default();
    /// assert_eq!(
    ///     settings.repository.description_for("Team Alpha"),
    ///     "Hackathon project repository for team Team Alpha"
    /// );
    /// ```
    pub fn description_for(&self, team_name: &str) -> String {
        format!("{} for team {}", self.description, team_name)
    }
}

/// Identity written into the global git configuration by the quick-setup flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitAuthor {
    pub name: String,
    pub email: String,
}

/// Retry tuning. Accepted and validated, not currently applied to remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub delay: Duration,
}

/// Complete runtime configuration for a single invocation.
#[derive(Debug)]
pub struct Settings {
    pub github_token: Option<SecretString>,
    pub organization: String,
    pub template_repository: String,
    pub roster: RosterSettings,
    pub repository: RepositoryDefaults,
    pub git_author: GitAuthor,
    pub retry: RetrySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_token: None,
            organization: DEFAULT_ORGANIZATION.to_string(),
            template_repository: DEFAULT_TEMPLATE.to_string(),
            roster: RosterSettings {
                path: PathBuf::from(DEFAULT_ROSTER_PATH),
                team_name_column: DEFAULT_TEAM_NAME_COLUMN.to_string(),
                leader_column: DEFAULT_LEADER_COLUMN.to_string(),
                username_column: DEFAULT_USERNAME_COLUMN.to_string(),
            },
            repository: RepositoryDefaults {
                prefix: DEFAULT_PREFIX.to_string(),
                description: DEFAULT_DESCRIPTION.to_string(),
                visibility: RepositoryVisibility::Private,
                permission: Permission::Push,
            },
            git_author: GitAuthor {
                name: DEFAULT_GIT_USER_NAME.to_string(),
                email: DEFAULT_GIT_USER_EMAIL.to_string(),
            },
            retry: RetrySettings {
                max_retries: DEFAULT_MAX_RETRIES,
                delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            },
        }
    }
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn from_env() -> ConfigurationResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] when the visibility, permission or
    /// retry values cannot be parsed. A missing token is not an error here; see
    /// [`Settings::require_token`].
    pub fn from_lookup<F>(lookup: F) -> ConfigurationResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        settings.github_token = value(GITHUB_TOKEN).map(SecretString::from);

        if let Some(org) = value(GITHUB_ORG_NAME) {
            settings.organization = org;
        }
        if let Some(template) = value(TEMPLATE_REPO_NAME) {
            settings.template_repository = template;
        }
        if let Some(path) = value(EXCEL_FILE_PATH) {
            settings.roster.path = PathBuf::from(path);
        }
        if let Some(column) = value(TEAM_NAME_COLUMN) {
            settings.roster.team_name_column = column;
        }
        if let Some(column) = value(LEADER_EMAIL_COLUMN) {
            settings.roster.leader_column = column;
        }
        if let Some(column) = value(LEADER_USERNAME_COLUMN) {
            settings.roster.username_column = column;
        }
        if let Some(prefix) = value(REPO_PREFIX) {
            settings.repository.prefix = prefix;
        }
        if let Some(description) = value(REPO_DESCRIPTION) {
            settings.repository.description = description;
        }
        if let Some(visibility) = value(REPO_VISIBILITY) {
            settings.repository.visibility = visibility.parse()?;
        }
        if let Some(permission) = value(DEFAULT_PERMISSION) {
            settings.repository.permission = permission.parse()?;
        }
        if let Some(name) = value(SCRIPT_GIT_USER_NAME) {
            settings.git_author.name = name;
        }
        if let Some(email) = value(SCRIPT_GIT_USER_EMAIL) {
            settings.git_author.email = email;
        }
        if let Some(retries) = value(MAX_RETRIES) {
            settings.retry.max_retries = parse_number(MAX_RETRIES, &retries)?;
        }
        if let Some(delay) = value(RETRY_DELAY) {
            settings.retry.delay = Duration::from_secs(parse_number(RETRY_DELAY, &delay)?);
        }

        Ok(settings)
    }

    /// Returns the GitHub token, or [`ConfigurationError::MissingToken`] when unset.
    pub fn require_token(&self) -> ConfigurationResult<&SecretString> {
        self.github_token
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingToken {
                key: GITHUB_TOKEN.to_string(),
            })
    }

    pub fn has_token(&self) -> bool {
        self.github_token.is_some()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> ConfigurationResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigurationError::invalid_value(key, raw, "expected a non-negative integer"))
}
