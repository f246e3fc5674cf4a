//! Read-only self-check of configuration, connectivity and inputs.
//!
//! Each check runs regardless of the outcome of the ones before it, so one run
//! reports every problem at once. Nothing here mutates remote state.

use config_manager::{settings::GITHUB_TOKEN, settings::GITHUB_ORG_NAME, Settings};
use github_client::{RepositoryClient, UserClient};
use tracing::{info, warn};

use crate::errors::RosterError;
use crate::roster::{self, RosterTable};

#[cfg(test)]
#[path = "doctor_tests.rs"]
mod tests;

/// Query used to confirm that user search works with the configured token.
pub const SEARCH_PROBE: &str = "test@example.com";

/// Number of roster rows echoed by the roster check.
const SAMPLE_ROWS: usize = 5;

/// A line of output attached to a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckDetail {
    Info(String),
    Warning(String),
    Problem(String),
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub details: Vec<CheckDetail>,
}

impl CheckResult {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            passed: true,
            details: Vec::new(),
        }
    }

    fn info(&mut self, message: impl Into<String>) {
        self.details.push(CheckDetail::Info(message.into()));
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.details.push(CheckDetail::Warning(message.into()));
    }

    fn problem(&mut self, message: impl Into<String>) {
        self.passed = false;
        self.details.push(CheckDetail::Problem(message.into()));
    }
}

/// All check results, in the order they ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn is_success(&self) -> bool {
        self.passed() == self.total()
    }
}

/// Runs the self-check. `client` is `None` when no token is configured; the
/// checks that need GitHub then fail without making calls.
pub struct Doctor<'a, C> {
    client: Option<&'a C>,
    settings: &'a Settings,
}

impl<'a, C> Doctor<'a, C>
where
    C: RepositoryClient + UserClient,
{
    pub fn new(client: Option<&'a C>, settings: &'a Settings) -> Self {
        Self { client, settings }
    }

    pub async fn run(&self) -> DoctorReport {
        let checks = vec![
            self.check_environment(),
            self.check_connectivity().await,
            self.check_template().await,
            self.check_roster(),
            self.check_user_search().await,
        ];

        for check in &checks {
            if check.passed {
                info!(check = check.name, "Check passed");
            } else {
                warn!(check = check.name, "Check failed");
            }
        }

        DoctorReport { checks }
    }

    fn check_environment(&self) -> CheckResult {
        let mut result = CheckResult::new("Environment configuration");

        if self.settings.has_token() {
            result.info(format!("{} is set", GITHUB_TOKEN));
        } else {
            result.problem(format!("{} is not set", GITHUB_TOKEN));
        }

        if self.settings.organization.trim().is_empty() {
            result.problem(format!("{} is not set", GITHUB_ORG_NAME));
        } else {
            result.info(format!("Organization: {}", self.settings.organization));
        }

        result.info(format!(
            "Template repository: {}",
            self.settings.template_repository
        ));
        result.info(format!(
            "Roster file: {}",
            self.settings.roster.path.display()
        ));
        result
    }

    async fn check_connectivity(&self) -> CheckResult {
        let mut result = CheckResult::new("GitHub connectivity");
        let Some(client) = self.client else {
            result.problem("Skipped: no GitHub token configured");
            return result;
        };

        match client.get_authenticated_user().await {
            Ok(user) => result.info(format!("Connected as {}", user.login)),
            Err(e) => result.problem(format!("Authentication failed: {}", e)),
        }

        match client.get_organization(&self.settings.organization).await {
            Ok(org) => result.info(format!(
                "Organization access: {}",
                org.name.as_deref().unwrap_or(&org.login)
            )),
            Err(e) => result.problem(format!(
                "Cannot access organization '{}': {}",
                self.settings.organization, e
            )),
        }
        result
    }

    async fn check_template(&self) -> CheckResult {
        let mut result = CheckResult::new("Template repository");
        let Some(client) = self.client else {
            result.problem("Skipped: no GitHub token configured");
            return result;
        };

        let name = &self.settings.template_repository;
        match client
            .get_repository(&self.settings.organization, name)
            .await
        {
            Ok(template) => {
                result.info(format!("Found template repository: {}", template.full_name()));
                if !template.is_template() {
                    result.warning(format!(
                        "'{}' is not marked as a template repository",
                        name
                    ));
                }
            }
            Err(e) if e.is_not_found() => {
                result.problem(format!("Template repository '{}' not found", name));
            }
            Err(e) => result.problem(format!("Failed to fetch template repository: {}", e)),
        }
        result
    }

    fn check_roster(&self) -> CheckResult {
        let mut result = CheckResult::new("Roster file");
        let table = match RosterTable::load(&self.settings.roster.path) {
            Ok(table) => table,
            Err(e) => {
                result.problem(e.to_string());
                return result;
            }
        };

        result.info(format!("Loaded {} rows", table.len()));
        result.info(format!("Columns: {}", table.headers().join(", ")));

        match roster::derive_entries(&table, self.settings) {
            Ok(entries) => {
                for entry in entries.iter().take(SAMPLE_ROWS) {
                    let leader = entry
                        .leader
                        .as_ref()
                        .map(|l| l.to_string())
                        .unwrap_or_else(|| "(no leader)".to_string());
                    result.info(format!(
                        "{} -> {} (leader: {})",
                        entry.team_name, entry.repository_name, leader
                    ));
                }
            }
            Err(RosterError::MissingColumns { missing, .. }) => {
                result.problem(format!("Missing required columns: {}", missing.join(", ")));
            }
            Err(e) => result.problem(e.to_string()),
        }
        result
    }

    async fn check_user_search(&self) -> CheckResult {
        let mut result = CheckResult::new("User search");
        let Some(client) = self.client else {
            result.problem("Skipped: no GitHub token configured");
            return result;
        };

        match client.search_users(SEARCH_PROBE).await {
            Ok(users) => result.info(format!(
                "Search for '{}' returned {} result(s)",
                SEARCH_PROBE,
                users.len()
            )),
            Err(e) => result.problem(format!("User search failed: {}", e)),
        }
        result
    }
}
