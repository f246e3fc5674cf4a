//! Target selection for the archive and delete flows.

use config_manager::Settings;
use github_client::{Repository, RepositoryClient};
use tracing::{info, warn};

use crate::errors::{Error, TeamRollerResult};
use crate::roster;

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;

/// How the repositories for a bulk operation are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Names derived from the configured roster.
    Roster,
    /// Every organization repository whose name starts with the prefix. `None`
    /// or a blank prefix uses the configured naming prefix.
    Prefix(Option<String>),
    /// An explicit list of repository names.
    Named(Vec<String>),
}

impl Selection {
    /// Whether this selection resolves to many repositories at once.
    pub fn is_batch(&self) -> bool {
        !matches!(self, Self::Named(_))
    }
}

/// A repository picked for an operation. Prefix selection already knows the
/// remote state; the other selections fetch it when the item is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub repository: Option<Repository>,
}

impl Target {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repository: None,
        }
    }
}

/// Selected targets plus the number of protected repositories left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTargets {
    pub targets: Vec<Target>,
    pub skipped: usize,
}

impl ResolvedTargets {
    pub fn names(&self) -> Vec<&str> {
        self.targets.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Resolves a selection into targets, removing the template repository.
///
/// # Errors
///
/// * Roster errors when the roster cannot be read or lacks the team column.
/// * GitHub errors when the organization listing fails.
/// * [`Error::InvalidArguments`] for an empty explicit list.
pub async fn resolve_targets<C>(
    client: &C,
    settings: &Settings,
    selection: &Selection,
) -> TeamRollerResult<ResolvedTargets>
where
    C: RepositoryClient + ?Sized,
{
    let candidates = match selection {
        Selection::Roster => roster::load_repository_names(settings)?
            .into_iter()
            .map(Target::named)
            .collect(),
        Selection::Prefix(prefix) => {
            let prefix = prefix
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(&settings.repository.prefix);
            list_repositories(client, &settings.organization, Some(prefix))
                .await?
                .into_iter()
                .map(|repository| Target {
                    name: repository.name().to_string(),
                    repository: Some(repository),
                })
                .collect()
        }
        Selection::Named(names) => {
            let names: Vec<&String> = names.iter().filter(|n| !n.trim().is_empty()).collect();
            if names.is_empty() {
                return Err(Error::InvalidArguments(
                    "at least one repository name is required".to_string(),
                ));
            }
            names.into_iter().map(|n| Target::named(n.trim())).collect()
        }
    };

    Ok(exclude_template(candidates, &settings.template_repository))
}

fn exclude_template(candidates: Vec<Target>, template: &str) -> ResolvedTargets {
    let mut resolved = ResolvedTargets::default();
    for target in candidates {
        if target.name == template {
            warn!(
                repository = %target.name,
                "Skipping template repository"
            );
            resolved.skipped += 1;
        } else {
            resolved.targets.push(target);
        }
    }
    resolved
}

/// Lists organization repositories, optionally keeping only names that start with `prefix`.
///
/// The prefix comparison is a plain, case-sensitive `starts_with`.
pub async fn list_repositories<C>(
    client: &C,
    organization: &str,
    prefix: Option<&str>,
) -> TeamRollerResult<Vec<Repository>>
where
    C: RepositoryClient + ?Sized,
{
    let repositories = client.list_org_repositories(organization).await?;
    let total = repositories.len();

    let selected: Vec<Repository> = match prefix {
        Some(prefix) => repositories
            .into_iter()
            .filter(|r| r.name().starts_with(prefix))
            .collect(),
        None => repositories,
    };

    info!(
        organization = organization,
        prefix = prefix.unwrap_or_default(),
        total = total,
        selected = selected.len(),
        "Listed organization repositories"
    );
    Ok(selected)
}
