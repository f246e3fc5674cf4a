//! Archive and unarchive of team repositories.

use config_manager::Settings;
use github_client::{Repository, RepositoryClient, RepositorySettingsUpdate};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::errors::TeamRollerResult;
use crate::selection::{self, Selection, Target};
use crate::tally::BatchTally;
use crate::DEFAULT_ITEM_DELAY;

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;

/// Direction of an archive run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveAction {
    Archive,
    Unarchive,
}

impl ArchiveAction {
    /// Value of the `archived` flag once the action has been applied.
    pub fn target_state(&self) -> bool {
        matches!(self, Self::Archive)
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Unarchive => "unarchive",
        }
    }
}

/// Toggles the archived flag of selected repositories.
///
/// Repositories already in the requested state are counted as successful
/// without a write. The template repository is never touched.
pub struct ArchiveManager<'a, C> {
    client: &'a C,
    settings: &'a Settings,
    item_delay: Duration,
}

impl<'a, C> ArchiveManager<'a, C>
where
    C: RepositoryClient,
{
    pub fn new(client: &'a C, settings: &'a Settings) -> Self {
        Self {
            client,
            settings,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }

    /// Overrides the pause that follows every repository.
    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    /// Applies `action` to every repository in `selection`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the selection itself cannot be resolved
    /// (unreadable roster, failed listing, empty explicit list).
    pub async fn run(
        &self,
        action: ArchiveAction,
        selection: &Selection,
    ) -> TeamRollerResult<BatchTally> {
        let resolved = selection::resolve_targets(self.client, self.settings, selection).await?;
        info!(
            action = action.verb(),
            repositories = resolved.targets.len(),
            skipped = resolved.skipped,
            "Resolved repositories"
        );

        let mut tally = BatchTally::new();
        for _ in 0..resolved.skipped {
            tally.record_skip();
        }

        for target in &resolved.targets {
            if self.apply(action, target).await {
                tally.record_success();
            } else {
                tally.record_failure(&target.name);
            }
            tokio::time::sleep(self.item_delay).await;
        }

        info!(
            action = action.verb(),
            successful = tally.successful,
            failed = tally.failed,
            skipped = tally.skipped,
            "Archive run complete"
        );
        Ok(tally)
    }

    /// Lists organization repositories, optionally filtered by prefix. Nothing is changed.
    pub async fn list(&self, prefix: Option<&str>) -> TeamRollerResult<Vec<Repository>> {
        selection::list_repositories(self.client, &self.settings.organization, prefix).await
    }

    async fn apply(&self, action: ArchiveAction, target: &Target) -> bool {
        let org = &self.settings.organization;
        let current = match &target.repository {
            Some(repository) => repository.is_archived(),
            None => match self.client.get_repository(org, &target.name).await {
                Ok(repository) => repository.is_archived(),
                Err(e) if e.is_not_found() => {
                    warn!(repository = %target.name, "Repository not found");
                    return false;
                }
                Err(e) => {
                    error!(repository = %target.name, error = %e, "Failed to fetch repository");
                    return false;
                }
            },
        };

        if current == action.target_state() {
            info!(
                repository = %target.name,
                archived = current,
                "Repository is already in the requested state"
            );
            return true;
        }

        let update = RepositorySettingsUpdate {
            archived: Some(action.target_state()),
            ..Default::default()
        };
        match self
            .client
            .update_repository_settings(org, &target.name, &update)
            .await
        {
            Ok(_) => {
                info!(repository = %target.name, action = action.verb(), "Updated repository");
                true
            }
            Err(e) if e.is_not_found() => {
                warn!(repository = %target.name, "Repository not found");
                false
            }
            Err(e) => {
                error!(
                    repository = %target.name,
                    action = action.verb(),
                    error = %e,
                    "Failed to update repository"
                );
                false
            }
        }
    }
}
