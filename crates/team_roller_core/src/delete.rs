//! Permanent deletion of team repositories.
//!
//! Deletion cannot be undone, so every run goes through a [`Confirm`] gate
//! unless it is forced. Batch selections (roster, prefix) are confirmed once
//! for the whole list; an explicit list is confirmed one repository at a time,
//! and only for repositories that exist.

use config_manager::Settings;
use github_client::{Repository, RepositoryClient};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::confirm::Confirm;
use crate::errors::TeamRollerResult;
use crate::selection::{self, ResolvedTargets, Selection};
use crate::tally::BatchTally;
use crate::DEFAULT_ITEM_DELAY;

#[cfg(test)]
#[path = "delete_tests.rs"]
mod tests;

/// Deletes selected repositories after confirmation.
pub struct RepositoryDeleter<'a, C, P> {
    client: &'a C,
    settings: &'a Settings,
    confirm: &'a P,
    force: bool,
    item_delay: Duration,
}

impl<'a, C, P> RepositoryDeleter<'a, C, P>
where
    C: RepositoryClient,
    P: Confirm,
{
    pub fn new(client: &'a C, settings: &'a Settings, confirm: &'a P) -> Self {
        Self {
            client,
            settings,
            confirm,
            force: false,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }

    /// Skips every confirmation prompt.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Overrides the pause that follows every repository.
    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    /// Deletes every repository in `selection` that the operator confirms.
    ///
    /// A declined batch deletes nothing and returns an empty tally. A declined
    /// item in an explicit list counts as a failure.
    ///
    /// # Errors
    ///
    /// Returns an error only when the selection itself cannot be resolved.
    pub async fn run(&self, selection: &Selection) -> TeamRollerResult<BatchTally> {
        let resolved = selection::resolve_targets(self.client, self.settings, selection).await?;
        let mut tally = BatchTally::new();
        for _ in 0..resolved.skipped {
            tally.record_skip();
        }

        if resolved.is_empty() {
            info!("No repositories selected for deletion");
            return Ok(tally);
        }

        let batch = selection.is_batch();
        if batch && !self.force && !self.confirm.confirm(&self.batch_prompt(&resolved)) {
            info!(
                repositories = resolved.targets.len(),
                "Deletion cancelled by operator"
            );
            return Ok(tally);
        }

        for target in &resolved.targets {
            if !batch && !self.exists(&target.name).await {
                tally.record_failure(&target.name);
                tokio::time::sleep(self.item_delay).await;
                continue;
            }

            let approved = self.force
                || batch
                || self.confirm.confirm(&format!(
                    "Are you sure you want to DELETE '{}/{}'? Type 'yes' to confirm: ",
                    self.settings.organization, target.name
                ));

            if !approved {
                info!(repository = %target.name, "Deletion of repository cancelled by operator");
                tally.record_failure(&target.name);
            } else if self.delete(&target.name).await {
                tally.record_success();
            } else {
                tally.record_failure(&target.name);
            }

            tokio::time::sleep(self.item_delay).await;
        }

        info!(
            successful = tally.successful,
            failed = tally.failed,
            skipped = tally.skipped,
            "Delete run complete"
        );
        Ok(tally)
    }

    /// Lists organization repositories, optionally filtered by prefix. Nothing is changed.
    pub async fn list(&self, prefix: Option<&str>) -> TeamRollerResult<Vec<Repository>> {
        selection::list_repositories(self.client, &self.settings.organization, prefix).await
    }

    /// Whether `repository` is the protected template repository.
    pub fn is_protected(&self, repository: &Repository) -> bool {
        repository.name() == self.settings.template_repository
    }

    fn batch_prompt(&self, resolved: &ResolvedTargets) -> String {
        let mut prompt = format!(
            "The following {} repositories in '{}' will be permanently deleted:\n",
            resolved.targets.len(),
            self.settings.organization
        );
        for name in resolved.names() {
            prompt.push_str(&format!("  - {}\n", name));
        }
        prompt.push_str(&format!(
            "Are you sure you want to DELETE {} repositories? Type 'yes' to confirm: ",
            resolved.targets.len()
        ));
        prompt
    }

    async fn exists(&self, name: &str) -> bool {
        match self
            .client
            .get_repository(&self.settings.organization, name)
            .await
        {
            Ok(_) => true,
            Err(e) if e.is_not_found() => {
                warn!(repository = name, "Repository not found");
                false
            }
            Err(e) => {
                error!(repository = name, error = %e, "Failed to fetch repository");
                false
            }
        }
    }

    async fn delete(&self, name: &str) -> bool {
        match self
            .client
            .delete_repository(&self.settings.organization, name)
            .await
        {
            Ok(()) => {
                info!(repository = name, "Deleted repository");
                true
            }
            Err(e) if e.is_not_found() => {
                warn!(repository = name, "Repository not found");
                false
            }
            Err(e) => {
                error!(repository = name, error = %e, "Failed to delete repository");
                false
            }
        }
    }
}
