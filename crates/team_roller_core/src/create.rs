//! Team repository creation.
//!
//! This module provides the [`RepositoryCreator`], which walks the roster in
//! order and makes sure every team has a repository with its leader added as a
//! collaborator. Existing repositories are reused, so a run can be repeated
//! after a partial failure.

use config_manager::Settings;
use github_client::{
    InvitationOutcome, Repository, RepositoryClient, RepositoryCreatePayload,
    TemplateGeneratePayload, User, UserClient, MEMBER_ROLE,
};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::errors::{Error, TeamRollerResult};
use crate::roster::{self, LeaderIdentifier, RosterEntry};
use crate::tally::BatchTally;
use crate::DEFAULT_ITEM_DELAY;

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;

/// Flavour of the create flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateMode {
    /// Create from the template only; a failed template creation fails the team.
    Full,
    /// Invite the leader to the organization first and fall back to an empty
    /// auto-initialised repository when the template cannot be used.
    QuickSetup,
}

/// Creates team repositories from the roster.
///
/// # Examples
///
/// ```rust,no_run
/// use config_manager::Settings;
/// use github_client::GitHubClient;
/// use team_roller_core::{CreateMode, RepositoryCreator};
///
/// # async fn example(client: GitHubClient, settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
/// let tally = RepositoryCreator::new(&client, &settings, CreateMode::Full)
///     .run()
///     .await?;
/// println!("Successful: {}, Failed: {}", tally.successful, tally.failed);
/// # Ok(())
/// # }
/// ```
pub struct RepositoryCreator<'a, C> {
    client: &'a C,
    settings: &'a Settings,
    mode: CreateMode,
    item_delay: Duration,
}

impl<'a, C> RepositoryCreator<'a, C>
where
    C: RepositoryClient + UserClient,
{
    pub fn new(client: &'a C, settings: &'a Settings, mode: CreateMode) -> Self {
        Self {
            client,
            settings,
            mode,
            item_delay: DEFAULT_ITEM_DELAY,
        }
    }

    /// Overrides the pause that follows every team.
    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    /// Loads the configured roster and processes every team in it.
    ///
    /// # Errors
    ///
    /// Roster problems are returned before any remote call is made. A failure to
    /// reach GitHub with the configured token is also returned. Failures of
    /// individual teams are counted in the returned [`BatchTally`] instead.
    pub async fn run(&self) -> TeamRollerResult<BatchTally> {
        let entries = roster::load_entries(self.settings)?;
        info!(
            teams = entries.len(),
            mode = ?self.mode,
            "Loaded teams from roster"
        );
        self.run_entries(&entries).await
    }

    /// Processes the given teams in order.
    pub async fn run_entries(&self, entries: &[RosterEntry]) -> TeamRollerResult<BatchTally> {
        let identity = self.client.get_authenticated_user().await?;
        info!(login = %identity.login, "Connected to GitHub as {}", identity.login);

        let template = self.find_template().await;
        let mut tally = BatchTally::new();

        for entry in entries {
            info!(
                team = %entry.team_name,
                repository = %entry.repository_name,
                leader = entry.leader.as_ref().map(LeaderIdentifier::as_str).unwrap_or_default(),
                "Processing team"
            );

            match self.process_entry(entry, template.as_ref()).await {
                Ok(()) => {
                    info!(team = %entry.team_name, "Successfully processed team");
                    tally.record_success();
                }
                Err(e) => {
                    error!(
                        team = %entry.team_name,
                        repository = %entry.repository_name,
                        error = %e,
                        "Failed to process team"
                    );
                    tally.record_failure(&entry.repository_name);
                }
            }

            tokio::time::sleep(self.item_delay).await;
        }

        info!(
            successful = tally.successful,
            failed = tally.failed,
            "Processing complete"
        );
        Ok(tally)
    }

    async fn find_template(&self) -> Option<Repository> {
        let name = &self.settings.template_repository;
        match self
            .client
            .get_repository(&self.settings.organization, name)
            .await
        {
            Ok(template) => {
                info!(template = %name, "Found template repository");
                Some(template)
            }
            Err(e) => {
                warn!(
                    template = %name,
                    error = %e,
                    "Template repository is not available"
                );
                None
            }
        }
    }

    async fn process_entry(
        &self,
        entry: &RosterEntry,
        template: Option<&Repository>,
    ) -> TeamRollerResult<()> {
        let leader = match self.mode {
            CreateMode::Full => None,
            CreateMode::QuickSetup => self.invite_leader(entry).await,
        };

        self.ensure_repository(entry, template).await?;

        let leader = match leader {
            Some(user) => user,
            None => self.resolve_leader(entry).await?,
        };

        let permission = self.settings.repository.permission;
        self.client
            .add_collaborator(
                &self.settings.organization,
                &entry.repository_name,
                &leader.login,
                permission.as_str(),
            )
            .await?;
        info!(
            user = %leader.login,
            repository = %entry.repository_name,
            permission = %permission,
            "Added leader to repository"
        );

        Ok(())
    }

    /// Invites the leader to the organization. Every failure here is a warning;
    /// the repository is still created and the collaborator step decides the outcome.
    async fn invite_leader(&self, entry: &RosterEntry) -> Option<User> {
        let leader = match self.resolve_leader(entry).await {
            Ok(user) => user,
            Err(e) => {
                warn!(
                    team = %entry.team_name,
                    error = %e,
                    "Could not resolve leader for the organization invitation, continuing"
                );
                return None;
            }
        };

        match self
            .client
            .invite_organization_member(&self.settings.organization, leader.id, MEMBER_ROLE)
            .await
        {
            Ok(InvitationOutcome::Invited) => {
                info!(user = %leader.login, role = MEMBER_ROLE, "Invited user to organization");
            }
            Ok(InvitationOutcome::AlreadyMember) => {
                info!(user = %leader.login, "User is already a member of the organization");
            }
            Err(e) => {
                warn!(
                    user = %leader.login,
                    error = %e,
                    "Failed to invite user to organization, continuing"
                );
            }
        }

        Some(leader)
    }

    async fn ensure_repository(
        &self,
        entry: &RosterEntry,
        template: Option<&Repository>,
    ) -> TeamRollerResult<Repository> {
        let org = &self.settings.organization;
        match self.client.get_repository(org, &entry.repository_name).await {
            Ok(existing) => {
                info!(
                    repository = %entry.repository_name,
                    team = %entry.team_name,
                    "Repository already exists, reusing it"
                );
                return Ok(existing);
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let from_template = match template {
            Some(template) => self.create_from_template(entry, template).await,
            None => Err(Error::TemplateNotFound {
                name: self.settings.template_repository.clone(),
            }),
        };

        match (from_template, self.mode) {
            (Ok(created), _) => Ok(created),
            (Err(e), CreateMode::Full) => Err(e),
            (Err(e), CreateMode::QuickSetup) => {
                warn!(
                    repository = %entry.repository_name,
                    error = %e,
                    "Template creation failed, falling back to an empty repository"
                );
                self.create_empty(entry).await
            }
        }
    }

    async fn create_from_template(
        &self,
        entry: &RosterEntry,
        template: &Repository,
    ) -> TeamRollerResult<Repository> {
        let defaults = &self.settings.repository;
        let payload = TemplateGeneratePayload {
            owner: self.settings.organization.clone(),
            name: entry.repository_name.clone(),
            description: Some(defaults.description_for(&entry.team_name)),
            private: Some(defaults.visibility.is_private()),
            include_all_branches: false,
        };

        let created = self
            .client
            .create_repository_from_template(&self.settings.organization, template.name(), &payload)
            .await?;
        info!(
            repository = %entry.repository_name,
            template = template.name(),
            url = created.url().map(String::from).unwrap_or_default(),
            "Created repository from template"
        );
        Ok(created)
    }

    async fn create_empty(&self, entry: &RosterEntry) -> TeamRollerResult<Repository> {
        let defaults = &self.settings.repository;
        let payload = RepositoryCreatePayload {
            name: entry.repository_name.clone(),
            description: Some(defaults.description_for(&entry.team_name)),
            private: Some(defaults.visibility.is_private()),
            auto_init: Some(true),
            ..Default::default()
        };

        let created = self
            .client
            .create_org_repository(&self.settings.organization, &payload)
            .await?;
        info!(
            repository = %entry.repository_name,
            url = created.url().map(String::from).unwrap_or_default(),
            "Created empty repository"
        );
        Ok(created)
    }

    async fn resolve_leader(&self, entry: &RosterEntry) -> TeamRollerResult<User> {
        let leader = entry.leader.as_ref().ok_or_else(|| Error::MissingLeader {
            team_name: entry.team_name.clone(),
        })?;
        resolve_user(self.client, leader).await
    }
}

/// Resolves a roster leader to a GitHub account.
///
/// A username is looked up directly. An email address is searched for; a
/// result is accepted when its public email matches the address (ignoring case)
/// or when GitHub does not expose an email for it. Results with a different
/// public email are passed over.
///
/// # Errors
///
/// Returns [`Error::LeaderNotFound`] when no acceptable account exists.
pub async fn resolve_user<C>(client: &C, leader: &LeaderIdentifier) -> TeamRollerResult<User>
where
    C: UserClient + ?Sized,
{
    match leader {
        LeaderIdentifier::Username(login) => client.get_user(login).await.map_err(|e| {
            if e.is_not_found() {
                Error::LeaderNotFound {
                    leader: login.clone(),
                }
            } else {
                e.into()
            }
        }),
        LeaderIdentifier::Email(address) => {
            let candidates = client.search_users(address).await?;
            candidates
                .into_iter()
                .find(|user| {
                    user.email
                        .as_deref()
                        .is_none_or(|email| email.eq_ignore_ascii_case(address))
                })
                .ok_or_else(|| Error::LeaderNotFound {
                    leader: address.clone(),
                })
        }
    }
}
