//! In-memory GitHub double shared by the orchestrator tests.

use async_trait::async_trait;
use github_client::{
    Error as GitHubError, InvitationOutcome, Organization, Repository, RepositoryClient,
    RepositoryCreatePayload, RepositorySettingsUpdate, TemplateGeneratePayload, User, UserClient,
};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use config_manager::Settings;

pub const ORG: &str = "test-org";
pub const TEMPLATE: &str = "hackathon_template";

/// Remote calls recorded by [`MockGitHubClient`], in the order they were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListOrgRepositories(String),
    GetRepository(String),
    CreateFromTemplate {
        template: String,
        name: String,
        description: Option<String>,
        private: Option<bool>,
    },
    CreateOrgRepository {
        name: String,
        auto_init: Option<bool>,
    },
    UpdateArchived {
        name: String,
        archived: Option<bool>,
    },
    DeleteRepository(String),
    AddCollaborator {
        repo: String,
        username: String,
        permission: String,
    },
    GetAuthenticatedUser,
    GetOrganization(String),
    GetUser(String),
    SearchUsers(String),
    InviteMember {
        user_id: u64,
        role: String,
    },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateFromTemplate { .. }
                | Call::CreateOrgRepository { .. }
                | Call::UpdateArchived { .. }
                | Call::DeleteRepository(_)
                | Call::AddCollaborator { .. }
                | Call::InviteMember { .. }
        )
    }
}

/// Configurable remote state behind the mock.
#[derive(Debug, Default)]
pub struct MockState {
    pub repositories: Vec<Repository>,
    pub users: Vec<User>,
    pub search_results: HashMap<String, Vec<User>>,
    pub authenticated: Option<User>,
    pub organization: Option<Organization>,
    pub members: HashSet<u64>,
    pub fail_listing: bool,
    pub fail_template_creation: bool,
    pub fail_collaborator_for: HashSet<String>,
    pub fail_delete_for: HashSet<String>,
    pub fail_search: bool,
    pub fail_invite: bool,
}

/// Hand-written implementation of both client traits backed by [`MockState`].
#[derive(Debug, Clone)]
pub struct MockGitHubClient {
    state: Arc<Mutex<MockState>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockGitHubClient {
    /// A client connected as `organizer` with access to [`ORG`] and nothing else.
    pub fn new() -> Self {
        let state = MockState {
            authenticated: Some(user(1, "organizer", None)),
            organization: Some(Organization {
                login: ORG.to_string(),
                name: Some("Test Organization".to_string()),
            }),
            ..MockState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_template(self) -> Self {
        self.with_repository(repository(TEMPLATE).with_template(true))
    }

    pub fn with_repository(self, repository: Repository) -> Self {
        self.state().repositories.push(repository);
        self
    }

    pub fn with_user(self, user: User) -> Self {
        self.state().users.push(user);
        self
    }

    pub fn with_search_results(self, query: &str, users: Vec<User>) -> Self {
        self.state()
            .search_results
            .insert(query.to_string(), users);
        self
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn repository(&self, name: &str) -> Option<Repository> {
        self.state()
            .repositories
            .iter()
            .find(|r| r.name() == name)
            .cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn insert_repository(&self, name: &str, private: bool) -> Result<Repository, GitHubError> {
        let mut state = self.state();
        if state.repositories.iter().any(|r| r.name() == name) {
            return Err(GitHubError::Validation(
                "name already exists on this account".to_string(),
            ));
        }
        let created = Repository::new(name.to_string(), format!("{ORG}/{name}"), private);
        state.repositories.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl RepositoryClient for MockGitHubClient {
    async fn list_org_repositories(&self, org_name: &str) -> Result<Vec<Repository>, GitHubError> {
        self.record(Call::ListOrgRepositories(org_name.to_string()));
        let state = self.state();
        if state.fail_listing {
            return Err(GitHubError::ApiError("listing failed".to_string()));
        }
        Ok(state.repositories.clone())
    }

    async fn get_repository(&self, _owner: &str, repo: &str) -> Result<Repository, GitHubError> {
        self.record(Call::GetRepository(repo.to_string()));
        self.repository(repo).ok_or(GitHubError::NotFound)
    }

    async fn create_repository_from_template(
        &self,
        _template_owner: &str,
        template_repo: &str,
        payload: &TemplateGeneratePayload,
    ) -> Result<Repository, GitHubError> {
        self.record(Call::CreateFromTemplate {
            template: template_repo.to_string(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            private: payload.private,
        });
        if self.state().fail_template_creation {
            return Err(GitHubError::ApiError("template generation failed".to_string()));
        }
        self.insert_repository(&payload.name, payload.private.unwrap_or(false))
    }

    async fn create_org_repository(
        &self,
        _org_name: &str,
        payload: &RepositoryCreatePayload,
    ) -> Result<Repository, GitHubError> {
        self.record(Call::CreateOrgRepository {
            name: payload.name.clone(),
            auto_init: payload.auto_init,
        });
        self.insert_repository(&payload.name, payload.private.unwrap_or(false))
    }

    async fn update_repository_settings(
        &self,
        _owner: &str,
        repo: &str,
        settings: &RepositorySettingsUpdate,
    ) -> Result<Repository, GitHubError> {
        self.record(Call::UpdateArchived {
            name: repo.to_string(),
            archived: settings.archived,
        });
        let mut state = self.state();
        let existing = state
            .repositories
            .iter_mut()
            .find(|r| r.name() == repo)
            .ok_or(GitHubError::NotFound)?;
        if let Some(archived) = settings.archived {
            *existing = existing.clone().with_archived(archived);
        }
        Ok(existing.clone())
    }

    async fn delete_repository(&self, _owner: &str, repo: &str) -> Result<(), GitHubError> {
        self.record(Call::DeleteRepository(repo.to_string()));
        let mut state = self.state();
        if state.fail_delete_for.contains(repo) {
            return Err(GitHubError::ApiError("Must have admin rights".to_string()));
        }
        let position = state
            .repositories
            .iter()
            .position(|r| r.name() == repo)
            .ok_or(GitHubError::NotFound)?;
        state.repositories.remove(position);
        Ok(())
    }

    async fn add_collaborator(
        &self,
        _owner: &str,
        repo: &str,
        username: &str,
        permission: &str,
    ) -> Result<(), GitHubError> {
        self.record(Call::AddCollaborator {
            repo: repo.to_string(),
            username: username.to_string(),
            permission: permission.to_string(),
        });
        let state = self.state();
        if state.fail_collaborator_for.contains(username) {
            return Err(GitHubError::ApiError("collaborator add failed".to_string()));
        }
        if !state.repositories.iter().any(|r| r.name() == repo) {
            return Err(GitHubError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserClient for MockGitHubClient {
    async fn get_authenticated_user(&self) -> Result<User, GitHubError> {
        self.record(Call::GetAuthenticatedUser);
        self.state()
            .authenticated
            .clone()
            .ok_or_else(|| GitHubError::AuthError("Bad credentials".to_string()))
    }

    async fn get_organization(&self, org_name: &str) -> Result<Organization, GitHubError> {
        self.record(Call::GetOrganization(org_name.to_string()));
        self.state()
            .organization
            .clone()
            .filter(|org| org.login == org_name)
            .ok_or(GitHubError::NotFound)
    }

    async fn get_user(&self, username: &str) -> Result<User, GitHubError> {
        self.record(Call::GetUser(username.to_string()));
        self.state()
            .users
            .iter()
            .find(|u| u.login.eq_ignore_ascii_case(username))
            .cloned()
            .ok_or(GitHubError::NotFound)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, GitHubError> {
        self.record(Call::SearchUsers(query.to_string()));
        let state = self.state();
        if state.fail_search {
            return Err(GitHubError::RateLimitExceeded);
        }
        Ok(state.search_results.get(query).cloned().unwrap_or_default())
    }

    async fn invite_organization_member(
        &self,
        _org_name: &str,
        user_id: u64,
        role: &str,
    ) -> Result<InvitationOutcome, GitHubError> {
        self.record(Call::InviteMember {
            user_id,
            role: role.to_string(),
        });
        let mut state = self.state();
        if state.fail_invite {
            return Err(GitHubError::ApiError("invitation failed".to_string()));
        }
        if state.members.insert(user_id) {
            Ok(InvitationOutcome::Invited)
        } else {
            Ok(InvitationOutcome::AlreadyMember)
        }
    }
}

pub fn user(id: u64, login: &str, email: Option<&str>) -> User {
    User {
        id,
        login: login.to_string(),
        email: email.map(str::to_string),
    }
}

pub fn repository(name: &str) -> Repository {
    Repository::new(name.to_string(), format!("{ORG}/{name}"), true)
}

/// Settings pointing at [`ORG`] with a token and a roster file that may not exist.
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.github_token = Some("ghp_test".to_string().into());
    settings.organization = ORG.to_string();
    settings.template_repository = TEMPLATE.to_string();
    settings
}

/// Writes a CSV roster and points the settings at it. Keep the file alive for the test.
pub fn write_roster(settings: &mut Settings, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create roster file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write roster file");
    settings.roster.path = file.path().to_path_buf();
    file
}

pub const NO_DELAY: Duration = Duration::ZERO;
