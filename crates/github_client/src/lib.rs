//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for making authenticated requests to GitHub with a
//! personal access token. It covers the repository lifecycle calls used by the team
//! tooling (listing, creating from a template, archiving, deleting, adding collaborators)
//! and the user and organization lookups needed to resolve team leaders.
//!
//! The operations are exposed through two traits, [`RepositoryClient`] and [`UserClient`],
//! so that callers can be tested against in-memory implementations.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{InvitationOutcome, Organization, Repository, User};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Number of items requested per page when listing repositories.
const PAGE_SIZE: u8 = 100;

/// Organization role GitHub uses for a plain (non-admin) member invitation.
pub const MEMBER_ROLE: &str = "direct_member";

/// A client for interacting with the GitHub API, authenticated with a personal access token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already configured `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Creates a new `GitHubClient` authenticated with the given personal access token.
    ///
    /// # Errors
    /// Returns an `Error::AuthError` if the underlying HTTP client cannot be built.
    pub fn from_token(token: &str) -> Result<Self, Error> {
        Ok(Self::new(create_token_client(token)?))
    }
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self), fields(org_name = %org_name))]
    async fn list_org_repositories(&self, org_name: &str) -> Result<Vec<Repository>, Error> {
        let path = format!("/orgs/{}/repos", org_name);
        let mut repositories = Vec::new();
        let mut page = 1u32;

        loop {
            debug!(org_name = org_name, page = page, "Fetching page of repositories");

            let params = ListRepositoriesParams {
                r#type: "all",
                per_page: PAGE_SIZE,
                page,
            };
            let response: OctocrabResult<Vec<Repository>> =
                self.client.get(&path, Some(&params)).await;

            let items = response
                .map_err(|e| classify_octocrab_error("Failed to list organization repositories", e))?;

            let count = items.len();
            repositories.extend(items);

            if count < PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        info!(
            org_name = org_name,
            count = repositories.len(),
            "Listed organization repositories"
        );
        Ok(repositories)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, Error> {
        let path = format!("/repos/{}/{}", owner, repo);
        let response: OctocrabResult<Repository> = self.client.get(path, None::<&()>).await;
        response.map_err(|e| classify_octocrab_error("Failed to get repository", e))
    }

    #[instrument(skip(self, payload), fields(template_owner = %template_owner, template_repo = %template_repo, name = %payload.name))]
    async fn create_repository_from_template(
        &self,
        template_owner: &str,
        template_repo: &str,
        payload: &TemplateGeneratePayload,
    ) -> Result<Repository, Error> {
        let path = format!("/repos/{}/{}/generate", template_owner, template_repo);
        let response: OctocrabResult<Repository> = self.client.post(path, Some(payload)).await;
        response.map_err(|e| classify_octocrab_error("Failed to create repository from template", e))
    }

    #[instrument(skip(self, payload), fields(org_name = %org_name, name = %payload.name))]
    async fn create_org_repository(
        &self,
        org_name: &str,
        payload: &RepositoryCreatePayload,
    ) -> Result<Repository, Error> {
        let path = format!("/orgs/{}/repos", org_name);
        let response: OctocrabResult<Repository> = self.client.post(path, Some(payload)).await;
        response.map_err(|e| classify_octocrab_error("Failed to create repository for organisation", e))
    }

    #[instrument(skip(self, settings), fields(owner = %owner, repo = %repo))]
    async fn update_repository_settings(
        &self,
        owner: &str,
        repo: &str,
        settings: &RepositorySettingsUpdate,
    ) -> Result<Repository, Error> {
        let path = format!("/repos/{}/{}", owner, repo);
        let response: OctocrabResult<Repository> = self.client.patch(path, Some(settings)).await;
        response.map_err(|e| classify_octocrab_error("Failed to update repository settings", e))
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn delete_repository(&self, owner: &str, repo: &str) -> Result<(), Error> {
        self.client
            .repos(owner, repo)
            .delete()
            .await
            .map_err(|e| classify_octocrab_error("Failed to delete repository", e))
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, username = %username))]
    async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
        permission: &str,
    ) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/collaborators/{}", owner, repo, username);
        let body = CollaboratorPayload { permission };

        // GitHub answers 201 with an invitation body, or 204 with no body when the user
        // already has access through the organization.
        let response = self
            .client
            ._put(path, Some(&body))
            .await
            .map_err(|e| classify_octocrab_error("Failed to add collaborator", e))?;
        octocrab::map_github_error(response)
            .await
            .map_err(|e| classify_octocrab_error("Failed to add collaborator", e))?;

        Ok(())
    }
}

#[async_trait]
impl UserClient for GitHubClient {
    #[instrument(skip(self))]
    async fn get_authenticated_user(&self) -> Result<User, Error> {
        let response: OctocrabResult<User> = self.client.get("/user", None::<&()>).await;
        response.map_err(|e| classify_octocrab_error("Failed to get the authenticated user", e))
    }

    #[instrument(skip(self), fields(org_name = %org_name))]
    async fn get_organization(&self, org_name: &str) -> Result<Organization, Error> {
        let path = format!("/orgs/{}", org_name);
        let response: OctocrabResult<Organization> = self.client.get(path, None::<&()>).await;
        response.map_err(|e| classify_octocrab_error("Failed to get organization information", e))
    }

    #[instrument(skip(self), fields(username = %username))]
    async fn get_user(&self, username: &str) -> Result<User, Error> {
        let path = format!("/users/{}", username);
        let response: OctocrabResult<User> = self.client.get(path, None::<&()>).await;
        response.map_err(|e| classify_octocrab_error("Failed to get user", e))
    }

    #[instrument(skip(self))]
    async fn search_users(&self, query: &str) -> Result<Vec<User>, Error> {
        let params = SearchParams {
            q: query,
            per_page: PAGE_SIZE,
        };
        let response: OctocrabResult<SearchUsersResponse> =
            self.client.get("/search/users", Some(&params)).await;
        let result =
            response.map_err(|e| classify_octocrab_error("Failed to search for users", e))?;

        debug!(
            total_count = result.total_count,
            returned = result.items.len(),
            "User search completed"
        );
        Ok(result.items)
    }

    #[instrument(skip(self), fields(org_name = %org_name, user_id = user_id))]
    async fn invite_organization_member(
        &self,
        org_name: &str,
        user_id: u64,
        role: &str,
    ) -> Result<InvitationOutcome, Error> {
        let path = format!("/orgs/{}/invitations", org_name);
        let payload = InvitationPayload {
            invitee_id: user_id,
            role,
        };
        let response: OctocrabResult<serde_json::Value> =
            self.client.post(path, Some(&payload)).await;

        match response {
            Ok(_) => Ok(InvitationOutcome::Invited),
            Err(e) => match classify_octocrab_error("Failed to invite organization member", e) {
                Error::Validation(message) if is_already_member_message(&message) => {
                    Ok(InvitationOutcome::AlreadyMember)
                }
                other => Err(other),
            },
        }
    }
}

/// Trait for repository operations (listing, creation, settings, deletion, collaborators).
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Lists every repository owned by an organization, following pagination.
    ///
    /// Repositories are returned in the order GitHub lists them.
    async fn list_org_repositories(&self, org_name: &str) -> Result<Vec<Repository>, Error>;

    /// Fetches details for a specific repository.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the repository does not exist or is not visible.
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, Error>;

    /// Creates a new repository from a template repository.
    ///
    /// The new repository inherits the template's files and branches layout.
    async fn create_repository_from_template(
        &self,
        template_owner: &str,
        template_repo: &str,
        payload: &TemplateGeneratePayload,
    ) -> Result<Repository, Error>;

    /// Creates a new repository within a specified organization.
    async fn create_org_repository(
        &self,
        org_name: &str,
        payload: &RepositoryCreatePayload,
    ) -> Result<Repository, Error>;

    /// Updates settings for a specific repository.
    ///
    /// Only the fields provided in the `settings` argument will be updated.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `settings` - A `RepositorySettingsUpdate` struct containing the desired changes.
    async fn update_repository_settings(
        &self,
        owner: &str,
        repo: &str,
        settings: &RepositorySettingsUpdate,
    ) -> Result<Repository, Error>;

    /// Permanently deletes a repository.
    async fn delete_repository(&self, owner: &str, repo: &str) -> Result<(), Error>;

    /// Adds a user as a collaborator on a repository with the given permission
    /// (`pull`, `triage`, `push`, `maintain` or `admin`).
    async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        username: &str,
        permission: &str,
    ) -> Result<(), Error>;
}

/// Trait for user and organization lookups.
#[async_trait]
pub trait UserClient: Send + Sync {
    /// Returns the account the client is authenticated as.
    async fn get_authenticated_user(&self) -> Result<User, Error>;

    /// Fetches an organization, confirming the token can see it.
    async fn get_organization(&self, org_name: &str) -> Result<Organization, Error>;

    /// Fetches a user by login.
    async fn get_user(&self, username: &str) -> Result<User, Error>;

    /// Runs a user search and returns the first page of results in ranking order.
    async fn search_users(&self, query: &str) -> Result<Vec<User>, Error>;

    /// Invites a user to an organization.
    ///
    /// An invitee who already belongs to the organization is reported as
    /// [`InvitationOutcome::AlreadyMember`] instead of an error.
    async fn invite_organization_member(
        &self,
        org_name: &str,
        user_id: u64,
        role: &str,
    ) -> Result<InvitationOutcome, Error>;
}

/// Represents the payload for creating a new repository via the REST API.
/// Use `Default::default()` and modify fields as needed.
#[derive(Serialize, Default, Debug, Clone)]
pub struct RepositoryCreatePayload {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>, // Defaults to false if None

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>, // Creates an initial commit on the default branch

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
}

/// Represents the payload for generating a repository from a template.
#[derive(Serialize, Default, Debug, Clone)]
pub struct TemplateGeneratePayload {
    /// Organization or user that will own the new repository
    pub owner: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    /// Copy every branch of the template instead of only the default branch
    pub include_all_branches: bool,
}

/// Represents the settings that can be updated for a repository.
/// Use `Default::default()` and modify fields as needed.
#[derive(Serialize, Default, Debug)]
pub struct RepositorySettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

#[derive(Serialize)]
struct ListRepositoriesParams {
    r#type: &'static str,
    per_page: u8,
    page: u32,
}

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    per_page: u8,
}

#[derive(Deserialize)]
struct SearchUsersResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<User>,
}

#[derive(Serialize)]
struct CollaboratorPayload<'a> {
    permission: &'a str,
}

#[derive(Serialize)]
struct InvitationPayload<'a> {
    invitee_id: u64,
    role: &'a str,
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Errors
/// Returns an `Error::AuthError` if the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| {
            error!(error = %e, "Failed to build Octocrab client with a personal token");
            Error::AuthError(format!("Failed to build the GitHub client: {}", e))
        })
}

/// Returns `true` when a GitHub validation message says the invitee already belongs to
/// the organization.
fn is_already_member_message(message: &str) -> bool {
    let message = message.to_lowercase();
    ["already a member", "already a part of", "already exists", "already invited"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Logs an octocrab error and converts it into the crate error type.
///
/// HTTP status codes reported by GitHub decide the variant: 404 becomes `NotFound`,
/// 401 `AuthError`, 422 `Validation`, rate limit rejections `RateLimitExceeded`.
fn classify_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let status = source.status_code.as_u16();
            let mut detail = source.message.clone();
            if let Some(errors) = &source.errors {
                let reasons: Vec<String> = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                if !reasons.is_empty() {
                    detail = format!("{} ({})", detail, reasons.join("; "));
                }
            }

            match status {
                404 => {
                    debug!(status = status, error_message = detail, "{}. Not found", message);
                    Error::NotFound
                }
                401 => {
                    error!(status = status, error_message = detail, "{}. Bad credentials", message);
                    Error::AuthError(detail)
                }
                403 | 429 if detail.to_lowercase().contains("rate limit") => {
                    warn!(status = status, error_message = detail, "{}. Rate limited", message);
                    Error::RateLimitExceeded
                }
                422 => {
                    warn!(status = status, error_message = detail, "{}. Validation failed", message);
                    Error::Validation(detail)
                }
                _ => {
                    error!(
                        status = status,
                        error_message = detail,
                        backtrace = backtrace.to_string(),
                        "{}. Received an error from GitHub",
                        message
                    );
                    Error::ApiError(detail)
                }
            }
        }
        octocrab::Error::Json { source, .. } => {
            error!(error_message = source.to_string(), "{}. Invalid JSON response", message);
            Error::InvalidResponse
        }
        octocrab::Error::Serde { source, .. } => Error::Deserialization(source),
        other => {
            error!(error_message = other.to_string(), "{}", message);
            Error::ApiError(other.to_string())
        }
    }
}
