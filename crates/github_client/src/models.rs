//! # Models
//!
//! Data models returned by the GitHub client.
//!
//! These types are deserialized straight from the GitHub REST API responses and keep only
//! the fields the lifecycle tooling needs. Unknown fields are ignored and missing optional
//! flags fall back to their GitHub defaults.

use serde::{Deserialize, Serialize};
use url::Url;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub organization.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Organization;
///
/// let org = Organization {
///     login: "my-organization".to_string(),
///     name: None,
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// The login (URL slug) of the organization
    pub login: String,
    /// The display name of the organization, if one is set
    #[serde(default)]
    pub name: Option<String>,
}

/// Represents a GitHub repository.
///
/// This struct contains the information about a repository that the lifecycle
/// operations need: its name, visibility and the archived and template flags.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Repository;
///
/// let repo = Repository::new(
///     "hackathon-team-alpha".to_string(),
///     "my-org/hackathon-team-alpha".to_string(),
///     true,
/// )
/// .with_archived(true);
///
/// assert_eq!(repo.name(), "hackathon-team-alpha");
/// assert!(repo.is_archived());
/// assert!(!repo.is_template());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// The full name of the repository (owner/name)
    #[serde(default)]
    full_name: Option<String>,
    /// The name of the repository
    name: String,
    /// Whether the repository is private
    #[serde(default)]
    private: bool,
    /// Whether the repository is archived (read-only)
    #[serde(default)]
    archived: bool,
    /// Whether the repository is marked as a template repository
    #[serde(default)]
    is_template: bool,
    /// The repository description
    #[serde(default)]
    description: Option<String>,
}

impl Repository {
    /// Creates a new, unarchived, non-template Repository instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the repository
    /// * `full_name` - The full name including owner (owner/repo)
    /// * `private` - Whether the repository is private
    pub fn new(name: String, full_name: String, private: bool) -> Self {
        Self {
            full_name: Some(full_name),
            name,
            private,
            archived: false,
            is_template: false,
            description: None,
        }
    }

    /// Returns a copy of this repository with the archived flag set.
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Returns a copy of this repository with the template flag set.
    pub fn with_template(mut self, is_template: bool) -> Self {
        self.is_template = is_template;
        self
    }

    /// Returns a copy of this repository with the given description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the name of the repository.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full name of the repository (`owner/name`).
    ///
    /// Falls back to the bare name when GitHub did not report a full name.
    pub fn full_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns the repository description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the repository is private.
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Returns whether the repository is archived.
    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns whether the repository is flagged as a template repository.
    pub fn is_template(&self) -> bool {
        self.is_template
    }

    /// Returns the web URL for the repository.
    ///
    /// Returns `None` if the full name cannot be formatted into a valid URL, which only
    /// happens for names GitHub would have rejected in the first place.
    pub fn url(&self) -> Option<Url> {
        Url::parse(&format!("https://github.com/{}", self.full_name())).ok()
    }
}

/// Represents a GitHub user account.
///
/// The `email` field is only populated when the user made their email address public,
/// so it is absent for most accounts returned by the search API.
///
/// # Examples
///
/// ```rust
/// use github_client::models::User;
///
/// let user = User {
///     id: 12345,
///     login: "octocat".to_string(),
///     email: None,
/// };
///
/// println!("User: {} (ID: {})", user.login, user.id);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// The unique numeric ID of the user
    pub id: u64,
    /// The login name of the user
    pub login: String,
    /// The public email address of the user
    #[serde(default)]
    pub email: Option<String>,
}

/// Outcome of an organization invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationOutcome {
    /// A new invitation was sent.
    Invited,
    /// GitHub reported that the user is already a member (or already invited).
    AlreadyMember,
}
