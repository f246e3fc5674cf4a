//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Raw `octocrab` errors are classified into these variants
//! once, at the client boundary, so callers can branch on the kind of failure (for instance
//! treating a missing repository as a per-item warning) without inspecting HTTP details.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.get_repository("my-org", "hackathon-team-alpha").await {
///     Ok(repo) => println!("Found {}", repo.name()),
///     Err(Error::NotFound) => eprintln!("Repository does not exist"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A GitHub API request failed for a reason not covered by a more specific variant.
    ///
    /// The contained string is the message reported by GitHub (or the transport layer).
    #[error("API request failed: {0}")]
    ApiError(String),

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The access token is invalid, expired or revoked
    /// - The token lacks the scopes needed for the request
    /// - The underlying HTTP client cannot be built
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// GitHub answers 404 both for resources that do not exist and for resources the
    /// current credentials cannot see.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// GitHub rejected the request payload (HTTP 422).
    ///
    /// Typical causes are invalid repository names, a name that is already taken, or an
    /// invitation for somebody who is already part of the organization.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl Error {
    /// Returns `true` when the error means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}
