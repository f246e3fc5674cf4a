//! # TeamRoller Core
//!
//! This crate provides the repository lifecycle logic for TeamRoller, a tool that
//! manages one GitHub repository per team for events such as hackathons, driven
//! by a spreadsheet roster.
//!
//! ## Overview
//!
//! The roster is the source of truth for which teams exist. Each team name maps
//! to exactly one repository name through [`repository_name`], and that name is
//! the only link between a roster row and the repository on GitHub. From there
//! the crate offers four operations:
//!
//! 1. [`RepositoryCreator`] - create a repository per team from the template and
//!    add the team leader as a collaborator
//! 2. [`ArchiveManager`] - archive or unarchive team repositories
//! 3. [`RepositoryDeleter`] - delete team repositories behind a confirmation gate
//! 4. [`Doctor`] - check configuration, connectivity and inputs without changing anything
//!
//! ## Processing model
//!
//! Items are processed strictly one after another, in roster or listing order,
//! with a fixed pause after each item to stay clear of GitHub's rate limits.
//! Items are independent: a failure is counted in the [`BatchTally`] and the run
//! moves on. A run succeeds when at least one item succeeded.
//!
//! The template repository is never archived, unarchived or deleted, whichever
//! way the targets were selected.
//!
//! ## Examples
//!
//! ```no_run
//! use config_manager::Settings;
//! use github_client::GitHubClient;
//! use secrecy::ExposeSecret;
//! use team_roller_core::{ArchiveAction, ArchiveManager, Selection};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let client = GitHubClient::from_token(settings.require_token()?.expose_secret())?;
//!
//! let tally = ArchiveManager::new(&client, &settings)
//!     .run(ArchiveAction::Archive, &Selection::Prefix(None))
//!     .await?;
//! println!("Archived {} repositories", tally.successful);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

pub mod archive;
pub mod confirm;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod errors;
pub mod git_author;
pub mod naming;
pub mod roster;
pub mod selection;
pub mod tally;

#[cfg(test)]
mod test_support;

pub use archive::{ArchiveAction, ArchiveManager};
pub use confirm::{is_affirmative, Confirm};
pub use create::{resolve_user, CreateMode, RepositoryCreator};
pub use delete::RepositoryDeleter;
pub use doctor::{CheckDetail, CheckResult, Doctor, DoctorReport};
pub use errors::{Error, RosterError, TeamRollerResult};
pub use git_author::configure_global_git_author;
pub use naming::repository_name;
pub use roster::{LeaderIdentifier, RosterEntry, RosterTable};
pub use selection::Selection;
pub use tally::BatchTally;

/// Pause after every processed item.
pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_secs(1);
