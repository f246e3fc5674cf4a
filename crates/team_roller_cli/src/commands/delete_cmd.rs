//! Delete command module.
//!
//! Permanently deletes team repositories. Without `--force` every deletion must
//! be confirmed by typing `yes`: once for the whole list in `excel` and `prefix`
//! modes, once per repository in `specific` mode. The template repository is
//! never deleted.
//!
//! # Examples
//!
//! ```bash
//! team-roller delete --mode list
//! team-roller delete --mode prefix --prefix hackathon-
//! team-roller delete --mode specific --repos hackathon-team-alpha --force
//! ```

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use github_client::Repository;
use team_roller_core::{Confirm, RepositoryDeleter, Selection};
use tracing::{info, warn};

use crate::commands::{connect, format_tally, load_settings};
use crate::errors::Error;

#[cfg(test)]
#[path = "delete_cmd_tests.rs"]
mod tests;

/// How the delete command selects repositories.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteMode {
    /// Repositories derived from the roster's team names
    Excel,
    /// Repositories whose name starts with the prefix
    Prefix,
    /// Repositories given with --repos
    Specific,
    /// Print repositories and whether they can be deleted
    List,
}

/// Command-line arguments for the delete command.
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[arg(long, value_enum, default_value_t = DeleteMode::Excel)]
    pub mode: DeleteMode,

    /// Name prefix. Defaults to REPO_PREFIX when missing or blank.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Repository names for specific mode.
    #[arg(long, num_args = 1..)]
    pub repos: Vec<String>,

    /// Only list repositories, change nothing.
    #[arg(long)]
    pub list_only: bool,

    /// Delete without asking for confirmation.
    #[arg(long)]
    pub force: bool,

    /// Roster file to read instead of `EXCEL_FILE_PATH`.
    #[arg(long)]
    pub roster: Option<PathBuf>,
}

impl DeleteArgs {
    /// Returns the selection to delete, or `None` when only listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] for specific mode without `--repos`.
    pub fn selection(&self) -> Result<Option<Selection>, Error> {
        if self.list_only {
            return Ok(None);
        }

        match self.mode {
            DeleteMode::List => Ok(None),
            DeleteMode::Excel => Ok(Some(Selection::Roster)),
            DeleteMode::Prefix => Ok(Some(Selection::Prefix(self.prefix.clone()))),
            DeleteMode::Specific if self.repos.is_empty() => Err(Error::InvalidArguments(
                "--repos is required with --mode specific".to_string(),
            )),
            DeleteMode::Specific => Ok(Some(Selection::Named(self.repos.clone()))),
        }
    }
}

/// Runs the delete command, asking `confirm` before deleting unless `--force` is set.
pub async fn execute<P>(args: &DeleteArgs, confirm: &P) -> Result<bool, Error>
where
    P: Confirm,
{
    let selection = args.selection()?;
    let settings = load_settings(args.roster.as_deref())?;
    let client = connect(&settings)?;
    let deleter = RepositoryDeleter::new(&client, &settings, confirm).with_force(args.force);

    let Some(selection) = selection else {
        let repositories = deleter.list(args.prefix.as_deref()).await?;
        print!(
            "{}",
            format_delete_listing(&settings.organization, &repositories, |r| deleter
                .is_protected(r))
        );
        return Ok(true);
    };

    if args.force {
        warn!("Force flag set, deleting without confirmation");
    }
    info!(selection = ?selection, "Starting delete run");
    println!(
        "🗑️  Deleting repositories in '{}'. This cannot be undone.",
        settings.organization
    );

    let tally = deleter.run(&selection).await?;
    print!("{}", format_tally("Delete", &tally));
    Ok(tally.is_success())
}

/// Renders repositories with a `TEMPLATE` / `DELETABLE` status column.
pub fn format_delete_listing<F>(organization: &str, repositories: &[Repository], is_protected: F) -> String
where
    F: Fn(&Repository) -> bool,
{
    let mut output = format!(
        "📋 {} repositories in '{}':\n",
        repositories.len(),
        organization
    );
    for repository in repositories {
        let status = if is_protected(repository) {
            "TEMPLATE"
        } else {
            "DELETABLE"
        };
        output.push_str(&format!("  {:<45} {}\n", repository.name(), status));
    }
    output
}
