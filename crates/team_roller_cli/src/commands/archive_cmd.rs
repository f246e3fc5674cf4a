//! Archive command module.
//!
//! Archives (or unarchives) team repositories. Targets come from the roster,
//! a name prefix or an explicit list. `list` mode and `--list-only` only print
//! repositories with their archive status.
//!
//! # Examples
//!
//! ```bash
//! team-roller archive --mode excel
//! team-roller archive --mode prefix --prefix hackathon-
//! team-roller archive --mode specific --repos hackathon-team-alpha hackathon-team-beta
//! team-roller archive --mode unarchive --repos hackathon-team-alpha
//! team-roller archive --mode list
//! ```

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use github_client::Repository;
use team_roller_core::{ArchiveAction, ArchiveManager, Selection};
use tracing::info;

use crate::commands::{connect, format_tally, load_settings};
use crate::errors::Error;

#[cfg(test)]
#[path = "archive_cmd_tests.rs"]
mod tests;

/// How the archive command selects repositories.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveMode {
    /// Repositories derived from the roster's team names
    Excel,
    /// Repositories whose name starts with the prefix
    Prefix,
    /// Repositories given with --repos
    Specific,
    /// Print repositories and their archive status
    List,
    /// Unarchive --repos. Without --repos, unarchives EVERY repository whose name starts with the prefix
    Unarchive,
}

/// Command-line arguments for the archive command.
#[derive(Args, Debug, Clone)]
pub struct ArchiveArgs {
    #[arg(long, value_enum, default_value_t = ArchiveMode::Excel)]
    pub mode: ArchiveMode,

    /// Name prefix. Defaults to REPO_PREFIX when missing or blank.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Repository names for specific and unarchive modes.
    #[arg(long, num_args = 1..)]
    pub repos: Vec<String>,

    /// Only list repositories, change nothing.
    #[arg(long)]
    pub list_only: bool,

    /// Roster file to read instead of `EXCEL_FILE_PATH`.
    #[arg(long)]
    pub roster: Option<PathBuf>,
}

/// What the archive command will do, derived from its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchivePlan {
    List { prefix: Option<String> },
    Apply { action: ArchiveAction, selection: Selection },
}

impl ArchiveArgs {
    /// Translates the arguments into a plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] for specific mode without `--repos`.
    pub fn plan(&self) -> Result<ArchivePlan, Error> {
        if self.list_only {
            return Ok(ArchivePlan::List {
                prefix: self.prefix.clone(),
            });
        }

        let plan = match self.mode {
            ArchiveMode::List => ArchivePlan::List {
                prefix: self.prefix.clone(),
            },
            ArchiveMode::Excel => ArchivePlan::Apply {
                action: ArchiveAction::Archive,
                selection: Selection::Roster,
            },
            ArchiveMode::Prefix => ArchivePlan::Apply {
                action: ArchiveAction::Archive,
                selection: Selection::Prefix(self.prefix.clone()),
            },
            ArchiveMode::Specific => {
                if self.repos.is_empty() {
                    return Err(Error::InvalidArguments(
                        "--repos is required with --mode specific".to_string(),
                    ));
                }
                ArchivePlan::Apply {
                    action: ArchiveAction::Archive,
                    selection: Selection::Named(self.repos.clone()),
                }
            }
            ArchiveMode::Unarchive => ArchivePlan::Apply {
                action: ArchiveAction::Unarchive,
                selection: if self.repos.is_empty() {
                    Selection::Prefix(self.prefix.clone())
                } else {
                    Selection::Named(self.repos.clone())
                },
            },
        };
        Ok(plan)
    }
}

/// Runs the archive command. Returns `Ok(true)` on overall success.
pub async fn execute(args: &ArchiveArgs) -> Result<bool, Error> {
    let plan = args.plan()?;
    let settings = load_settings(args.roster.as_deref())?;
    let client = connect(&settings)?;
    let manager = ArchiveManager::new(&client, &settings);

    match plan {
        ArchivePlan::List { prefix } => {
            let repositories = manager.list(prefix.as_deref()).await?;
            print!("{}", format_archive_listing(&settings.organization, &repositories));
            Ok(true)
        }
        ArchivePlan::Apply { action, selection } => {
            info!(action = action.verb(), selection = ?selection, "Starting archive run");
            println!(
                "📦 Running {} on repositories in '{}'",
                action.verb(),
                settings.organization
            );
            let tally = manager.run(action, &selection).await?;
            print!("{}", format_tally(summary_title(action), &tally));
            Ok(tally.is_success())
        }
    }
}

fn summary_title(action: ArchiveAction) -> &'static str {
    match action {
        ArchiveAction::Archive => "Archive",
        ArchiveAction::Unarchive => "Unarchive",
    }
}

/// Renders repositories with an `ARCHIVED` / `ACTIVE` status column.
pub fn format_archive_listing(organization: &str, repositories: &[Repository]) -> String {
    let mut output = format!(
        "📋 {} repositories in '{}':\n",
        repositories.len(),
        organization
    );
    for repository in repositories {
        let status = if repository.is_archived() {
            "ARCHIVED"
        } else {
            "ACTIVE"
        };
        output.push_str(&format!("  {:<45} {}\n", repository.name(), status));
    }
    output
}
