//! Repository creation command module.
//!
//! Creates one repository per roster team and adds the team leader as a
//! collaborator. Two modes are available:
//!
//! - `full`: create from the template repository only
//! - `quick`: invite the leader to the organization first and fall back to an
//!   empty repository when the template cannot be used
//!
//! # Examples
//!
//! ```bash
//! team-roller create --mode full
//! team-roller create --mode quick --roster teams.csv --configure-git-author
//! ```

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use team_roller_core::{configure_global_git_author, CreateMode, RepositoryCreator};
use tracing::{info, warn};

use crate::commands::{connect, format_tally, load_settings};
use crate::errors::Error;

#[cfg(test)]
#[path = "create_cmd_tests.rs"]
mod tests;

/// Create flow selected on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateModeArg {
    /// Create from the template; template failures fail the team
    Full,
    /// Invite leaders and fall back to empty repositories
    Quick,
}

impl From<CreateModeArg> for CreateMode {
    fn from(mode: CreateModeArg) -> Self {
        match mode {
            CreateModeArg::Full => CreateMode::Full,
            CreateModeArg::Quick => CreateMode::QuickSetup,
        }
    }
}

/// Command-line arguments for the create command.
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Creation mode.
    #[arg(long, value_enum, default_value_t = CreateModeArg::Full)]
    pub mode: CreateModeArg,

    /// Roster file to read instead of `EXCEL_FILE_PATH`.
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Write SCRIPT_GIT_USER_NAME / SCRIPT_GIT_USER_EMAIL into the global git
    /// configuration before starting. Quick mode only.
    #[arg(long)]
    pub configure_git_author: bool,
}

/// Runs the create command. Returns `Ok(true)` when at least one team succeeded.
pub async fn execute(args: &CreateArgs) -> Result<bool, Error> {
    let settings = load_settings(args.roster.as_deref())?;
    let client = connect(&settings)?;

    if args.configure_git_author {
        match args.mode {
            CreateModeArg::Quick => {
                if let Err(e) = configure_global_git_author(&settings.git_author) {
                    warn!(error = %e, "Could not configure Git user");
                }
            }
            CreateModeArg::Full => {
                warn!("--configure-git-author only applies to quick mode, ignoring it");
            }
        }
    }

    println!(
        "🚀 Creating team repositories in '{}' from '{}'",
        settings.organization,
        settings.roster.path.display()
    );
    info!(mode = ?args.mode, "Starting repository creation");

    let tally = RepositoryCreator::new(&client, &settings, args.mode.into())
        .run()
        .await?;

    println!("{}", format_tally("Repository creation", &tally));
    if tally.is_success() {
        println!("✅ Repository creation completed");
    } else {
        println!("❌ No team was set up successfully");
    }
    Ok(tally.is_success())
}
