//! Command modules for the TeamRoller CLI.
//!
//! Each submodule handles one subcommand:
//!
//! - `create_cmd`: create team repositories from the roster
//! - `archive_cmd`: archive, unarchive or list team repositories
//! - `delete_cmd`: delete or list team repositories
//! - `doctor_cmd`: run the read-only self-check
//! - `sample_cmd`: write a sample roster file
//!
//! The helpers in this module are shared by the commands that talk to GitHub.

use std::path::Path;

use config_manager::Settings;
use github_client::GitHubClient;
use secrecy::ExposeSecret;
use team_roller_core::BatchTally;

use crate::errors::Error;

pub mod archive_cmd;
pub mod create_cmd;
pub mod delete_cmd;
pub mod doctor_cmd;
pub mod sample_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Loads settings from the environment, replacing the roster path when `roster` is given.
pub fn load_settings(roster: Option<&Path>) -> Result<Settings, Error> {
    let settings = Settings::from_env()?;
    Ok(with_roster_override(settings, roster))
}

fn with_roster_override(mut settings: Settings, roster: Option<&Path>) -> Settings {
    if let Some(path) = roster {
        settings.roster.path = path.to_path_buf();
    }
    settings
}

/// Builds a GitHub client from the configured token.
pub fn connect(settings: &Settings) -> Result<GitHubClient, Error> {
    let token = settings.require_token()?;
    Ok(GitHubClient::from_token(token.expose_secret())?)
}

/// Renders the end-of-run summary printed by the batch commands.
pub fn format_tally(title: &str, tally: &BatchTally) -> String {
    let mut output = format!("\n📊 {} summary\n", title);
    output.push_str(&format!("   ✅ Successful: {}\n", tally.successful));
    output.push_str(&format!("   ❌ Failed: {}\n", tally.failed));
    if tally.skipped > 0 {
        output.push_str(&format!("   ⏭️  Skipped (template): {}\n", tally.skipped));
    }
    if !tally.failed_items.is_empty() {
        output.push_str(&format!(
            "   Failed repositories: {}\n",
            tally.failed_items.join(", ")
        ));
    }
    output
}
