//! Self-check command module.
//!
//! Verifies the environment, GitHub access, the template repository, the
//! roster file and user search, without changing anything.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use github_client::GitHubClient;
use team_roller_core::{CheckDetail, Doctor, DoctorReport};
use tracing::warn;

use crate::commands::{connect, load_settings};
use crate::errors::Error;

#[cfg(test)]
#[path = "doctor_cmd_tests.rs"]
mod tests;

/// Command-line arguments for the doctor command.
#[derive(Args, Debug, Clone)]
pub struct DoctorArgs {
    /// Roster file to check instead of `EXCEL_FILE_PATH`.
    #[arg(long)]
    pub roster: Option<PathBuf>,
}

/// Runs every check and prints the report. Returns `Ok(true)` when all checks passed.
pub async fn execute(args: &DoctorArgs) -> Result<bool, Error> {
    let settings = load_settings(args.roster.as_deref())?;

    // A missing token is itself a check failure, not a reason to stop.
    let client: Option<GitHubClient> = if settings.has_token() {
        match connect(&settings) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "Could not create GitHub client");
                None
            }
        }
    } else {
        None
    };

    println!("🔍 Checking TeamRoller setup\n");
    let report = Doctor::new(client.as_ref(), &settings).run().await;
    print!("{}", format_report(&report));
    Ok(report.is_success())
}

/// Renders the report with coloured PASS/FAIL markers.
pub fn format_report(report: &DoctorReport) -> String {
    let mut output = String::new();
    for (index, check) in report.checks.iter().enumerate() {
        let status = if check.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        output.push_str(&format!(
            "{}. {} [{}]\n",
            index + 1,
            check.name.bold(),
            status
        ));

        for detail in &check.details {
            let line = match detail {
                CheckDetail::Info(message) => format!("   {} {}", "✓".green(), message),
                CheckDetail::Warning(message) => format!("   {} {}", "!".yellow(), message),
                CheckDetail::Problem(message) => format!("   {} {}", "✗".red(), message),
            };
            output.push_str(&line);
            output.push('\n');
        }
    }

    let summary = format!("{}/{} checks passed", report.passed(), report.total());
    if report.is_success() {
        output.push_str(&format!("\n✅ {}\n", summary.green().bold()));
    } else {
        output.push_str(&format!("\n❌ {}\n", summary.red().bold()));
    }
    output
}
