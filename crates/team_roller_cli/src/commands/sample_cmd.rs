//! Sample roster command module.
//!
//! Writes a small CSV roster using the configured column headers, as a
//! starting point for a real one.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Args;
use config_manager::RosterSettings;

use crate::commands::load_settings;
use crate::errors::Error;

#[cfg(test)]
#[path = "sample_cmd_tests.rs"]
mod tests;

/// Placeholder teams written to the sample roster.
pub const SAMPLE_TEAMS: [(&str, &str); 5] = [
    ("Team Alpha", "alpha.leader@example.com"),
    ("Team Beta", "beta.leader@example.com"),
    ("Team Gamma", "gamma.leader@example.com"),
    ("Team Delta", "delta.leader@example.com"),
    ("Team Epsilon", "epsilon.leader@example.com"),
];

/// Command-line arguments for the sample-roster command.
#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    /// Where to write the roster.
    #[arg(long, default_value = "teams_data.csv")]
    pub output: PathBuf,
}

/// Writes the sample roster to `args.output`.
pub fn execute(args: &SampleArgs) -> Result<bool, Error> {
    let settings = load_settings(None)?;
    let file = File::create(&args.output).map_err(Error::WriteFile)?;
    write_sample_roster(file, &settings.roster)?;

    println!("✅ Created sample roster: {}", args.output.display());
    println!("📊 Contains {} teams", SAMPLE_TEAMS.len());
    println!(
        "📝 Replace the leader email addresses with real GitHub accounts, then set EXCEL_FILE_PATH={}",
        args.output.display()
    );
    Ok(true)
}

/// Writes the header row and [`SAMPLE_TEAMS`] as CSV.
pub fn write_sample_roster<W: io::Write>(writer: W, columns: &RosterSettings) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        columns.team_name_column.as_str(),
        columns.leader_column.as_str(),
    ])?;
    for (team, leader) in SAMPLE_TEAMS {
        writer.write_record([team, leader])?;
    }
    writer
        .flush()
        .map_err(Error::WriteFile)
}
