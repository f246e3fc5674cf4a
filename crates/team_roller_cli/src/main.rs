use std::io;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use team_roller_cli::commands::{
    archive_cmd::{self, ArchiveArgs},
    create_cmd::{self, CreateArgs},
    delete_cmd::{self, DeleteArgs},
    doctor_cmd::{self, DoctorArgs},
    sample_cmd::{self, SampleArgs},
};
use team_roller_cli::errors::Error;
use team_roller_cli::logging::init_logging;
use team_roller_core::is_affirmative;
use tracing::{error, warn};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// TeamRoller CLI: manage per-team GitHub repositories from a roster spreadsheet
#[derive(Parser)]
#[command(name = "team-roller", version)]
#[command(about = "Manage per-team GitHub repositories from a roster spreadsheet", long_about = None)]
struct Cli {
    /// Directory for the per-command log files.
    #[arg(long, global = true, default_value = ".")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a repository per team and add the team leaders
    Create(CreateArgs),

    /// Archive, unarchive or list team repositories
    Archive(ArchiveArgs),

    /// Permanently delete team repositories
    Delete(DeleteArgs),

    /// Check configuration, GitHub access and the roster without changing anything
    Doctor(DoctorArgs),

    /// Write a sample roster file
    SampleRoster(SampleArgs),
}

impl Commands {
    fn log_file_name(&self) -> Option<&'static str> {
        match self {
            Commands::Create(_) => Some("create.log"),
            Commands::Archive(_) => Some("archive.log"),
            Commands::Delete(_) => Some("delete.log"),
            Commands::Doctor(_) => Some("doctor.log"),
            Commands::SampleRoster(_) => None,
        }
    }
}

fn ask_user_for_value(request: &str) -> Result<String, Error> {
    print!("{}", request);

    io::stdout().flush().map_err(|_| Error::StdOutFlushFailed)?;

    let mut temp = String::new();
    io::stdin()
        .read_line(&mut temp)
        .map_err(|_| Error::StdInReadFailed)?;
    Ok(strip_line_ending(&temp).to_string())
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn confirm_on_stdin(prompt: &str) -> bool {
    match ask_user_for_value(&format!("⚠️  {}", prompt)) {
        Ok(answer) => is_affirmative(&answer),
        Err(e) => {
            warn!(error = %e, "Could not read confirmation, treating it as declined");
            false
        }
    }
}

#[tokio::main]
async fn main() {
    // Values already in the environment win over the .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_dir, cli.command.log_file_name()) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }

    let result = match &cli.command {
        Commands::Create(args) => create_cmd::execute(args).await,
        Commands::Archive(args) => archive_cmd::execute(args).await,
        Commands::Delete(args) => delete_cmd::execute(args, &confirm_on_stdin).await,
        Commands::Doctor(args) => doctor_cmd::execute(args).await,
        Commands::SampleRoster(args) => sample_cmd::execute(args),
    };

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Error: {e}");
            println!("❌ Error: {e}");
            std::process::exit(1);
        }
    }
}
