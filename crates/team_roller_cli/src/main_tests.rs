use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_log_dir_defaults_to_current_directory() {
    let cli = Cli::try_parse_from(["team-roller", "doctor"]).unwrap();

    assert_eq!(cli.log_dir, PathBuf::from("."));
    assert_eq!(cli.command.log_file_name(), Some("doctor.log"));
}

#[test]
fn test_log_dir_is_accepted_after_subcommand() {
    let cli = Cli::try_parse_from(["team-roller", "archive", "--mode", "list", "--log-dir", "logs"]).unwrap();

    assert_eq!(cli.log_dir, PathBuf::from("logs"));
    assert_eq!(cli.command.log_file_name(), Some("archive.log"));
}

#[test]
fn test_each_lifecycle_command_has_its_own_log_file() {
    let cases = [
        (vec!["team-roller", "create"], Some("create.log")),
        (vec!["team-roller", "delete", "--mode", "list"], Some("delete.log")),
        (vec!["team-roller", "sample-roster"], None),
    ];

    for (argv, expected) in cases {
        let cli = Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.command.log_file_name(), expected);
    }
}

#[test]
fn test_sample_roster_default_output() {
    let cli = Cli::try_parse_from(["team-roller", "sample-roster"]).unwrap();

    match cli.command {
        Commands::SampleRoster(args) => assert_eq!(args.output, PathBuf::from("teams_data.csv")),
        _ => panic!("Expected sample-roster command"),
    }
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["team-roller", "launch"]).is_err());
}

#[test]
fn test_confirmation_answer_keeps_everything_but_the_line_ending() {
    assert_eq!(strip_line_ending("yes\n"), "yes");
    assert_eq!(strip_line_ending("yes\r\n"), "yes");
    assert_eq!(strip_line_ending(" yes \n"), " yes ");

    assert!(is_affirmative(strip_line_ending("YES\r\n")));
    assert!(!is_affirmative(strip_line_ending(" yes\n")));
}
