use super::*;
use std::io::Write;
use std::path::PathBuf;

fn table(headers: &[&str], rows: &[&[&str]]) -> RosterTable {
    RosterTable::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

fn csv_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write roster");
    file
}

#[test]
fn test_leader_identifier_parse() {
    assert_eq!(
        LeaderIdentifier::parse("alice@example.com"),
        Some(LeaderIdentifier::Email("alice@example.com".to_string()))
    );
    assert_eq!(
        LeaderIdentifier::parse(" alice "),
        Some(LeaderIdentifier::Username("alice".to_string()))
    );
    assert_eq!(LeaderIdentifier::parse("   "), None);
}

#[test]
fn test_derive_entries_in_roster_order() {
    let settings = Settings::default();
    let roster = table(
        &["team_name", "leader_email"],
        &[&["Team Alpha", "alice"], &["Team Beta", "bob@example.com"]],
    );

    let entries = derive_entries(&roster, &settings).unwrap();

    assert_eq!(
        entries,
        vec![
            RosterEntry {
                team_name: "Team Alpha".to_string(),
                repository_name: "hackathon-team-alpha".to_string(),
                leader: Some(LeaderIdentifier::Username("alice".to_string())),
            },
            RosterEntry {
                team_name: "Team Beta".to_string(),
                repository_name: "hackathon-team-beta".to_string(),
                leader: Some(LeaderIdentifier::Email("bob@example.com".to_string())),
            },
        ]
    );
}

#[test]
fn test_derive_entries_missing_leader_column() {
    let settings = Settings::default();
    let roster = table(&["team_name", "notes"], &[&["Team Alpha", "x"]]);

    let result = derive_entries(&roster, &settings);

    match result {
        Err(RosterError::MissingColumns { missing, available }) => {
            assert_eq!(missing, vec!["leader_email".to_string()]);
            assert_eq!(available, vec!["team_name".to_string(), "notes".to_string()]);
        }
        other => panic!("Expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn test_derive_entries_missing_team_column() {
    let settings = Settings::default();
    let roster = table(&["leader_email"], &[&["alice"]]);

    let result = derive_entries(&roster, &settings);

    assert!(matches!(
        result,
        Err(RosterError::MissingColumns { ref missing, .. }) if missing == &vec!["team_name".to_string()]
    ));
}

#[test]
fn test_username_column_wins_over_leader_column() {
    let settings = Settings::default();
    let roster = table(
        &["team_name", "leader_email", "leader_username"],
        &[
            &["Team Alpha", "alice@example.com", "alice-gh"],
            &["Team Beta", "bob@example.com", ""],
        ],
    );

    let entries = derive_entries(&roster, &settings).unwrap();

    assert_eq!(
        entries[0].leader,
        Some(LeaderIdentifier::Username("alice-gh".to_string()))
    );
    assert_eq!(
        entries[1].leader,
        Some(LeaderIdentifier::Email("bob@example.com".to_string()))
    );
}

#[test]
fn test_username_column_alone_satisfies_leader_requirement() {
    let settings = Settings::default();
    let roster = table(&["team_name", "leader_username"], &[&["Team Alpha", "alice"]]);

    let entries = derive_entries(&roster, &settings).unwrap();

    assert_eq!(
        entries[0].leader,
        Some(LeaderIdentifier::Username("alice".to_string()))
    );
}

#[test]
fn test_blank_team_rows_are_skipped() {
    let settings = Settings::default();
    let roster = table(
        &["team_name", "leader_email"],
        &[&["", "nobody"], &["Team Gamma", ""]],
    );

    let entries = derive_entries(&roster, &settings).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].repository_name, "hackathon-team-gamma");
    assert_eq!(entries[0].leader, None);
}

#[test]
fn test_team_matching_template_is_skipped() {
    let mut settings = Settings::default();
    settings.template_repository = "hackathon-template".to_string();
    let roster = table(
        &["team_name", "leader_email"],
        &[&["Template", "alice"], &["Team Delta", "dan"]],
    );

    let entries = derive_entries(&roster, &settings).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].team_name, "Team Delta");
}

#[test]
fn test_headers_are_trimmed() {
    let settings = Settings::default();
    let roster = table(&[" team_name ", "leader_email "], &[&["Team Alpha", "alice"]]);

    assert_eq!(roster.column_index("team_name"), Some(0));
    assert!(derive_entries(&roster, &settings).is_ok());
}

#[test]
fn test_header_matching_is_case_sensitive() {
    let roster = table(&["Team_Name"], &[]);

    assert_eq!(roster.column_index("team_name"), None);
}

#[test]
fn test_derive_repository_names_only_needs_team_column() {
    let settings = Settings::default();
    let roster = table(&["team_name"], &[&["Team Alpha"], &[""], &["Team Beta"]]);

    let names = derive_repository_names(&roster, &settings).unwrap();

    assert_eq!(names, vec!["hackathon-team-alpha", "hackathon-team-beta"]);
}

#[test]
fn test_derive_repository_names_missing_team_column() {
    let settings = Settings::default();
    let roster = table(&["leader_email"], &[&["alice"]]);

    assert!(matches!(
        derive_repository_names(&roster, &settings),
        Err(RosterError::MissingColumns { .. })
    ));
}

#[test]
fn test_from_csv_reader_trims_cells_and_allows_short_rows() {
    let data = "team_name,leader_email\n Team Alpha , alice \nTeam Beta\n";

    let roster = RosterTable::from_csv_reader(data.as_bytes()).unwrap();

    assert_eq!(roster.headers(), &["team_name", "leader_email"]);
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.rows()[0], vec!["Team Alpha", "alice"]);
    assert_eq!(roster.rows()[1], vec!["Team Beta"]);
}

#[test]
fn test_from_range_uses_first_row_as_header() {
    let mut range = Range::new((0, 0), (2, 1));
    range.set_value((0, 0), Data::String("team_name".to_string()));
    range.set_value((0, 1), Data::String("leader_email".to_string()));
    range.set_value((1, 0), Data::String("Team Alpha".to_string()));
    range.set_value((1, 1), Data::String("alice".to_string()));
    range.set_value((2, 0), Data::Int(42));

    let roster = RosterTable::from_range(&range);

    assert_eq!(roster.headers(), &["team_name", "leader_email"]);
    assert_eq!(roster.rows()[0], vec!["Team Alpha", "alice"]);
    assert_eq!(roster.rows()[1], vec!["42", ""]);
}

#[test]
fn test_load_csv_file() {
    let file = csv_file("team_name,leader_email\nTeam Alpha,alice\n");

    let roster = RosterTable::load(file.path()).unwrap();

    assert_eq!(roster.len(), 1);
    assert_eq!(roster.column_index("leader_email"), Some(1));
}

#[test]
fn test_load_missing_file() {
    let path = PathBuf::from("definitely/not/here/teams.xlsx");

    let result = RosterTable::load(&path);

    assert!(matches!(result, Err(RosterError::FileNotFound { .. })));
}

#[test]
fn test_load_corrupt_workbook_is_read_error() {
    let mut file = tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(b"this is not a zip archive").unwrap();

    let result = RosterTable::load(file.path());

    assert!(matches!(result, Err(RosterError::Read { .. })));
}

#[test]
fn test_load_entries_uses_configured_path() {
    let file = csv_file("Team,Lead\nTeam Alpha,alice\n");
    let mut settings = Settings::default();
    settings.roster.path = file.path().to_path_buf();
    settings.roster.team_name_column = "Team".to_string();
    settings.roster.leader_column = "Lead".to_string();

    let entries = load_entries(&settings).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].repository_name, "hackathon-team-alpha");
}
