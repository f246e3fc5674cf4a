use super::*;
use crate::test_support::*;

#[tokio::test]
async fn test_prefix_selection_excludes_template_and_other_repositories() {
    let client = MockGitHubClient::new()
        .with_template()
        .with_repository(repository("hackathon-team-alpha"))
        .with_repository(repository("hackathon-team-beta").with_archived(true))
        .with_repository(repository("website"));
    let settings = test_settings();

    let resolved = resolve_targets(&client, &settings, &Selection::Prefix(None))
        .await
        .unwrap();

    assert_eq!(
        resolved.names(),
        vec!["hackathon-team-alpha", "hackathon-team-beta"]
    );
    assert_eq!(resolved.skipped, 0);
    assert!(resolved.targets[1]
        .repository
        .as_ref()
        .is_some_and(|r| r.is_archived()));
}

#[tokio::test]
async fn test_prefix_matching_template_is_skipped() {
    let mut settings = test_settings();
    settings.template_repository = "hackathon-template".to_string();
    let client = MockGitHubClient::new()
        .with_repository(repository("hackathon-template").with_template(true))
        .with_repository(repository("hackathon-team-alpha"));

    let resolved = resolve_targets(&client, &settings, &Selection::Prefix(None))
        .await
        .unwrap();

    assert_eq!(resolved.names(), vec!["hackathon-team-alpha"]);
    assert_eq!(resolved.skipped, 1);
}

#[tokio::test]
async fn test_explicit_prefix_is_case_sensitive() {
    let client = MockGitHubClient::new()
        .with_repository(repository("demo-one"))
        .with_repository(repository("Demo-two"));
    let settings = test_settings();

    let resolved = resolve_targets(&client, &settings, &Selection::Prefix(Some("demo-".to_string())))
        .await
        .unwrap();

    assert_eq!(resolved.names(), vec!["demo-one"]);
}

#[tokio::test]
async fn test_blank_prefix_falls_back_to_configured_prefix() {
    let client = MockGitHubClient::new()
        .with_template()
        .with_repository(repository("hackathon-team-alpha"))
        .with_repository(repository("website"))
        .with_repository(repository("payments-service"));
    let settings = test_settings();

    for blank in ["", "   "] {
        let resolved = resolve_targets(&client, &settings, &Selection::Prefix(Some(blank.to_string())))
            .await
            .unwrap();

        assert_eq!(resolved.names(), vec!["hackathon-team-alpha"], "prefix {blank:?}");
    }
}

#[tokio::test]
async fn test_named_selection_skips_template() {
    let client = MockGitHubClient::new();
    let settings = test_settings();
    let selection = Selection::Named(vec![
        TEMPLATE.to_string(),
        "hackathon-team-alpha".to_string(),
    ]);

    let resolved = resolve_targets(&client, &settings, &selection).await.unwrap();

    assert_eq!(resolved.names(), vec!["hackathon-team-alpha"]);
    assert_eq!(resolved.skipped, 1);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_named_selection_requires_names() {
    let client = MockGitHubClient::new();
    let settings = test_settings();

    let result = resolve_targets(&client, &settings, &Selection::Named(vec![" ".to_string()])).await;

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}

#[tokio::test]
async fn test_roster_selection_reads_team_column() {
    let client = MockGitHubClient::new();
    let mut settings = test_settings();
    let _roster = write_roster(&mut settings, "team_name\nTeam Alpha\nTeam Beta\n");

    let resolved = resolve_targets(&client, &settings, &Selection::Roster)
        .await
        .unwrap();

    assert_eq!(
        resolved.names(),
        vec!["hackathon-team-alpha", "hackathon-team-beta"]
    );
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_listing_failure_is_propagated() {
    let client = MockGitHubClient::new();
    client.state().fail_listing = true;
    let settings = test_settings();

    let result = resolve_targets(&client, &settings, &Selection::Prefix(None)).await;

    assert!(matches!(result, Err(Error::GitHub(_))));
}

#[tokio::test]
async fn test_list_repositories_without_prefix_returns_everything() {
    let client = MockGitHubClient::new()
        .with_template()
        .with_repository(repository("website"));

    let repositories = list_repositories(&client, ORG, None).await.unwrap();

    assert_eq!(repositories.len(), 2);
}

#[test]
fn test_selection_is_batch() {
    assert!(Selection::Roster.is_batch());
    assert!(Selection::Prefix(None).is_batch());
    assert!(!Selection::Named(vec!["a".to_string()]).is_batch());
}
