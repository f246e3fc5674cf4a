use super::*;

#[test]
fn test_new_tally_is_not_a_success() {
    let tally = BatchTally::new();

    assert_eq!(tally.processed(), 0);
    assert!(!tally.is_success());
}

#[test]
fn test_partial_success_is_success() {
    let mut tally = BatchTally::new();
    tally.record_success();
    tally.record_failure("hackathon-team-beta");
    tally.record_skip();

    assert_eq!(tally.successful, 1);
    assert_eq!(tally.failed, 1);
    assert_eq!(tally.skipped, 1);
    assert_eq!(tally.processed(), 2);
    assert_eq!(tally.failed_items, vec!["hackathon-team-beta".to_string()]);
    assert!(tally.is_success());
}

#[test]
fn test_all_failed_is_not_success() {
    let mut tally = BatchTally::new();
    tally.record_failure("a");
    tally.record_failure("b");

    assert!(!tally.is_success());
}
