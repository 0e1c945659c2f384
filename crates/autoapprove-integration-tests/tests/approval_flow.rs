//! Integration tests for the full approval flow.
//!
//! A pull request event and a recorded commit history go through the
//! runtime against a policy loaded from a checkout; only approvals reach the
//! hosting service.

mod common;

use autoapprove_config::Config;
use autoapprove_core::{Commit, FileChangeEvent, Rule};
use autoapprove_github::GithubError;
use autoapprove_runtime::{ApprovalRun, RuntimeError, load_policy, policy_from_config};

use common::{InMemoryHost, Review, event, repository, workspace_with};

const CONFIG_PATH: &str = ".github/autoapprove.json";

const POLICY: &str = r#"{
    "allowed-authors": ["dependabot[bot]"],
    "allowed-files": [
        ["schema/api.graphql", "schema/api.json"],
        ["CHANGELOG.md"]
    ]
}"#;

fn modified(files: &[&str]) -> Commit {
    Commit::new(files.iter().map(|f| FileChangeEvent::modified(*f)).collect())
}

// ---------------------------------------------------------------------------
// Approvals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_allowed_author_gets_review() {
    let dir = workspace_with(CONFIG_PATH, POLICY);
    let policy = load_policy(dir.path(), CONFIG_PATH).unwrap();

    let host = InMemoryHost::new(vec![modified(&["Cargo.lock"])]);
    let run = ApprovalRun::new(host, policy);

    let outcome = run
        .execute(&event(12, "Bump serde", "dependabot[bot]"), &repository())
        .await
        .unwrap();

    assert!(outcome.reviewed);
    assert_eq!(
        run.host().reviews(),
        vec![Review {
            repository: "octo/widgets".to_string(),
            number: 12,
            body: "Approved for login".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_whole_group_across_commits_gets_review() {
    let dir = workspace_with(CONFIG_PATH, POLICY);
    let policy = load_policy(dir.path(), CONFIG_PATH).unwrap();

    let host = InMemoryHost::new(vec![
        modified(&["schema/api.graphql"]),
        modified(&["schema/api.json", "CHANGELOG.md"]),
    ]);
    let run = ApprovalRun::new(host, policy);

    let outcome = run
        .execute(&event(5, "Regenerate schema", "alice"), &repository())
        .await
        .unwrap();

    assert_eq!(outcome.decision.rule, Rule::AllowedFiles);
    assert_eq!(run.host().reviews()[0].body, "Approved for files");
}

#[tokio::test]
async fn test_revert_wins_over_config_drift() {
    let dir = workspace_with(CONFIG_PATH, POLICY);
    let policy = load_policy(dir.path(), CONFIG_PATH).unwrap();

    let host = InMemoryHost::new(vec![modified(&[CONFIG_PATH])]);
    let run = ApprovalRun::new(host, policy);

    let outcome = run
        .execute(&event(9, "Revert \"Tighten policy\"", "alice"), &repository())
        .await
        .unwrap();

    assert_eq!(outcome.decision.rule, Rule::Revert);
    assert_eq!(
        run.host().reviews()[0].body,
        "Approved for revert pull request"
    );
}

// ---------------------------------------------------------------------------
// Skips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_config_drift_blocks_allowed_author() {
    let dir = workspace_with(CONFIG_PATH, POLICY);
    let policy = load_policy(dir.path(), CONFIG_PATH).unwrap();

    let host = InMemoryHost::new(vec![modified(&[CONFIG_PATH])]);
    let run = ApprovalRun::new(host, policy);

    let outcome = run
        .execute(&event(1, "Bump serde", "dependabot[bot]"), &repository())
        .await
        .unwrap();

    assert_eq!(outcome.decision.reason, "Auto-approve config changed");
    assert!(!outcome.reviewed);
    assert!(run.host().reviews().is_empty());
}

#[tokio::test]
async fn test_drift_detected_for_any_config_path_spelling() {
    for spelling in ["./.github/autoapprove.json", ".github//autoapprove.json"] {
        let dir = workspace_with(CONFIG_PATH, POLICY);
        let policy = load_policy(dir.path(), spelling).unwrap();
        assert_eq!(policy.config_path, CONFIG_PATH);

        let host = InMemoryHost::new(vec![modified(&[CONFIG_PATH])]);
        let run = ApprovalRun::new(host, policy);

        let outcome = run
            .execute(&event(1, "Loosen policy", "dependabot[bot]"), &repository())
            .await
            .unwrap();

        assert_eq!(outcome.decision.reason, "Auto-approve config changed", "{spelling}");
        assert!(run.host().reviews().is_empty());
    }
}

#[tokio::test]
async fn test_modify_after_remove_is_skipped() {
    let dir = workspace_with(CONFIG_PATH, POLICY);
    let policy = load_policy(dir.path(), CONFIG_PATH).unwrap();

    let host = InMemoryHost::new(vec![
        Commit::new(vec![FileChangeEvent::removed("CHANGELOG.md")]),
        modified(&["CHANGELOG.md"]),
    ]);
    let run = ApprovalRun::new(host, policy);

    let outcome = run
        .execute(&event(10, "Changelog", "alice"), &repository())
        .await
        .unwrap();

    assert_eq!(outcome.decision.rule, Rule::Default);
    assert!(outcome.state.removed.contains("CHANGELOG.md"));
    assert!(run.host().reviews().is_empty());
}

#[tokio::test]
async fn test_policy_file_renamed_away_is_drift() {
    let dir = workspace_with(CONFIG_PATH, POLICY);
    let policy = load_policy(dir.path(), CONFIG_PATH).unwrap();

    let host = InMemoryHost::new(vec![Commit::new(vec![FileChangeEvent::renamed(
        CONFIG_PATH,
        ".github/old-autoapprove.json",
    )])]);
    let run = ApprovalRun::new(host, policy);

    let outcome = run
        .execute(&event(2, "Move policy", "dependabot[bot]"), &repository())
        .await
        .unwrap();

    assert_eq!(outcome.decision.rule, Rule::ConfigChanged);
}

#[tokio::test]
async fn test_partial_group_is_skipped() {
    let dir = workspace_with(CONFIG_PATH, POLICY);
    let policy = load_policy(dir.path(), CONFIG_PATH).unwrap();

    let host = InMemoryHost::new(vec![modified(&["schema/api.graphql"])]);
    let run = ApprovalRun::new(host, policy);

    let outcome = run
        .execute(&event(4, "Tweak schema", "alice"), &repository())
        .await
        .unwrap();

    assert_eq!(outcome.decision.rule, Rule::Default);
    assert_eq!(outcome.decision.reason, "Skip auto-approve");
    assert!(run.host().reviews().is_empty());
}

#[tokio::test]
async fn test_added_then_removed_file_leaves_no_trace() {
    let dir = workspace_with(CONFIG_PATH, POLICY);
    let policy = load_policy(dir.path(), CONFIG_PATH).unwrap();

    let host = InMemoryHost::new(vec![
        Commit::new(vec![FileChangeEvent::added("scratch.txt")]),
        modified(&["CHANGELOG.md"]),
        Commit::new(vec![FileChangeEvent::removed("scratch.txt")]),
    ]);
    let run = ApprovalRun::new(host, policy);

    let outcome = run
        .execute(&event(8, "Changelog", "alice"), &repository())
        .await
        .unwrap();

    assert!(!outcome.state.touches("scratch.txt"));
    assert_eq!(outcome.decision.rule, Rule::AllowedFiles);
}

#[tokio::test]
async fn test_dry_run_never_reviews() {
    let host = InMemoryHost::new(vec![]);
    let run = ApprovalRun::new(host, policy_from_config(&Default::default())).dry_run(true);

    let outcome = run
        .execute(&event(3, "Empty", "alice"), &repository())
        .await
        .unwrap();

    assert!(outcome.decision.approve);
    assert!(!outcome.reviewed);
    assert!(run.host().reviews().is_empty());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_data_aborts_without_review() {
    let run = ApprovalRun::new(
        InMemoryHost::missing("commit has no files"),
        policy_from_config(&Default::default()),
    );

    let err = run
        .execute(&event(6, "Revert \"x\"", "alice"), &repository())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Github(GithubError::MissingData(_))
    ));
    assert!(run.host().reviews().is_empty());
}

#[test]
fn test_unreadable_policy_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_policy(dir.path(), CONFIG_PATH).unwrap_err();
    assert!(matches!(err, RuntimeError::Config(_)));
}

#[test]
fn test_empty_config_path_is_default_policy() {
    let dir = tempfile::tempdir().unwrap();
    let resolved = Config::load(dir.path(), "").unwrap();
    assert!(resolved.is_default());
    assert!(policy_from_config(&resolved).allowed_authors.is_empty());
}
