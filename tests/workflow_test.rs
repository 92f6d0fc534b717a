// tests/workflow_test.rs
use std::fs;
use std::path::PathBuf;

use revbump::cli::{run_release_workflow, ReleaseWorkflowArgs, Step, WorkflowOutcome};
use revbump::config::Config;
use revbump::git::{MockRepository, Operation, OperationKind};
use revbump::manifest::{JsonManifest, ManifestStore};
use revbump::ui::ScriptedPrompter;
use revbump::ReleaseError;
use tempfile::TempDir;

fn write_manifest(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("composer.json");
    fs::write(&path, content).expect("Could not write manifest");
    path
}

fn manifest_version(path: &PathBuf) -> String {
    JsonManifest::new(path)
        .load()
        .expect("Manifest should load")
        .version()
        .expect("Manifest should have a version")
}

fn interactive() -> ReleaseWorkflowArgs {
    ReleaseWorkflowArgs { auto: false }
}

#[test]
fn test_accepted_release_runs_every_step_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, r#"{"name":"vendor/package","version":"1.4.9"}"#);
    let manifest = JsonManifest::new(&path);
    let repo = MockRepository::new();
    let prompter = ScriptedPrompter::new([true]);
    let config = Config::default();

    let outcome =
        run_release_workflow(&interactive(), &config, &manifest, &repo, &prompter).unwrap();

    assert_eq!(manifest_version(&path), "1.4.10");
    assert_eq!(prompter.asked(), vec!["Use version 1.4.10?"]);
    assert_eq!(
        repo.operations(),
        vec![
            Operation::Add(path.clone()),
            Operation::Commit(config.git.commit_message.clone()),
            Operation::Push {
                remote: "upstream".to_string(),
                reference: "master".to_string(),
            },
            Operation::CreateTag("1.4.10".to_string()),
            Operation::Push {
                remote: "upstream".to_string(),
                reference: "1.4.10".to_string(),
            },
        ]
    );

    match outcome {
        WorkflowOutcome::Released(summary) => {
            assert_eq!(summary.previous_version, "1.4.9");
            assert_eq!(summary.version, "1.4.10");
            assert_eq!(summary.remote, "upstream");
            assert_eq!(summary.branch, "master");
        }
        other => panic!("Expected a release, got {:?}", other),
    }
}

#[test]
fn test_declined_release_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let original = "{\"name\": \"vendor/package\",    \"version\": \"1.4.9\"}";
    let path = write_manifest(&dir, original);
    let manifest = JsonManifest::new(&path);
    let repo = MockRepository::new();
    let prompter = ScriptedPrompter::new([false]);

    let outcome = run_release_workflow(
        &interactive(),
        &Config::default(),
        &manifest,
        &repo,
        &prompter,
    )
    .unwrap();

    assert_eq!(
        outcome,
        WorkflowOutcome::Declined {
            candidate: "1.4.10".to_string()
        }
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert!(repo.operations().is_empty());
}

#[test]
fn test_auto_mode_pads_two_segment_version_without_prompt() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, r#"{"version":"2.0"}"#);
    let manifest = JsonManifest::new(&path);
    let repo = MockRepository::new();
    let prompter = ScriptedPrompter::new([false]);

    let outcome = run_release_workflow(
        &ReleaseWorkflowArgs { auto: true },
        &Config::default(),
        &manifest,
        &repo,
        &prompter,
    )
    .unwrap();

    assert!(matches!(outcome, WorkflowOutcome::Released(_)));
    assert!(prompter.asked().is_empty());
    assert_eq!(manifest_version(&path), "2.0.0");
    assert!(repo
        .operations()
        .contains(&Operation::CreateTag("2.0.0".to_string())));
}

#[test]
fn test_branch_push_failure_stops_before_tagging() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, r#"{"version":"1.4.9"}"#);
    let manifest = JsonManifest::new(&path);
    let repo = MockRepository::new().fail_on_push_of("master");
    let prompter = ScriptedPrompter::new([true]);

    let err = run_release_workflow(
        &interactive(),
        &Config::default(),
        &manifest,
        &repo,
        &prompter,
    )
    .unwrap_err();

    assert_eq!(err.failed_step(), Some(Step::PushBranch));
    assert!(err.to_string().contains("push branch"));

    let kinds: Vec<OperationKind> = repo.operations().iter().map(Operation::kind).collect();
    assert_eq!(
        kinds,
        vec![OperationKind::Add, OperationKind::Commit, OperationKind::Push]
    );

    // Earlier steps stay applied
    assert_eq!(manifest_version(&path), "1.4.10");
}

#[test]
fn test_commit_failure_is_reported_as_commit_step() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, r#"{"version":"0.1.0"}"#);
    let repo = MockRepository::new().fail_on(OperationKind::Commit);

    let err = run_release_workflow(
        &ReleaseWorkflowArgs { auto: true },
        &Config::default(),
        &JsonManifest::new(&path),
        &repo,
        &ScriptedPrompter::default(),
    )
    .unwrap_err();

    assert_eq!(err.failed_step(), Some(Step::Commit));
    assert!(!repo
        .operations()
        .iter()
        .any(|op| op.kind() == OperationKind::Push));
}

#[test]
fn test_existing_tag_stops_before_tag_push() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, r#"{"version":"1.0.0"}"#);
    let repo = MockRepository::new().fail_on(OperationKind::CreateTag);

    let err = run_release_workflow(
        &ReleaseWorkflowArgs { auto: true },
        &Config::default(),
        &JsonManifest::new(&path),
        &repo,
        &ScriptedPrompter::default(),
    )
    .unwrap_err();

    assert_eq!(err.failed_step(), Some(Step::CreateTag));
    assert_eq!(repo.operations().last().map(Operation::kind), Some(OperationKind::CreateTag));
}

#[test]
fn test_tag_push_failure_is_reported_as_tag_push_step() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, r#"{"version":"1.0.0"}"#);
    let repo = MockRepository::new().fail_on_push_of("1.0.1");

    let err = run_release_workflow(
        &ReleaseWorkflowArgs { auto: true },
        &Config::default(),
        &JsonManifest::new(&path),
        &repo,
        &ScriptedPrompter::default(),
    )
    .unwrap_err();

    assert_eq!(err.failed_step(), Some(Step::PushTag));
    assert_eq!(repo.operations().len(), 5);
}

#[test]
fn test_missing_version_fails_without_mutation() {
    let dir = TempDir::new().unwrap();
    let original = r#"{"name":"vendor/package"}"#;
    let path = write_manifest(&dir, original);
    let repo = MockRepository::new();
    let prompter = ScriptedPrompter::new([true]);

    let err = run_release_workflow(
        &interactive(),
        &Config::default(),
        &JsonManifest::new(&path),
        &repo,
        &prompter,
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseError::MissingVersion { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert!(prompter.asked().is_empty());
    assert!(repo.operations().is_empty());
}

#[test]
fn test_unreadable_manifest_fails_before_version_control() {
    let dir = TempDir::new().unwrap();
    let repo = MockRepository::new();

    let err = run_release_workflow(
        &ReleaseWorkflowArgs { auto: true },
        &Config::default(),
        &JsonManifest::new(dir.path().join("composer.json")),
        &repo,
        &ScriptedPrompter::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ReleaseError::ManifestIo { .. }));
    assert!(!err.is_version_control());
    assert!(repo.operations().is_empty());
}

#[test]
fn test_configured_remote_and_branch_are_used() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, r#"{"version":"1.0.0"}"#);
    let repo = MockRepository::new();
    let config = Config::from_toml(
        r#"
[git]
remote = "origin"
branch = "main"
"#,
    )
    .unwrap();

    run_release_workflow(
        &ReleaseWorkflowArgs { auto: true },
        &config,
        &JsonManifest::new(&path),
        &repo,
        &ScriptedPrompter::default(),
    )
    .unwrap();

    let pushes: Vec<(String, String)> = repo
        .operations()
        .into_iter()
        .filter_map(|op| match op {
            Operation::Push { remote, reference } => Some((remote, reference)),
            _ => None,
        })
        .collect();
    assert_eq!(
        pushes,
        vec![
            ("origin".to_string(), "main".to_string()),
            ("origin".to_string(), "1.0.1".to_string()),
        ]
    );
}

#[test]
fn test_release_preserves_other_manifest_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        &dir,
        r#"{"name":"vendor/package","version":"1.2.3-rc1","require":{"php":"^8.0"}}"#,
    );
    let repo = MockRepository::new();

    run_release_workflow(
        &ReleaseWorkflowArgs { auto: true },
        &Config::default(),
        &JsonManifest::new(&path),
        &repo,
        &ScriptedPrompter::default(),
    )
    .unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "{\n  \"name\": \"vendor/package\",\n  \"version\": \"1.2.4-rc1\",\n  \"require\": {\n    \"php\": \"^8.0\"\n  }\n}\n"
    );
}
