use autotier::test_utils::{ConfigFixture, SnapshotBuilder};
use predicates::prelude::*;
use serde_json::Value;

use crate::support::TestWorkspace;

#[test]
fn test_validate_default_config() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());

    workspace
        .command()
        .args(["validate", "--snapshot", "items.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_reports_bad_overrides() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());
    workspace.write_config(ConfigFixture::with_bad_overrides());

    workspace
        .command()
        .args(["validate", "--snapshot", "items.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("did you mean 'minecraft:iron_sword'?"))
        .stdout(predicate::str::contains("Invalid tier override 'broken'"))
        .stdout(predicate::str::contains("layout.rows_per_tier"))
        .stderr(predicate::str::contains("Validation failed: 3 error(s)"));
}

#[test]
fn test_validate_json_output() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());
    workspace.write_config(ConfigFixture::with_bad_overrides());

    let output = workspace
        .command()
        .args(["validate", "--snapshot", "items.json", "--format", "json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let results: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results["valid"], false);
    assert_eq!(results["errors"].as_array().unwrap().len(), 3);
    assert_eq!(results["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());
    workspace.write_config(ConfigFixture::tag_mode());

    // Neither tag group matches an item in the sword snapshot.
    workspace
        .command()
        .args(["validate", "--snapshot", "items.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tag group 'Early' matches no item"));

    workspace
        .command()
        .args(["validate", "--snapshot", "items.json", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failed: 0 error(s), 2 warning(s)"));
}
