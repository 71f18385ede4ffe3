use autotier::test_utils::{ConfigFixture, SnapshotBuilder};
use predicates::prelude::*;
use serde_json::Value;

use crate::support::TestWorkspace;

fn json_report(workspace: &TestWorkspace, extra: &[&str]) -> Value {
    let output = workspace
        .command()
        .args(["generate", "--snapshot", "items.json", "--format", "json"])
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_generate_text_lists_both_kinds() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());

    workspace
        .command()
        .args(["generate", "--snapshot", "items.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weapon Tierlist"))
        .stdout(predicate::str::contains("Armor Tierlist"))
        .stdout(predicate::str::contains("chain mode"))
        .stdout(predicate::str::contains("minecraft:iron_sword"))
        .stdout(predicate::str::contains("[5] DPS: [8.0-9.6)"));
}

#[test]
fn test_generate_json_report() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());

    let report = json_report(&workspace, &[]);
    let layouts = report["layouts"].as_array().unwrap();
    assert_eq!(layouts.len(), 2);

    let weapons = &layouts[0];
    assert_eq!(weapons["kind"], "weapons");
    assert_eq!(weapons["chapter_id"], "autotier_weapons");
    assert_eq!(weapons["progression"], true);
    assert_eq!(weapons["items"].as_array().unwrap().len(), 3);
    assert_eq!(weapons["edges"].as_array().unwrap().len(), 2);
    assert_eq!(weapons["fingerprint"].as_str().unwrap().len(), 64);

    let armor = &layouts[1];
    assert_eq!(armor["kind"], "armor");
    assert_eq!(armor["items"][0]["id"], "minecraft:iron_chestplate");
    assert_eq!(armor["items"][1]["tier"], 9);
}

#[test]
fn test_generate_is_stable_across_runs() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());

    let first = json_report(&workspace, &[]);
    let second = json_report(&workspace, &[]);
    assert_eq!(first, second);
}

#[test]
fn test_generate_kind_and_mode_flags() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());

    let report = json_report(&workspace, &["--kind", "armor", "--mode", "tag"]);
    let layouts = report["layouts"].as_array().unwrap();
    assert_eq!(layouts.len(), 1);
    assert_eq!(layouts[0]["kind"], "armor");
    assert_eq!(layouts[0]["progression"], false);
    assert!(layouts[0]["edges"].as_array().unwrap().is_empty());
}

#[test]
fn test_generate_uses_config_in_working_directory() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());
    workspace.write_config(ConfigFixture::tag_mode());

    let report = json_report(&workspace, &["--kind", "weapons"]);
    assert_eq!(report["layouts"][0]["progression"], false);
}

#[test]
fn test_generate_writes_output_file() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());

    workspace
        .command()
        .args(["generate", "--snapshot", "items.json", "--format", "json", "--output", "out.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(workspace.path().join("out.json")).unwrap();
    let report: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(report["layouts"].as_array().unwrap().len(), 2);
}

#[test]
fn test_generate_reports_skipped_kind() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::new().weapon("test:blade", 5.0, 1.0));

    workspace
        .command()
        .args(["generate", "--snapshot", "items.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No armor found, skipping tierlist generation"));
}

#[test]
fn test_generate_missing_snapshot_fails() {
    let workspace = TestWorkspace::new();

    workspace
        .command()
        .args(["generate", "--snapshot", "missing.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Item snapshot not found"));
}

#[test]
fn test_generate_invalid_config_fails() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());
    workspace.write_config(ConfigFixture::invalid_syntax());

    workspace
        .command()
        .args(["generate", "--snapshot", "items.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check the TOML syntax"));
}

#[test]
fn test_generate_explicit_config_must_exist() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());

    workspace
        .command()
        .args(["--config", "nowhere.toml", "generate", "--snapshot", "items.json"])
        .assert()
        .failure();
}
