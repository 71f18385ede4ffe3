use autotier::config::TierlistConfig;
use autotier::test_utils::SnapshotBuilder;
use predicates::prelude::*;

use crate::support::TestWorkspace;

#[test]
fn test_init_creates_config() {
    let workspace = TestWorkspace::new();

    workspace
        .command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote example configuration"));

    let contents = std::fs::read_to_string(workspace.path().join("autotier.toml")).unwrap();
    let config: TierlistConfig = toml::from_str(&contents).unwrap();
    assert_eq!(config.weapons.tier_overrides, vec!["minecraft:wooden_sword=0"]);
    assert_eq!(config.tag_groups.len(), 2);
}

#[test]
fn test_init_refuses_to_overwrite() {
    let workspace = TestWorkspace::new();
    workspace.write_config("[layout]\nrows_per_tier = 3\n");

    workspace
        .command()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File already exists"))
        .stderr(predicate::str::contains("--force"));

    let contents = std::fs::read_to_string(workspace.path().join("autotier.toml")).unwrap();
    assert!(contents.contains("rows_per_tier = 3"));

    workspace.command().args(["init", "--force"]).assert().success();
    let contents = std::fs::read_to_string(workspace.path().join("autotier.toml")).unwrap();
    assert!(contents.contains("[[tag_groups]]"));
}

#[test]
fn test_init_config_drives_generation() {
    let workspace = TestWorkspace::new();
    workspace.write_snapshot(&SnapshotBuilder::sword_chain());
    workspace.command().args(["init", "--path", "custom/autotier.toml"]).assert().success();

    workspace
        .command()
        .args(["--config", "custom/autotier.toml", "generate", "--snapshot", "items.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] DPS: [0.0-1.6)"));
}
