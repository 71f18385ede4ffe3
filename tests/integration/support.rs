//! Shared helpers for running the binary inside a scratch directory.

use assert_cmd::Command;
use autotier::test_utils::SnapshotBuilder;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary working directory holding a snapshot and, optionally, a config.
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_snapshot(&self, builder: &SnapshotBuilder) -> PathBuf {
        builder.write_to(self.path(), "items.json").unwrap()
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.path().join("autotier.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// `autotier` with the workspace as working directory and quiet logging.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("autotier").unwrap();
        cmd.current_dir(self.path()).env_remove("RUST_LOG").env("NO_COLOR", "1");
        cmd
    }
}
