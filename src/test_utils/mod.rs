//! Test utilities for autotier
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`init_test_logging`] installs a test-friendly tracing subscriber once
//! - [`SnapshotBuilder`] builds item snapshots fluently
//! - [`ConfigFixture`] holds sample configuration files
//!
//! Compiled for `cfg(test)` and for the `test-utils` feature.

pub mod fixtures;

pub use fixtures::{ConfigFixture, SnapshotBuilder};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// With `Some(level)` that level is used; otherwise `RUST_LOG` is honoured if
/// set, and logging stays off if it is not. Safe to call from every test.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}
