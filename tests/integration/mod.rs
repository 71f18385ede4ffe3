//! Integration test suite for autotier
//!
//! End-to-end tests for the generation pipeline and the `autotier` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: layout properties over whole snapshots (partition,
//!   column invariants, acyclic edges, idempotence)
//! - **generate**: `autotier generate` output and failure modes
//! - **validate**: `autotier validate` diagnostics
//! - **init**: `autotier init`

mod generate;
mod init;
mod pipeline;
mod support;
mod validate;
