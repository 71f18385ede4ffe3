//! autotier - tierlists with crafting progression layout
//!
//! autotier ranks scored game items (weapons, armor) into discrete tiers and
//! lays them out on a 2-D grid so that items connected by crafting recipes
//! line up in columns that respect dependency order.
//!
//! # Pipeline
//!
//! ```text
//! snapshot ─▶ ItemFilter ─▶ ScoreModel ─▶ TierAssigner ─▶ tiers
//!                      └─▶ DependencyGraphSource ─▶ ChainGrouper ─▶ groups
//! groups + tiers ─▶ ColumnLayoutEngine ─▶ GridPositionMapper ─▶ coordinates
//! recipe graph ─▶ DependencyEdgeBuilder ─▶ acyclic edges
//! ```
//!
//! # Modules
//!
//! - [`core`] - item identifiers, errors
//! - [`scoring`] - score models per item kind
//! - [`tiers`] - tier formulas, labels and assignment
//! - [`graph`] - recipe graphs, grouping, cycle-safe edges
//! - [`layout`] - column assignment and grid coordinates
//! - [`pipeline`] - one generation run per item kind
//! - [`config`] - `autotier.toml`
//! - [`snapshot`] - the JSON item snapshot
//! - [`cli`] - the `autotier` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use autotier::config::TierlistConfig;
//! use autotier::pipeline::{ItemKind, generate_all};
//! use autotier::snapshot::ItemSnapshot;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = TierlistConfig::load_or_default(Path::new("autotier.toml")).await?;
//! let snapshot = ItemSnapshot::load(Path::new("items.json")).await?;
//! let report = generate_all(&config, &snapshot, &ItemKind::ALL, None);
//! for layout in &report.layouts {
//!     println!("{}: {} items", layout.chapter_title, layout.items.len());
//! }
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod core;
pub mod snapshot;

// Ranking and layout
pub mod graph;
pub mod layout;
pub mod pipeline;
pub mod scoring;
pub mod tiers;

// Supporting modules
pub mod constants;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
