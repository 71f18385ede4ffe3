//! Crafting relationships between items.
//!
//! - [`recipe`]: the [`RecipeGraph`] snapshot and the sources producing it
//! - [`chains`]: partitioning items into chain, tag and isolated groups
//! - [`edges`]: cycle-safe wiring of dependency edges between rendered nodes

pub mod chains;
pub mod edges;
pub mod recipe;

pub use chains::{ChainGrouper, Group, group_by_tags};
pub use edges::{DependencyEdge, DependencyEdgeBuilder, SkippedEdge};
pub use recipe::{DependencyGraphSource, Recipe, RecipeBookSource, RecipeGraph};
