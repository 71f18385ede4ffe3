//! Constants shared across the layout, configuration and CLI modules.

use std::ops::RangeInclusive;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "autotier.toml";

/// Empty columns left between two groups in chain mode.
pub const PROGRESSION_GROUP_SPACING: u32 = 1;

/// Empty columns left between two groups in tag mode.
pub const TAG_GROUP_SPACING: u32 = 2;

/// X coordinate of the per-tier marker node, left of column 0.
pub const TIER_MARKER_X: f64 = -2.0;

/// Y coordinate of tag group header nodes, above the first tier.
pub const TAG_HEADER_Y: f64 = -4.0;

/// Default score width of one tier for floor-division tiering.
pub const DEFAULT_TIER_MULTIPLIER: f64 = 1.6;

/// Highest tier an item can land in, from the formula or an override.
pub const MAX_TIER: i32 = 10_000;

/// Allowed range of `layout.rows_per_tier`.
pub const ROWS_PER_TIER_RANGE: RangeInclusive<u32> = 1..=10;

/// Allowed range of `layout.quest_spacing_x` and `layout.quest_spacing_y`.
pub const QUEST_SPACING_RANGE: RangeInclusive<f64> = 1.0..=5.0;

/// Allowed range of `layout.tier_spacing_y`.
pub const TIER_SPACING_RANGE: RangeInclusive<f64> = 1.0..=10.0;

/// Upper bound for the group spacing settings.
pub const MAX_GROUP_SPACING: u32 = 16;

/// Recipe categories skipped by default when building the recipe graph.
pub const DEFAULT_SKIPPED_RECIPE_CATEGORIES: &[&str] = &["emi:anvil_repairing"];
