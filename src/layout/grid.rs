//! Grid coordinates.

use crate::constants::{TAG_HEADER_Y, TIER_MARKER_X};
use crate::layout::Column;

/// Converts (tier index, row, column) into 2-D coordinates.
///
/// `tier_index` is the position of a tier among the non-empty tiers, so
/// sparse tier numbers leave no vertical gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPositionMapper {
    pub rows_per_tier: u32,
    pub quest_spacing_x: f64,
    pub quest_spacing_y: f64,
    pub tier_spacing_y: f64,
}

impl Default for GridPositionMapper {
    fn default() -> Self {
        Self {
            rows_per_tier: 1,
            quest_spacing_x: 1.0,
            quest_spacing_y: 1.0,
            tier_spacing_y: 1.0,
        }
    }
}

impl GridPositionMapper {
    pub fn tier_base_y(&self, tier_index: usize) -> f64 {
        index_to_f64(tier_index)
            * (f64::from(self.rows_per_tier) * self.quest_spacing_y + self.tier_spacing_y)
    }

    pub fn item_y(&self, tier_base_y: f64, row: i32) -> f64 {
        tier_base_y + f64::from(row) * self.quest_spacing_y
    }

    pub fn item_x(&self, column: Column) -> f64 {
        f64::from(column) * self.quest_spacing_x
    }

    /// `(x, y)` of an item.
    pub fn position(&self, tier_index: usize, row: i32, column: Column) -> (f64, f64) {
        (self.item_x(column), self.item_y(self.tier_base_y(tier_index), row))
    }

    /// `(x, y)` of the marker node labelling a tier.
    pub fn tier_marker(&self, tier_index: usize) -> (f64, f64) {
        (TIER_MARKER_X, self.tier_base_y(tier_index))
    }

    /// `(x, y)` of a tag group header centred over `[first, last]`.
    pub fn tag_header(&self, first: Column, last: Column) -> (f64, f64) {
        let center = (f64::from(first) + f64::from(last)) / 2.0;
        (center * self.quest_spacing_x, TAG_HEADER_Y)
    }
}

#[allow(clippy::cast_precision_loss)]
fn index_to_f64(index: usize) -> f64 {
    index as f64
}
