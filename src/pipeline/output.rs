//! Records handed to the renderer.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::ItemId;
use crate::graph::{DependencyEdge, SkippedEdge};
use crate::layout::Column;
use crate::pipeline::ItemKind;
use crate::tiers::Tier;

/// The complete layout of one tierlist.
#[derive(Debug, Clone, Serialize)]
pub struct TierlistLayout {
    pub kind: ItemKind,
    pub chapter_id: String,
    pub chapter_title: String,
    /// Whether chain grouping was used for this run.
    pub progression: bool,
    pub items: Vec<PlacedItem>,
    pub tier_markers: Vec<TierMarker>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HeaderNode>,
    pub edges: Vec<DependencyEdge<ItemId>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_edges: Vec<SkippedEdge<ItemId>>,
    pub groups: Vec<GroupSummary>,
    /// Hex SHA-256 over the `id tier row column` lines of `items`.
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    pub id: ItemId,
    pub tier: Tier,
    pub row: i32,
    pub column: Column,
    pub x: f64,
    pub y: f64,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierMarker {
    pub tier: Tier,
    pub index: usize,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderNode {
    pub label: String,
    pub title: String,
    pub color: String,
    pub item: ItemId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub kind: String,
    pub label: String,
    pub start_column: Column,
    pub end_column: Column,
    pub members: usize,
}

impl TierlistLayout {
    pub fn item(&self, id: &ItemId) -> Option<&PlacedItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn tier_count(&self) -> usize {
        self.tier_markers.len()
    }
}

/// Fingerprint of the tier/row/column assignment.
pub fn fingerprint(items: &[PlacedItem]) -> String {
    let mut hasher = Sha256::new();
    for item in items {
        hasher.update(format!("{} {} {} {}\n", item.id, item.tier, item.row, item.column));
    }
    hex::encode(hasher.finalize())
}
