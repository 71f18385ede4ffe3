//! The item snapshot: every scanned item plus the known recipes.
//!
//! Snapshots are JSON documents produced by the host game:
//!
//! ```json
//! {
//!   "items": [
//!     { "id": "minecraft:iron_sword",
//!       "attributes": { "attack_damage": 6.0, "attack_speed": 1.6 },
//!       "tags": ["minecraft:swords"] }
//!   ],
//!   "recipes": [
//!     { "id": "minecraft:iron_sword", "category": "minecraft:crafting",
//!       "output": "minecraft:iron_sword",
//!       "inputs": ["minecraft:iron_ingot", "minecraft:stick"] }
//!   ]
//! }
//! ```
//!
//! `recipes` is optional. Without it no recipe graph can be built and every
//! run falls back to tag grouping.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::core::{AutotierError, ItemId, ScannedItem};
use crate::graph::{Recipe, RecipeBookSource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub items: Vec<ScannedItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Recipe>>,
}

impl ItemSnapshot {
    /// Read and parse a snapshot file.
    pub async fn load(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Err(AutotierError::SnapshotNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;

        let snapshot = Self::from_json(&content).map_err(|e| match e {
            AutotierError::JsonError(json) => AutotierError::SnapshotParseError {
                file: path.display().to_string(),
                reason: json.to_string(),
            },
            other => other,
        })?;

        debug!(
            "Loaded snapshot {}: {} items, {} recipes",
            path.display(),
            snapshot.items.len(),
            snapshot.recipes.as_ref().map_or(0, Vec::len)
        );
        Ok(snapshot)
    }

    /// Parse a snapshot, dropping repeated item ids (first occurrence wins).
    pub fn from_json(content: &str) -> Result<Self, AutotierError> {
        let mut snapshot: Self = serde_json::from_str(content)?;
        snapshot.dedup_items();
        Ok(snapshot)
    }

    fn dedup_items(&mut self) {
        let mut seen = HashSet::new();
        self.items.retain(|item| {
            let first = seen.insert(item.id.clone());
            if !first {
                warn!("Duplicate item {} in snapshot, keeping the first entry", item.id);
            }
            first
        });
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| item.id == *id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    /// Recipe graph source over this snapshot's recipes.
    pub fn recipe_source<'a>(&'a self, skipped_categories: &'a [String]) -> RecipeBookSource<'a> {
        RecipeBookSource::new(self.recipes.as_deref(), skipped_categories)
    }
}
