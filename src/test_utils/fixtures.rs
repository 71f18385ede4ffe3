//! Builders for snapshot and configuration test data.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::core::{ItemId, ScannedItem, attributes};
use crate::graph::Recipe;
use crate::snapshot::ItemSnapshot;

fn id(raw: &str) -> ItemId {
    ItemId::parse(raw).unwrap_or_else(|e| panic!("invalid fixture item id: {e}"))
}

/// Fluent builder for [`ItemSnapshot`]s.
///
/// ```rust,ignore
/// let snapshot = SnapshotBuilder::new()
///     .weapon("minecraft:wooden_sword", 4.0, 1.0)
///     .weapon("minecraft:stone_sword", 6.0, 1.0)
///     .recipe("minecraft:stone_sword", &["minecraft:wooden_sword"])
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    items: Vec<ScannedItem>,
    recipes: Option<Vec<Recipe>>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item: ScannedItem) -> Self {
        self.items.push(item);
        self
    }

    /// A weapon with the given attack damage and speed (DPS = product).
    pub fn weapon(self, raw_id: &str, damage: f64, speed: f64) -> Self {
        self.item(
            ScannedItem::new(id(raw_id))
                .with_attribute(attributes::ATTACK_DAMAGE, damage)
                .with_attribute(attributes::ATTACK_SPEED, speed),
        )
    }

    /// An armor piece with the given armor and toughness.
    pub fn armor(self, raw_id: &str, armor: f64, toughness: f64) -> Self {
        self.item(
            ScannedItem::new(id(raw_id))
                .with_attribute(attributes::ARMOR, armor)
                .with_attribute(attributes::ARMOR_TOUGHNESS, toughness),
        )
    }

    /// A crafting recipe producing `output` from `inputs`.
    pub fn recipe(self, output: &str, inputs: &[&str]) -> Self {
        self.recipe_in(output, "minecraft:crafting", inputs)
    }

    pub fn recipe_in(mut self, output: &str, category: &str, inputs: &[&str]) -> Self {
        self.recipes.get_or_insert_with(Vec::new).push(Recipe {
            id: output.to_string(),
            category: category.to_string(),
            output: id(output),
            inputs: inputs.iter().map(|input| id(input)).collect(),
        });
        self
    }

    /// Mark the snapshot as carrying a (possibly empty) recipe section.
    pub fn with_recipe_section(mut self) -> Self {
        self.recipes.get_or_insert_with(Vec::new);
        self
    }

    pub fn build(self) -> ItemSnapshot {
        ItemSnapshot {
            items: self.items,
            recipes: self.recipes,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.clone().build())
            .unwrap_or_else(|e| panic!("snapshot fixture does not serialize: {e}"))
    }

    /// Write the snapshot as JSON to `dir/name`, returning the path.
    pub fn write_to(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let path = dir.join(name);
        std::fs::write(&path, self.to_json())
            .with_context(|| format!("Failed to write snapshot fixture to {}", path.display()))?;
        Ok(path)
    }

    /// Three swords forming one crafting chain: wood -> stone -> iron.
    pub fn sword_chain() -> Self {
        Self::new()
            .weapon("minecraft:wooden_sword", 4.0, 1.0)
            .weapon("minecraft:stone_sword", 6.0, 1.0)
            .weapon("minecraft:iron_sword", 9.0, 1.0)
            .armor("minecraft:iron_chestplate", 6.0, 0.0)
            .armor("minecraft:diamond_chestplate", 8.0, 2.0)
            .recipe("minecraft:stone_sword", &["minecraft:wooden_sword"])
            .recipe("minecraft:iron_sword", &["minecraft:stone_sword"])
            .recipe("minecraft:diamond_chestplate", &["minecraft:iron_chestplate"])
    }
}

/// Sample `autotier.toml` contents.
pub struct ConfigFixture;

impl ConfigFixture {
    pub fn tag_mode() -> &'static str {
        r#"
[generation]
enable_progression_alignment = false

[[tag_groups]]
tags = ["forge:tier/early"]
label = "Early"
header = { item = "minecraft:wooden_sword", title = "Early game" }

[[tag_groups]]
tags = ["forge:tier/late"]
label = "Late"
"#
    }

    pub fn with_bad_overrides() -> &'static str {
        r#"
[layout]
rows_per_tier = 99

[weapons]
tier_overrides = ["minecraft:iron_sword=1", "minecraft:iron_swrod=2", "broken", "minecraft:stick=-3"]
"#
    }

    pub fn invalid_syntax() -> &'static str {
        "[layout\nrows_per_tier = "
    }
}
