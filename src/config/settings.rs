//! The `autotier.toml` configuration file.
//!
//! Every field has a default, so a missing file, a missing section or a
//! missing key all fall back to the documented defaults:
//!
//! ```toml
//! [generation]
//! enable_weapon_tierlist = true
//! enable_armor_tierlist = true
//! enable_progression_alignment = true
//! use_attribute_detection = true
//!
//! [layout]
//! tier_multiplier = 1.6
//! rows_per_tier = 1
//! quest_spacing_x = 1.0
//! quest_spacing_y = 1.0
//! tier_spacing_y = 1.0
//! progression_group_spacing = 1
//! tag_group_spacing = 2
//!
//! [weapons]
//! tags = []
//! items = []
//! tier_overrides = ["minecraft:wooden_sword=0"]
//!
//! [filter]
//! skipped_items = []
//! skipped_recipe_categories = ["emi:anvil_repairing"]
//! ```
//!
//! Out-of-range values are not rejected. [`TierlistConfig::sanitized`] clamps
//! them and reports each fix as a [`ConfigIssue`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;
use tokio::fs;
use tracing::warn;

use crate::config::TagDescriptor;
use crate::constants::{
    DEFAULT_SKIPPED_RECIPE_CATEGORIES, DEFAULT_TIER_MULTIPLIER, MAX_GROUP_SPACING,
    PROGRESSION_GROUP_SPACING, QUEST_SPACING_RANGE, ROWS_PER_TIER_RANGE, TAG_GROUP_SPACING,
    TIER_SPACING_RANGE,
};
use crate::core::{AutotierError, ItemId};
use crate::layout::GridPositionMapper;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TierlistConfig {
    pub generation: GenerationSettings,
    pub layout: LayoutSettings,
    pub weapons: KindSettings,
    pub armor: KindSettings,
    pub filter: FilterSettings,

    /// Ordered tag groups used when progression alignment is off.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_groups: Vec<TagDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub enable_weapon_tierlist: bool,
    pub enable_armor_tierlist: bool,
    /// Chain grouping when `true`, tag grouping when `false`.
    pub enable_progression_alignment: bool,
    /// Include items by their detection attribute when a kind lists no tags
    /// and no items.
    pub use_attribute_detection: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            enable_weapon_tierlist: true,
            enable_armor_tierlist: true,
            enable_progression_alignment: true,
            use_attribute_detection: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub tier_multiplier: f64,
    pub rows_per_tier: u32,
    pub quest_spacing_x: f64,
    pub quest_spacing_y: f64,
    pub tier_spacing_y: f64,
    pub progression_group_spacing: u32,
    pub tag_group_spacing: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            tier_multiplier: DEFAULT_TIER_MULTIPLIER,
            rows_per_tier: 1,
            quest_spacing_x: 1.0,
            quest_spacing_y: 1.0,
            tier_spacing_y: 1.0,
            progression_group_spacing: PROGRESSION_GROUP_SPACING,
            tag_group_spacing: TAG_GROUP_SPACING,
        }
    }
}

impl LayoutSettings {
    pub fn grid(&self) -> GridPositionMapper {
        GridPositionMapper {
            rows_per_tier: self.rows_per_tier,
            quest_spacing_x: self.quest_spacing_x,
            quest_spacing_y: self.quest_spacing_y,
            tier_spacing_y: self.tier_spacing_y,
        }
    }

    /// Group spacing for the active grouping mode.
    pub const fn group_spacing(&self, progression: bool) -> u32 {
        if progression {
            self.progression_group_spacing
        } else {
            self.tag_group_spacing
        }
    }
}

/// Per-kind settings (`[weapons]`, `[armor]`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KindSettings {
    /// Chapter identifier handed to the renderer. Defaults per kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_title: Option<String>,

    /// Items carrying any of these tags are included.
    pub tags: Vec<String>,

    /// Manually included item ids.
    pub items: Vec<String>,

    /// `namespace:path=tier` entries.
    pub tier_overrides: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Item ids never included in any tierlist.
    pub skipped_items: Vec<String>,

    /// Recipe categories ignored when building the recipe graph.
    pub skipped_recipe_categories: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            skipped_items: Vec::new(),
            skipped_recipe_categories: DEFAULT_SKIPPED_RECIPE_CATEGORIES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// A configuration value that was replaced during sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl TierlistConfig {
    /// Load from `path`, failing if the file is missing or malformed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(AutotierError::from)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .map_err(AutotierError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load from `path` if it exists, otherwise return the defaults.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load_from(path).await
        } else {
            Ok(Self::default())
        }
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(AutotierError::from)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Documented example written by `autotier init`.
    pub fn init_example() -> Self {
        let mut config = Self::default();
        config.weapons = KindSettings {
            chapter_id: Some("autotier_weapons".to_string()),
            chapter_title: Some("Weapon Tierlist".to_string()),
            tags: Vec::new(),
            items: Vec::new(),
            tier_overrides: vec!["minecraft:wooden_sword=0".to_string()],
        };
        config.armor = KindSettings {
            chapter_id: Some("autotier_armor".to_string()),
            chapter_title: Some("Armor Tierlist".to_string()),
            ..KindSettings::default()
        };
        config.filter.skipped_items = vec!["minecraft:debug_stick".to_string()];
        let mut tier_a = TagDescriptor::new("Tier A", ["forge:tier/a"]);
        if let Ok(icon) = ItemId::parse("minecraft:diamond") {
            tier_a = tier_a.with_header(icon, "Tier A");
        }
        config.tag_groups = vec![tier_a, TagDescriptor::new("Tier B", ["forge:tier/b"])];
        config
    }

    /// Clamp out-of-range values and drop unusable tag groups.
    ///
    /// Every fix is logged as a warning and returned.
    #[must_use]
    pub fn sanitized(mut self) -> (Self, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let layout = &mut self.layout;

        if !layout.tier_multiplier.is_finite() || layout.tier_multiplier <= 0.0 {
            issues.push(ConfigIssue {
                field: "layout.tier_multiplier".to_string(),
                message: format!(
                    "{} is not a positive number, using {DEFAULT_TIER_MULTIPLIER}",
                    layout.tier_multiplier
                ),
            });
            layout.tier_multiplier = DEFAULT_TIER_MULTIPLIER;
        }

        clamp_u32(&mut layout.rows_per_tier, &ROWS_PER_TIER_RANGE, "layout.rows_per_tier", &mut issues);
        clamp_f64(&mut layout.quest_spacing_x, &QUEST_SPACING_RANGE, "layout.quest_spacing_x", &mut issues);
        clamp_f64(&mut layout.quest_spacing_y, &QUEST_SPACING_RANGE, "layout.quest_spacing_y", &mut issues);
        clamp_f64(&mut layout.tier_spacing_y, &TIER_SPACING_RANGE, "layout.tier_spacing_y", &mut issues);
        clamp_u32(
            &mut layout.progression_group_spacing,
            &(0..=MAX_GROUP_SPACING),
            "layout.progression_group_spacing",
            &mut issues,
        );
        clamp_u32(
            &mut layout.tag_group_spacing,
            &(0..=MAX_GROUP_SPACING),
            "layout.tag_group_spacing",
            &mut issues,
        );

        self.tag_groups.retain(|descriptor| match descriptor.validate() {
            Ok(()) => true,
            Err(e) => {
                issues.push(ConfigIssue {
                    field: "tag_groups".to_string(),
                    message: format!("{e}, removed"),
                });
                false
            }
        });

        for issue in &issues {
            warn!("Config {issue}");
        }

        (self, issues)
    }
}

fn clamp_u32(value: &mut u32, range: &RangeInclusive<u32>, field: &str, issues: &mut Vec<ConfigIssue>) {
    let clamped = (*value).clamp(*range.start(), *range.end());
    if clamped != *value {
        issues.push(ConfigIssue {
            field: field.to_string(),
            message: format!(
                "{} is outside {}..={}, using {clamped}",
                value,
                range.start(),
                range.end()
            ),
        });
        *value = clamped;
    }
}

fn clamp_f64(value: &mut f64, range: &RangeInclusive<f64>, field: &str, issues: &mut Vec<ConfigIssue>) {
    let clamped =
        if value.is_nan() { *range.start() } else { value.clamp(*range.start(), *range.end()) };
    if clamped != *value || value.is_nan() {
        issues.push(ConfigIssue {
            field: field.to_string(),
            message: format!(
                "{} is outside {}..={}, using {clamped}",
                value,
                range.start(),
                range.end()
            ),
        });
        *value = clamped;
    }
}
