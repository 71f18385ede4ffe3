//! Item kinds and their scoring/tiering policies.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{KindSettings, LayoutSettings, TierlistConfig};
use crate::scoring::{ArmorScore, ScoreModel, WeaponScore};
use crate::tiers::{ArmorLabel, DpsRangeLabel, FloorDivision, Rounding, TierFormula, TierLabel};

/// A kind of item ranked in its own tierlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapons,
    Armor,
}

impl ItemKind {
    pub const ALL: [Self; 2] = [Self::Weapons, Self::Armor];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Weapons => "weapons",
            Self::Armor => "armor",
        }
    }

    pub const fn settings(self, config: &TierlistConfig) -> &KindSettings {
        match self {
            Self::Weapons => &config.weapons,
            Self::Armor => &config.armor,
        }
    }

    pub const fn is_enabled(self, config: &TierlistConfig) -> bool {
        match self {
            Self::Weapons => config.generation.enable_weapon_tierlist,
            Self::Armor => config.generation.enable_armor_tierlist,
        }
    }

    pub fn chapter_id(self, config: &TierlistConfig) -> String {
        self.settings(config)
            .chapter_id
            .clone()
            .unwrap_or_else(|| format!("autotier_{}", self.name()))
    }

    pub fn chapter_title(self, config: &TierlistConfig) -> String {
        self.settings(config).chapter_title.clone().unwrap_or_else(|| {
            match self {
                Self::Weapons => "Weapon Tierlist",
                Self::Armor => "Armor Tierlist",
            }
            .to_string()
        })
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The policies used to rank one item kind.
#[derive(Debug)]
pub struct KindProfile {
    pub kind: ItemKind,
    pub score: Box<dyn ScoreModel>,
    pub formula: Box<dyn TierFormula>,
    pub label: Box<dyn TierLabel>,
}

impl KindProfile {
    /// DPS score, `floor(dps / multiplier)` tiers, DPS range labels.
    pub fn weapons(multiplier: f64) -> Self {
        Self {
            kind: ItemKind::Weapons,
            score: Box::new(WeaponScore),
            formula: Box::new(FloorDivision {
                multiplier,
            }),
            label: Box::new(DpsRangeLabel {
                multiplier,
            }),
        }
    }

    /// Armor score, `round(score)` tiers, armor labels.
    pub fn armor() -> Self {
        Self {
            kind: ItemKind::Armor,
            score: Box::new(ArmorScore),
            formula: Box::new(Rounding),
            label: Box::new(ArmorLabel),
        }
    }

    pub fn for_kind(kind: ItemKind, layout: &LayoutSettings) -> Self {
        match kind {
            ItemKind::Weapons => Self::weapons(layout.tier_multiplier),
            ItemKind::Armor => Self::armor(),
        }
    }
}
