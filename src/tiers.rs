//! Tier assignment.
//!
//! Scores are bucketed into integer tiers by a [`TierFormula`]. Manual
//! overrides take precedence over the formula. Each tier is then labelled by
//! a [`TierLabel`] strategy for display.
//!
//! Row within a tier is always 0.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::constants::MAX_TIER;
use crate::core::ItemId;

/// Integer tier, in `0..=MAX_TIER`.
pub type Tier = i32;

/// Manual tier table, already validated (see [`crate::config::overrides`]).
pub type TierOverrides = BTreeMap<ItemId, Tier>;

/// Strategy mapping a non-negative score to a tier.
pub trait TierFormula: fmt::Debug + Send + Sync {
    fn tier(&self, score: f64) -> Tier;
}

/// `floor(score / multiplier)`, used for damage-like scores.
#[derive(Debug, Clone, Copy)]
pub struct FloorDivision {
    pub multiplier: f64,
}

impl TierFormula for FloorDivision {
    fn tier(&self, score: f64) -> Tier {
        to_tier((score / self.multiplier).floor())
    }
}

/// `round(score)`, used for defensive scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rounding;

impl TierFormula for Rounding {
    fn tier(&self, score: f64) -> Tier {
        to_tier(score.round())
    }
}

// `as` saturates on overflow and maps NaN to 0.
#[allow(clippy::cast_possible_truncation)]
fn to_tier(value: f64) -> Tier {
    (value as Tier).clamp(0, MAX_TIER)
}

/// Strategy producing the human-readable label of a tier.
pub trait TierLabel: fmt::Debug + Send + Sync {
    fn label(&self, tier: Tier) -> String;
}

/// `[t] DPS: [lo-hi)` where the range is the score interval of the tier.
#[derive(Debug, Clone, Copy)]
pub struct DpsRangeLabel {
    pub multiplier: f64,
}

impl TierLabel for DpsRangeLabel {
    fn label(&self, tier: Tier) -> String {
        let low = f64::from(tier) * self.multiplier;
        let high = (f64::from(tier) + 1.0) * self.multiplier;
        format!("[{tier}] DPS: [{low:.1}-{high:.1})")
    }
}

/// `[t] Armor: t`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmorLabel;

impl TierLabel for ArmorLabel {
    fn label(&self, tier: Tier) -> String {
        format!("[{tier}] Armor: {tier}")
    }
}

/// An item placed in a tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TieredItem {
    pub id: ItemId,
    pub score: f64,
    pub tier: Tier,
    pub row: i32,
}

/// Result of tier assignment: non-empty tiers in ascending order, each
/// sorted by descending score then ascending id.
#[derive(Debug, Clone, Default)]
pub struct Tiering {
    tiers: BTreeMap<Tier, Vec<TieredItem>>,
    by_id: HashMap<ItemId, (Tier, f64)>,
}

impl Tiering {
    pub fn tiers(&self) -> &BTreeMap<Tier, Vec<TieredItem>> {
        &self.tiers
    }

    pub fn tier_of(&self, id: &ItemId) -> Option<Tier> {
        self.by_id.get(id).map(|(tier, _)| *tier)
    }

    pub fn score_of(&self, id: &ItemId) -> Option<f64> {
        self.by_id.get(id).map(|(_, score)| *score)
    }

    /// Sequential position of `tier` among the non-empty tiers.
    pub fn index_of(&self, tier: Tier) -> Option<usize> {
        self.tiers.keys().position(|t| *t == tier)
    }

    pub fn item_count(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &TieredItem> {
        self.tiers.values().flatten()
    }
}

/// Buckets scored items into tiers.
#[derive(Debug)]
pub struct TierAssigner<'a> {
    formula: &'a dyn TierFormula,
    overrides: &'a TierOverrides,
}

impl<'a> TierAssigner<'a> {
    pub fn new(formula: &'a dyn TierFormula, overrides: &'a TierOverrides) -> Self {
        Self {
            formula,
            overrides,
        }
    }

    /// Tier of a single score, honoring an override for `id`.
    pub fn tier_for(&self, id: &ItemId, score: f64) -> Tier {
        self.overrides.get(id).copied().unwrap_or_else(|| self.formula.tier(score))
    }

    /// Assign every `(id, score)` pair to a tier.
    ///
    /// A duplicated id keeps its first occurrence.
    pub fn assign<'i>(&self, scored: impl IntoIterator<Item = (&'i ItemId, f64)>) -> Tiering {
        let mut tiering = Tiering::default();

        for (id, score) in scored {
            if tiering.by_id.contains_key(id) {
                continue;
            }
            let tier = self.tier_for(id, score);
            tiering.by_id.insert(id.clone(), (tier, score));
            tiering.tiers.entry(tier).or_default().push(TieredItem {
                id: id.clone(),
                score,
                tier,
                row: 0,
            });
        }

        for items in tiering.tiers.values_mut() {
            items.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        }

        tiering
    }
}
