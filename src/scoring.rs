//! Score models: map an item's raw attributes to a single scalar.
//!
//! Each item kind is ranked by its own [`ScoreModel`]. The model is a policy
//! object handed to the pipeline, so adding a new kind means adding a model,
//! not branching inside the pipeline.

use std::fmt;

use crate::core::{ScannedItem, attributes};

/// Weight of armor toughness relative to plain armor points.
pub const TOUGHNESS_WEIGHT: f64 = 0.6;

/// Strategy that turns an item's attributes into a non-negative score.
pub trait ScoreModel: fmt::Debug + Send + Sync {
    /// Raw score before clamping.
    fn raw_score(&self, item: &ScannedItem) -> f64;

    /// Attribute that marks an item as belonging to this kind when attribute
    /// detection is enabled.
    fn detection_attribute(&self) -> &'static str;

    /// Score clamped to `>= 0`; NaN reads as 0.
    fn score(&self, item: &ScannedItem) -> f64 {
        clamp_score(self.raw_score(item))
    }
}

/// Damage per second: `attack_damage * attack_speed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeaponScore;

impl ScoreModel for WeaponScore {
    fn raw_score(&self, item: &ScannedItem) -> f64 {
        item.attribute(attributes::ATTACK_DAMAGE) * item.attribute(attributes::ATTACK_SPEED)
    }

    fn detection_attribute(&self) -> &'static str {
        attributes::ATTACK_DAMAGE
    }
}

/// Defensive score: `armor + armor_toughness * 0.6`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmorScore;

impl ScoreModel for ArmorScore {
    fn raw_score(&self, item: &ScannedItem) -> f64 {
        item.attribute(attributes::ARMOR)
            + item.attribute(attributes::ARMOR_TOUGHNESS) * TOUGHNESS_WEIGHT
    }

    fn detection_attribute(&self) -> &'static str {
        attributes::ARMOR
    }
}

fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() || score < 0.0 {
        0.0
    } else {
        score
    }
}
