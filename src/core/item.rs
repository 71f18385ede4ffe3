//! Item identifiers and scanned item records.
//!
//! Every game object handled by the tierlist pipeline is addressed by an
//! [`ItemId`] of the form `namespace:path` (for example
//! `minecraft:iron_sword`). Identifiers are opaque to the layout code apart
//! from their namespace, which is used as a secondary sort key when laying
//! out tag groups and isolated items.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::core::AutotierError;

/// Namespace assumed for identifiers written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A stable, unique item identifier (`namespace:path`).
///
/// Ordering is lexicographic on the full `namespace:path` string, which gives
/// every collection keyed by `ItemId` a deterministic iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Parse an identifier, filling in [`DEFAULT_NAMESPACE`] when the input
    /// has no `:` separator.
    pub fn parse(raw: &str) -> Result<Self, AutotierError> {
        let raw = raw.trim();
        let invalid = |reason: &str| AutotierError::InvalidItemId {
            id: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("identifier is empty"));
        }

        let (namespace, path) = match raw.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, raw),
        };

        if namespace.is_empty() {
            return Err(invalid("namespace is empty"));
        }
        if path.is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.contains(':') {
            return Err(invalid("more than one ':' separator"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(invalid("identifier contains whitespace"));
        }

        Ok(Self(format!("{namespace}:{path}")))
    }

    /// The part before the `:`.
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map_or(DEFAULT_NAMESPACE, |(namespace, _)| namespace)
    }

    /// The part after the `:`.
    pub fn path(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, path)| path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemId {
    type Err = AutotierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = AutotierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Raw numeric attributes read from a game object (`attack_damage`,
/// `attack_speed`, `armor`, `armor_toughness`, ...).
pub type AttributeSet = BTreeMap<String, f64>;

/// Attribute keys understood by the built-in score models.
pub mod attributes {
    pub const ATTACK_DAMAGE: &str = "attack_damage";
    pub const ATTACK_SPEED: &str = "attack_speed";
    pub const ARMOR: &str = "armor";
    pub const ARMOR_TOUGHNESS: &str = "armor_toughness";
}

/// A scanned game object as supplied by the item source.
///
/// Immutable once scanned; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannedItem {
    /// Stable identifier.
    pub id: ItemId,

    /// Numeric attributes, keyed by attribute name. Missing keys read as 0.
    #[serde(default)]
    pub attributes: AttributeSet,

    /// Item tags (`forge:tools/swords`, ...) used by filters and tag groups.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl ScannedItem {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            attributes: AttributeSet::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Builder-style tag setter.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Attribute value, 0.0 when absent.
    pub fn attribute(&self, key: &str) -> f64 {
        self.attributes.get(key).copied().unwrap_or(0.0)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
