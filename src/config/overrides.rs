//! Manual tier overrides.
//!
//! Entries are written as `namespace:path=tier`, e.g. `"minecraft:wooden_sword=0"`.
//! Malformed entries, and tiers above [`MAX_TIER`], are skipped with a
//! warning; they never abort a run.

use tracing::warn;

use crate::constants::MAX_TIER;
use crate::core::{AutotierError, ItemId};
use crate::tiers::{Tier, TierOverrides};

/// Outcome of parsing an override list.
#[derive(Debug, Default)]
pub struct ParsedOverrides {
    pub overrides: TierOverrides,
    pub rejected: Vec<AutotierError>,
}

/// Parse one `namespace:path=tier` entry.
pub fn parse_override(entry: &str) -> Result<(ItemId, Tier), AutotierError> {
    let invalid = |reason: String| AutotierError::InvalidOverride {
        entry: entry.to_string(),
        reason,
    };

    let mut parts = entry.split('=');
    let (Some(id), Some(tier), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid("expected exactly one '='".to_string()));
    };

    let id = ItemId::parse(id).map_err(|e| invalid(e.to_string()))?;
    let tier: Tier = tier
        .trim()
        .parse()
        .map_err(|e| invalid(format!("tier is not an integer ({e})")))?;
    if tier < 0 {
        return Err(invalid("tier must be non-negative".to_string()));
    }
    if tier > MAX_TIER {
        return Err(invalid(format!("tier must be at most {MAX_TIER}")));
    }

    Ok((id, tier))
}

/// Parse every entry, keeping the valid ones. Later duplicates win.
pub fn parse_overrides<S: AsRef<str>>(entries: &[S]) -> ParsedOverrides {
    let mut parsed = ParsedOverrides::default();
    for entry in entries {
        match parse_override(entry.as_ref()) {
            Ok((id, tier)) => {
                parsed.overrides.insert(id, tier);
            }
            Err(e) => {
                warn!("{e}, skipping");
                parsed.rejected.push(e);
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_entry() {
        let (id, tier) = parse_override("minecraft:wooden_sword=0").unwrap();
        assert_eq!(id.as_str(), "minecraft:wooden_sword");
        assert_eq!(tier, 0);

        let (id, tier) = parse_override(" diamond_sword = 12 ").unwrap();
        assert_eq!(id.as_str(), "minecraft:diamond_sword");
        assert_eq!(tier, 12);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for entry in ["minecraft:stick", "a=1=2", "minecraft:stick=-1", "minecraft:stick=two", "=3", "a:b:c=1"] {
            let err = parse_override(entry).unwrap_err();
            assert!(matches!(err, AutotierError::InvalidOverride { .. }), "{entry}");
        }
    }

    #[test]
    fn test_parse_rejects_tier_above_max() {
        assert_eq!(parse_override("m:a=10000").unwrap().1, MAX_TIER);

        let err = parse_override("m:sword_iron=2147483647").unwrap_err();
        assert!(err.to_string().contains("at most 10000"));

        let parsed = parse_overrides(&["m:sword_iron=2147483647"]);
        assert!(parsed.overrides.is_empty());
        assert_eq!(parsed.rejected.len(), 1);
    }

    #[test]
    fn test_parse_overrides_skips_bad_and_last_wins() {
        let parsed = parse_overrides(&["m:a=1", "broken", "m:a=4", "m:b=2"]);
        assert_eq!(parsed.overrides.len(), 2);
        assert_eq!(parsed.overrides[&ItemId::parse("m:a").unwrap()], 4);
        assert_eq!(parsed.rejected.len(), 1);
    }
}
