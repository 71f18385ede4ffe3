//! Selecting which scanned items belong to an item kind.

use std::collections::BTreeSet;
use tracing::warn;

use crate::config::{FilterSettings, KindSettings};
use crate::core::{ItemId, ScannedItem};

/// Inclusion rules for one item kind.
///
/// An item is included when it is not skipped and any of:
/// - its id is listed in the kind's `items`
/// - it carries one of the kind's `tags`
/// - attribute detection applies (enabled, kind lists no tags and no items)
///   and its detection attribute is positive
#[derive(Debug, Clone)]
pub struct ItemFilter {
    skipped: BTreeSet<ItemId>,
    included: BTreeSet<ItemId>,
    tags: Vec<String>,
    detection_attribute: Option<&'static str>,
}

impl ItemFilter {
    pub fn new(
        kind: &KindSettings,
        filter: &FilterSettings,
        use_attribute_detection: bool,
        detection_attribute: &'static str,
    ) -> Self {
        let detect =
            use_attribute_detection && kind.tags.is_empty() && kind.items.is_empty();
        Self {
            skipped: parse_ids(&filter.skipped_items, "filter.skipped_items"),
            included: parse_ids(&kind.items, "items"),
            tags: kind.tags.clone(),
            detection_attribute: detect.then_some(detection_attribute),
        }
    }

    pub fn accepts(&self, item: &ScannedItem) -> bool {
        if self.skipped.contains(&item.id) {
            return false;
        }
        self.included.contains(&item.id)
            || self.tags.iter().any(|tag| item.has_tag(tag))
            || self.detection_attribute.is_some_and(|attribute| item.attribute(attribute) > 0.0)
    }

    /// Items accepted by this filter, in input order.
    pub fn apply<'a>(&self, items: &'a [ScannedItem]) -> Vec<&'a ScannedItem> {
        items.iter().filter(|item| self.accepts(item)).collect()
    }
}

fn parse_ids(raw: &[String], field: &str) -> BTreeSet<ItemId> {
    raw.iter()
        .filter_map(|entry| match ItemId::parse(entry) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Ignoring entry in {field}: {e}");
                None
            }
        })
        .collect()
}
