//! Tag group descriptors for tag-mode grouping.
//!
//! ```toml
//! [[tag_groups]]
//! tags = ["forge:tier/a"]
//! label = "A"
//! color = "c"
//! header = { item = "minecraft:diamond", title = "Tier A" }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{AutotierError, ItemId, ScannedItem};

/// An ordered tag group: items carrying any of `tags` belong to it, unless
/// an earlier descriptor already claimed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDescriptor {
    pub tags: Vec<String>,

    pub label: String,

    /// Formatting color code used by the renderer for the header title.
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<TagHeader>,
}

/// Optional header node drawn above a tag group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagHeader {
    /// Icon item of the header node.
    pub item: ItemId,
    pub title: String,
}

fn default_color() -> String {
    "f".to_string()
}

impl TagDescriptor {
    pub fn new<I, S>(label: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            label: label.into(),
            color: default_color(),
            header: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, item: ItemId, title: impl Into<String>) -> Self {
        self.header = Some(TagHeader {
            item,
            title: title.into(),
        });
        self
    }

    pub fn matches(&self, item: &ScannedItem) -> bool {
        self.tags.iter().any(|tag| item.has_tag(tag))
    }

    /// Reject descriptors that can never match or cannot be labelled.
    pub fn validate(&self) -> Result<(), AutotierError> {
        let invalid = |reason: &str| AutotierError::InvalidTagDescriptor {
            label: self.label.clone(),
            reason: reason.to_string(),
        };
        if self.label.trim().is_empty() {
            return Err(invalid("label is empty"));
        }
        if self.tags.iter().all(|tag| tag.trim().is_empty()) {
            return Err(invalid("no tags to match"));
        }
        Ok(())
    }
}
