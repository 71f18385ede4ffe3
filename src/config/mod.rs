//! Configuration for autotier
//!
//! All settings live in a single TOML file (`autotier.toml` by default, see
//! [`crate::constants::DEFAULT_CONFIG_FILE`]). The file is read once per
//! command and the resulting [`TierlistConfig`] is passed explicitly into
//! every pipeline run; there is no process-wide configuration state.
//!
//! # Modules
//!
//! - `settings` - the [`TierlistConfig`] schema, loading, saving and sanitizing
//! - `overrides` - parsing of `namespace:path=tier` override entries
//! - `filter` - the per-kind [`ItemFilter`]
//! - `tags` - [`TagDescriptor`]s for tag-mode grouping
//!
//! # Error Handling
//!
//! Only an unreadable or syntactically broken file is an error. Individual
//! bad values (out-of-range numbers, malformed override entries, unusable tag
//! groups, invalid item ids in lists) are logged and skipped or clamped.

pub mod filter;
pub mod overrides;
pub mod settings;
pub mod tags;

pub use filter::ItemFilter;
pub use overrides::{ParsedOverrides, parse_override, parse_overrides};
pub use settings::{
    ConfigIssue, FilterSettings, GenerationSettings, KindSettings, LayoutSettings, TierlistConfig,
};
pub use tags::{TagDescriptor, TagHeader};
