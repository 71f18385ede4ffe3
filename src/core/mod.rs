//! Core types for autotier
//!
//! This module holds the types every other module depends on:
//!
//! - [`ItemId`] and [`ScannedItem`]: identifiers and attribute records of the
//!   game objects being ranked
//! - [`AutotierError`]: the strongly-typed error enum
//! - [`ErrorContext`] and [`user_friendly_error`]: colored, actionable error
//!   reports for the CLI
//!
//! # Examples
//!
//! ```rust
//! use autotier::core::{ItemId, ScannedItem, attributes};
//!
//! let sword = ScannedItem::new(ItemId::parse("minecraft:iron_sword")?)
//!     .with_attribute(attributes::ATTACK_DAMAGE, 6.0)
//!     .with_attribute(attributes::ATTACK_SPEED, 1.6);
//! assert_eq!(sword.id.namespace(), "minecraft");
//! # Ok::<(), autotier::core::AutotierError>(())
//! ```

pub mod error;
pub mod item;

pub use error::{AutotierError, ErrorContext, user_friendly_error};
pub use item::{AttributeSet, DEFAULT_NAMESPACE, ItemId, ScannedItem, attributes};
