//! Placing tiered items on the grid.
//!
//! [`ColumnLayoutEngine`] decides columns; [`GridPositionMapper`] turns tier
//! index, row and column into coordinates for the renderer.

pub mod columns;
pub mod grid;

pub use columns::{Column, ColumnAssignment, ColumnLayoutEngine, GroupSpan};
pub use grid::GridPositionMapper;
