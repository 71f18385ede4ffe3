//! Column assignment.
//!
//! Groups are laid out left to right. Each group owns a contiguous column
//! range; the next group starts `spacing` empty columns after the right-most
//! column the previous group used.
//!
//! Inside a group no two items of the same tier share a column. Chain members
//! additionally never sit left of an in-chain ingredient.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

use crate::core::ItemId;
use crate::graph::{Group, RecipeGraph};
use crate::tiers::{Tier, Tiering};

pub type Column = u32;

/// Column range used by one group, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpan {
    pub start: Column,
    pub end: Column,
}

/// Result of column layout.
#[derive(Debug, Clone, Default)]
pub struct ColumnAssignment {
    columns: BTreeMap<ItemId, Column>,
    spans: Vec<GroupSpan>,
}

impl ColumnAssignment {
    pub fn column_of(&self, id: &ItemId) -> Option<Column> {
        self.columns.get(id).copied()
    }

    pub fn columns(&self) -> &BTreeMap<ItemId, Column> {
        &self.columns
    }

    /// One span per input group, in group order. Empty groups get no span.
    pub fn spans(&self) -> &[GroupSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Assigns columns to every member of an ordered group list.
#[derive(Debug, Clone, Copy)]
pub struct ColumnLayoutEngine<'a> {
    graph: &'a RecipeGraph,
    tiering: &'a Tiering,
    spacing: Column,
}

impl<'a> ColumnLayoutEngine<'a> {
    pub fn new(graph: &'a RecipeGraph, tiering: &'a Tiering, spacing: Column) -> Self {
        Self {
            graph,
            tiering,
            spacing,
        }
    }

    pub fn layout(&self, groups: &[Group]) -> ColumnAssignment {
        let mut assignment = ColumnAssignment::default();
        let mut start: Column = 0;

        for group in groups {
            if group.members().is_empty() {
                continue;
            }

            let end = match group {
                Group::ProgressionChain {
                    members,
                } => self.place_chain(members, start, &mut assignment.columns),
                Group::TagGroup {
                    members,
                    ..
                }
                | Group::Isolated {
                    members,
                } => self.place_sequential(members, start, &mut assignment.columns),
            };

            debug!("Group {} spans columns {start}..={end}", group.label());
            assignment.spans.push(GroupSpan {
                start,
                end,
            });
            start = end + 1 + self.spacing;
        }

        assignment
    }

    // Assigned tiers never exceed MAX_TIER, so untiered ids sort last.
    fn tier(&self, id: &ItemId) -> Tier {
        self.tiering.tier_of(id).unwrap_or(Tier::MAX)
    }

    fn score(&self, id: &ItemId) -> f64 {
        self.tiering.score_of(id).unwrap_or(0.0)
    }

    /// The n-th member of every tier goes to column `start + n`, after
    /// sorting by (tier, namespace, score, id). Returns the last column used.
    fn place_sequential(
        &self,
        members: &[ItemId],
        start: Column,
        columns: &mut BTreeMap<ItemId, Column>,
    ) -> Column {
        let mut sorted: Vec<&ItemId> = members.iter().collect();
        sorted.sort_by(|a, b| {
            self.tier(a)
                .cmp(&self.tier(b))
                .then_with(|| a.namespace().cmp(b.namespace()))
                .then_with(|| self.score(a).total_cmp(&self.score(b)))
                .then_with(|| a.cmp(b))
        });

        let mut per_tier: BTreeMap<Tier, Column> = BTreeMap::new();
        let mut end = start;
        for id in sorted {
            let slot = per_tier.entry(self.tier(id)).or_insert(0);
            let column = start + *slot;
            *slot += 1;
            end = end.max(column);
            columns.insert(id.clone(), column);
        }
        end
    }

    /// Chain placement. Returns the last column used.
    fn place_chain(
        &self,
        members: &[ItemId],
        start: Column,
        columns: &mut BTreeMap<ItemId, Column>,
    ) -> Column {
        let chain: BTreeSet<&ItemId> = members.iter().collect();
        let mut sorted: Vec<&ItemId> = chain.iter().copied().collect();
        sorted.sort_by(|a, b| {
            self.tier(a)
                .cmp(&self.tier(b))
                .then_with(|| self.score(a).total_cmp(&self.score(b)))
                .then_with(|| a.cmp(b))
        });

        let mut occupied: HashSet<(Tier, Column)> = HashSet::new();
        let mut next = start;
        let mut end = start;

        for id in sorted {
            let tier = self.tier(id);

            // In-chain ingredients that already have a column.
            let placed: Vec<(Tier, Column)> = self
                .graph
                .ingredients(id)
                .into_iter()
                .flatten()
                .filter(|ingredient| chain.contains(ingredient))
                .filter_map(|ingredient| {
                    columns.get(ingredient).map(|column| (self.tier(ingredient), *column))
                })
                .collect();

            let reusable = placed
                .iter()
                .filter(|(dep_tier, column)| *dep_tier < tier && !occupied.contains(&(tier, *column)))
                .map(|(_, column)| *column)
                .max();

            let mut column = reusable.unwrap_or_else(|| {
                let fresh = next;
                next += 1;
                fresh
            });

            if let Some(floor) = placed.iter().map(|(_, column)| *column).max()
                && column < floor
            {
                column = floor;
                while occupied.contains(&(tier, column)) {
                    column += 1;
                }
                if column >= next {
                    next = column + 1;
                }
            }

            occupied.insert((tier, column));
            end = end.max(column);
            columns.insert(id.clone(), column);
        }

        end
    }
}
