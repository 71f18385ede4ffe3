//! Partitioning items into layout groups.
//!
//! Two mutually exclusive modes exist:
//!
//! - **Chain mode** ([`ChainGrouper`]): items connected by crafting
//!   relationships form progression chains; everything else is isolated.
//! - **Tag mode** ([`group_by_tags`]): items are claimed by the first tag
//!   descriptor that matches them; unclaimed items are isolated.
//!
//! Both modes produce a partition: every input id lands in exactly one group.

use petgraph::unionfind::UnionFind;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::config::TagDescriptor;
use crate::core::{ItemId, ScannedItem};
use crate::graph::RecipeGraph;
use crate::tiers::{Tier, Tiering};

/// A layout group.
#[derive(Debug, Clone, PartialEq)]
pub enum Group {
    /// Items connected by crafting relationships, ordered by
    /// (tier, score, id).
    ProgressionChain {
        members: Vec<ItemId>,
    },
    /// Items claimed by a tag descriptor, in input order.
    TagGroup {
        members: Vec<ItemId>,
        descriptor: TagDescriptor,
    },
    /// Items without any grouping relationship, in input order.
    Isolated {
        members: Vec<ItemId>,
    },
}

impl Group {
    pub fn members(&self) -> &[ItemId] {
        match self {
            Self::ProgressionChain {
                members,
            }
            | Self::TagGroup {
                members,
                ..
            }
            | Self::Isolated {
                members,
            } => members,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ProgressionChain {
                ..
            } => "chain",
            Self::TagGroup {
                ..
            } => "tag",
            Self::Isolated {
                ..
            } => "isolated",
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::ProgressionChain {
                members,
            } => members.first().map_or_else(|| "chain".to_string(), |first| format!("chain:{first}")),
            Self::TagGroup {
                descriptor,
                ..
            } => descriptor.label.clone(),
            Self::Isolated {
                ..
            } => "isolated".to_string(),
        }
    }

    pub const fn is_chain(&self) -> bool {
        matches!(self, Self::ProgressionChain { .. })
    }
}

/// Groups items into progression chains by graph connectivity.
#[derive(Debug, Clone, Copy)]
pub struct ChainGrouper<'a> {
    graph: &'a RecipeGraph,
    tiering: &'a Tiering,
}

impl<'a> ChainGrouper<'a> {
    pub fn new(graph: &'a RecipeGraph, tiering: &'a Tiering) -> Self {
        Self {
            graph,
            tiering,
        }
    }

    /// Partition `ids` into chains (ordered by minimum tier, then smallest
    /// member id) followed by at most one isolated group.
    ///
    /// Connectivity is the symmetric closure of "is ingredient of" over edges
    /// whose endpoints are both in `ids`.
    pub fn group(&self, ids: &[ItemId]) -> Vec<Group> {
        let index: HashMap<&ItemId, usize> =
            ids.iter().enumerate().map(|(i, id)| (id, i)).collect();

        let mut sets = UnionFind::<usize>::new(ids.len());
        let mut participates = vec![false; ids.len()];

        for (output, ingredient) in self.graph.pairs() {
            if let (Some(&o), Some(&i)) = (index.get(output), index.get(ingredient))
                && o != i
            {
                sets.union(o, i);
                participates[o] = true;
                participates[i] = true;
            }
        }

        let mut components: BTreeMap<usize, Vec<ItemId>> = BTreeMap::new();
        let mut isolated = Vec::new();
        let mut seen = BTreeSet::new();

        for (i, id) in ids.iter().enumerate() {
            if !seen.insert(id) {
                continue;
            }
            if participates[i] {
                components.entry(sets.find(i)).or_default().push(id.clone());
            } else {
                isolated.push(id.clone());
            }
        }

        let mut chains: Vec<(Tier, Option<ItemId>, Vec<ItemId>)> = components
            .into_values()
            .map(|mut members| {
                members.sort_by(|a, b| self.visit_order(a, b));
                let min_tier = members.iter().map(|m| self.tier(m)).min().unwrap_or(Tier::MAX);
                let min_id = members.iter().min().cloned();
                (min_tier, min_id, members)
            })
            .collect();
        chains.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        let mut groups: Vec<Group> = chains
            .into_iter()
            .map(|(_, _, members)| Group::ProgressionChain {
                members,
            })
            .collect();

        if !isolated.is_empty() {
            groups.push(Group::Isolated {
                members: isolated,
            });
        }

        groups
    }

    // Assigned tiers never exceed MAX_TIER, so untiered ids sort last.
    fn tier(&self, id: &ItemId) -> Tier {
        self.tiering.tier_of(id).unwrap_or(Tier::MAX)
    }

    fn score(&self, id: &ItemId) -> f64 {
        self.tiering.score_of(id).unwrap_or(0.0)
    }

    /// (tier, score, id) ascending.
    pub fn visit_order(&self, a: &ItemId, b: &ItemId) -> std::cmp::Ordering {
        self.tier(a)
            .cmp(&self.tier(b))
            .then_with(|| self.score(a).total_cmp(&self.score(b)))
            .then_with(|| a.cmp(b))
    }
}

/// Group `items` by the first matching descriptor, in descriptor order.
///
/// Descriptors that claim nothing produce no group. Unclaimed items form a
/// trailing isolated group.
pub fn group_by_tags(items: &[&ScannedItem], descriptors: &[TagDescriptor]) -> Vec<Group> {
    let mut claimed: BTreeSet<&ItemId> = BTreeSet::new();
    let mut groups = Vec::new();

    for descriptor in descriptors {
        let matched: Vec<&ScannedItem> = items
            .iter()
            .copied()
            .filter(|item| !claimed.contains(&item.id) && descriptor.matches(item))
            .collect();
        if matched.is_empty() {
            continue;
        }
        claimed.extend(matched.iter().map(|item| &item.id));
        groups.push(Group::TagGroup {
            members: matched.iter().map(|item| item.id.clone()).collect(),
            descriptor: descriptor.clone(),
        });
    }

    let mut isolated = Vec::new();
    for item in items {
        if claimed.insert(&item.id) {
            isolated.push(item.id.clone());
        }
    }
    if !isolated.is_empty() {
        groups.push(Group::Isolated {
            members: isolated,
        });
    }

    groups
}
