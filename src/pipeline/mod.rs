//! Tierlist generation.
//!
//! One [`Pipeline::run`] produces the layout of a single item kind:
//!
//! 1. filter the snapshot down to the kind's items
//! 2. score and assign tiers (overrides first)
//! 3. fetch the recipe graph and restrict it to the selected items
//! 4. group items into chains, or tag groups when progression is off
//! 5. assign columns per group, then grid coordinates
//! 6. wire cycle-free dependency edges (chain mode only)
//!
//! Each kind runs independently. A failure or an empty item set in one kind
//! never prevents the others from being generated; see [`generate_all`].
//!
//! The pipeline is synchronous and keeps no state between runs. Running it
//! twice on the same input yields the same layout and fingerprint.

pub mod output;
pub mod profile;

use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, error, info, warn};

use crate::config::{ItemFilter, TierlistConfig, parse_overrides};
use crate::core::{AutotierError, ItemId, ScannedItem};
use crate::graph::{
    ChainGrouper, DependencyEdgeBuilder, DependencyGraphSource, Group, RecipeGraph, group_by_tags,
};
use crate::layout::ColumnLayoutEngine;
use crate::snapshot::ItemSnapshot;
use crate::tiers::TierAssigner;

pub use output::{GroupSummary, HeaderNode, PlacedItem, TierMarker, TierlistLayout, fingerprint};
pub use profile::{ItemKind, KindProfile};

/// Outcome of one kind's run.
#[derive(Debug, Clone)]
pub enum KindOutcome {
    Generated(Box<TierlistLayout>),
    /// Nothing to lay out; not an error.
    Skipped {
        kind: ItemKind,
        reason: String,
    },
}

/// Runs the generation steps for one item kind at a time.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    config: &'a TierlistConfig,
    progression: bool,
}

impl<'a> Pipeline<'a> {
    /// Pipeline using the grouping mode configured in `config`.
    pub fn new(config: &'a TierlistConfig) -> Self {
        Self {
            config,
            progression: config.generation.enable_progression_alignment,
        }
    }

    /// Force chain mode (`true`) or tag mode (`false`).
    #[must_use]
    pub const fn with_progression(mut self, progression: bool) -> Self {
        self.progression = progression;
        self
    }

    pub fn run(
        &self,
        profile: &KindProfile,
        items: &[ScannedItem],
        source: &dyn DependencyGraphSource,
    ) -> Result<KindOutcome> {
        let kind = profile.kind;
        let config = self.config;
        let settings = kind.settings(config);
        info!("Generating {kind} tierlist");

        let filter = ItemFilter::new(
            settings,
            &config.filter,
            config.generation.use_attribute_detection,
            profile.score.detection_attribute(),
        );
        let selected = filter.apply(items);
        if selected.is_empty() {
            let reason = AutotierError::EmptyItemSet {
                kind: kind.to_string(),
            };
            warn!("{reason}");
            return Ok(KindOutcome::Skipped {
                kind,
                reason: reason.to_string(),
            });
        }

        let overrides = parse_overrides(&settings.tier_overrides).overrides;
        let scored: Vec<(&ItemId, f64)> =
            selected.iter().map(|item| (&item.id, profile.score.score(item))).collect();
        let tiering =
            TierAssigner::new(profile.formula.as_ref(), &overrides).assign(scored.iter().copied());
        info!("Found {} {kind} in {} tiers", tiering.item_count(), tiering.tiers().len());

        let ids: Vec<ItemId> = selected.iter().map(|item| item.id.clone()).collect();
        let id_set: BTreeSet<ItemId> = ids.iter().cloned().collect();

        let graph = if self.progression {
            match source.recipe_graph(&id_set) {
                Ok(graph) => graph.restricted_to(&id_set),
                Err(e) => {
                    warn!("{e}; progression alignment disabled for this {kind} run");
                    RecipeGraph::new()
                }
            }
        } else {
            RecipeGraph::new()
        };
        let progression = self.progression && !graph.is_empty();

        let groups = if progression {
            ChainGrouper::new(&graph, &tiering).group(&ids)
        } else {
            group_by_tags(&selected, &config.tag_groups)
        };
        log_groups(kind, progression, &groups);

        let spacing = config.layout.group_spacing(progression);
        let columns = ColumnLayoutEngine::new(&graph, &tiering, spacing).layout(&groups);
        let grid = config.layout.grid();

        let tag_labels: HashMap<&ItemId, &str> = groups
            .iter()
            .filter_map(|group| match group {
                Group::TagGroup {
                    members,
                    descriptor,
                } => Some(members.iter().map(move |id| (id, descriptor.label.as_str()))),
                _ => None,
            })
            .flatten()
            .collect();

        let mut placed = Vec::with_capacity(tiering.item_count());
        let mut tier_markers = Vec::with_capacity(tiering.tiers().len());
        for (index, (tier, tier_items)) in tiering.tiers().iter().enumerate() {
            let (x, y) = grid.tier_marker(index);
            tier_markers.push(TierMarker {
                tier: *tier,
                index,
                label: profile.label.label(*tier),
                x,
                y,
            });

            for item in tier_items {
                let Some(column) = columns.column_of(&item.id) else {
                    bail!("{} was tiered but never assigned a column", item.id);
                };
                let (x, y) = grid.position(index, item.row, column);
                placed.push((index, PlacedItem {
                    id: item.id.clone(),
                    tier: item.tier,
                    row: item.row,
                    column,
                    x,
                    y,
                    score: item.score,
                    tag_label: tag_labels.get(&item.id).map(ToString::to_string),
                }));
            }
        }
        placed.sort_by(|(ia, a), (ib, b)| {
            ia.cmp(ib)
                .then_with(|| a.row.cmp(&b.row))
                .then_with(|| a.column.cmp(&b.column))
                .then_with(|| a.score.total_cmp(&b.score))
                .then_with(|| a.id.cmp(&b.id))
        });
        let placed: Vec<PlacedItem> = placed.into_iter().map(|(_, item)| item).collect();

        let active_groups = groups.iter().filter(|group| !group.members().is_empty());
        let summaries: Vec<GroupSummary> = active_groups
            .clone()
            .zip(columns.spans())
            .map(|(group, span)| GroupSummary {
                kind: group.kind_name().to_string(),
                label: group.label(),
                start_column: span.start,
                end_column: span.end,
                members: group.members().len(),
            })
            .collect();

        let headers: Vec<HeaderNode> = if progression {
            Vec::new()
        } else {
            active_groups
                .zip(columns.spans())
                .filter_map(|(group, span)| match group {
                    Group::TagGroup {
                        descriptor,
                        ..
                    } => descriptor.header.as_ref().map(|header| {
                        let (x, y) = grid.tag_header(span.start, span.end);
                        HeaderNode {
                            label: descriptor.label.clone(),
                            title: header.title.clone(),
                            color: descriptor.color.clone(),
                            item: header.item.clone(),
                            x,
                            y,
                        }
                    }),
                    _ => None,
                })
                .collect()
        };

        let (edges, skipped_edges) = if progression {
            let mut builder = DependencyEdgeBuilder::new();
            builder.wire(&graph, |id: &ItemId| columns.column_of(id).map(|_| id.clone()));
            builder.finish()
        } else {
            (Vec::new(), Vec::new())
        };

        let layout = TierlistLayout {
            kind,
            chapter_id: kind.chapter_id(config),
            chapter_title: kind.chapter_title(config),
            progression,
            fingerprint: fingerprint(&placed),
            items: placed,
            tier_markers,
            headers,
            edges,
            skipped_edges,
            groups: summaries,
        };

        info!(
            "Generated {kind} tierlist: {} items, {} tiers, {} edges ({} skipped)",
            layout.items.len(),
            layout.tier_count(),
            layout.edges.len(),
            layout.skipped_edges.len()
        );
        Ok(KindOutcome::Generated(Box::new(layout)))
    }
}

fn log_groups(kind: ItemKind, progression: bool, groups: &[Group]) {
    let isolated = groups
        .iter()
        .filter(|group| matches!(group, Group::Isolated { .. }))
        .map(|group| group.members().len())
        .sum::<usize>();
    let grouped = groups.iter().filter(|group| !matches!(group, Group::Isolated { .. })).count();

    if progression {
        info!("Grouped {kind}: {grouped} chains + {isolated} isolated");
    } else {
        info!("Grouped {kind}: {grouped} tag groups + {isolated} isolated");
    }
    for group in groups {
        debug!("  {} ({} members)", group.label(), group.members().len());
    }
}

/// A kind whose run failed.
#[derive(Debug, Clone, Serialize)]
pub struct KindFailure {
    pub kind: ItemKind,
    pub error: String,
    /// The cause is a recoverable [`AutotierError`] (bad input rather than a
    /// broken environment); regenerating after fixing the input is enough.
    pub recoverable: bool,
}

impl KindFailure {
    pub fn from_error(kind: ItemKind, error: &anyhow::Error) -> Self {
        let recoverable = error
            .chain()
            .filter_map(|cause| cause.downcast_ref::<AutotierError>())
            .any(AutotierError::is_recoverable);
        Self {
            kind,
            error: format!("{error:#}"),
            recoverable,
        }
    }
}

/// A kind that had nothing to generate.
#[derive(Debug, Clone, Serialize)]
pub struct KindSkip {
    pub kind: ItemKind,
    pub reason: String,
}

/// Result of generating every requested kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub layouts: Vec<TierlistLayout>,
    pub failures: Vec<KindFailure>,
    pub skipped: Vec<KindSkip>,
}

impl GenerationReport {
    pub fn layout(&self, kind: ItemKind) -> Option<&TierlistLayout> {
        self.layouts.iter().find(|layout| layout.kind == kind)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Run every enabled kind in `kinds` as an isolated pipeline.
///
/// `progression` overrides the configured grouping mode when set.
pub fn generate_all(
    config: &TierlistConfig,
    snapshot: &ItemSnapshot,
    kinds: &[ItemKind],
    progression: Option<bool>,
) -> GenerationReport {
    let mut pipeline = Pipeline::new(config);
    if let Some(progression) = progression {
        pipeline = pipeline.with_progression(progression);
    }
    let source = snapshot.recipe_source(&config.filter.skipped_recipe_categories);

    let mut report = GenerationReport::default();
    for &kind in kinds {
        if !kind.is_enabled(config) {
            debug!("{kind} tierlist disabled in configuration");
            continue;
        }

        let profile = KindProfile::for_kind(kind, &config.layout);
        match pipeline.run(&profile, &snapshot.items, &source) {
            Ok(KindOutcome::Generated(layout)) => report.layouts.push(*layout),
            Ok(KindOutcome::Skipped {
                kind,
                reason,
            }) => report.skipped.push(KindSkip {
                kind,
                reason,
            }),
            Err(e) => {
                let failure = KindFailure::from_error(kind, &e);
                if failure.recoverable {
                    warn!("Failed to generate {kind} tierlist: {}", failure.error);
                } else {
                    error!("Failed to generate {kind} tierlist: {}", failure.error);
                }
                report.failures.push(failure);
            }
        }
    }
    report
}
