//! Cycle-safe dependency edge creation.
//!
//! Edges "dependent requires dependency" are wired between rendered nodes.
//! Before an edge is inserted, the accepted edge set is searched for a path
//! from the dependency back to the dependent; such an edge would close a cycle
//! and is dropped instead. The accepted set is therefore acyclic by
//! construction.
//!
//! Which edge of a cycle survives depends on insertion order. [`wire`] visits
//! candidate pairs in [`RecipeGraph::pairs`] order (outputs ascending, then
//! ingredients ascending), so the result is reproducible.
//!
//! [`wire`]: DependencyEdgeBuilder::wire

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, warn};

use crate::core::{AutotierError, ItemId};
use crate::graph::RecipeGraph;

/// An accepted edge: `dependent` requires `dependency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge<H> {
    pub dependent: H,
    pub dependency: H,
}

/// A rejected edge and the cycle it would have closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEdge<H> {
    pub dependent: H,
    pub dependency: H,
    /// `dependency -> ... -> dependent -> dependency`
    pub cycle: Vec<H>,
}

/// Incrementally built acyclic edge set over node handles `H`.
pub struct DependencyEdgeBuilder<H> {
    graph: DiGraph<H, ()>,
    node_map: HashMap<H, NodeIndex>,
    accepted: Vec<DependencyEdge<H>>,
    skipped: Vec<SkippedEdge<H>>,
}

impl<H> DependencyEdgeBuilder<H>
where
    H: Clone + Eq + Hash + fmt::Display,
{
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            accepted: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn ensure_node(&mut self, node: &H) -> NodeIndex {
        if let Some(&index) = self.node_map.get(node) {
            index
        } else {
            let index = self.graph.add_node(node.clone());
            self.node_map.insert(node.clone(), index);
            index
        }
    }

    /// Shortest path `from -> ... -> to` over accepted edges, if any.
    pub fn find_path(&self, from: &H, to: &H) -> Option<Vec<H>> {
        let &start = self.node_map.get(from)?;
        let &goal = self.node_map.get(to)?;

        let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                let mut path = vec![self.graph[current].clone()];
                let mut cursor = current;
                while let Some(&prev) = previous.get(&cursor) {
                    path.push(self.graph[prev].clone());
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            for neighbor in self.graph.neighbors(current) {
                if neighbor != start && !previous.contains_key(&neighbor) {
                    previous.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }

    /// Insert `dependent -> dependency` unless it would close a cycle.
    ///
    /// Returns `Ok(false)` for a duplicate or self edge.
    pub fn try_add_edge(&mut self, dependent: &H, dependency: &H) -> Result<bool, AutotierError> {
        if dependent == dependency {
            return Ok(false);
        }

        if let Some(mut cycle) = self.find_path(dependency, dependent) {
            cycle.push(dependency.clone());
            let chain = render_path(&cycle);
            self.skipped.push(SkippedEdge {
                dependent: dependent.clone(),
                dependency: dependency.clone(),
                cycle,
            });
            return Err(AutotierError::CircularDependency {
                chain,
            });
        }

        let from = self.ensure_node(dependent);
        let to = self.ensure_node(dependency);
        if self.graph.contains_edge(from, to) {
            return Ok(false);
        }
        self.graph.add_edge(from, to, ());
        self.accepted.push(DependencyEdge {
            dependent: dependent.clone(),
            dependency: dependency.clone(),
        });
        Ok(true)
    }

    /// Wire every `(output, ingredient)` pair of `recipes` whose two sides
    /// have a rendered node according to `lookup`.
    pub fn wire<F>(&mut self, recipes: &RecipeGraph, lookup: F)
    where
        F: Fn(&ItemId) -> Option<H>,
    {
        for (output, ingredient) in recipes.pairs() {
            let (Some(dependent), Some(dependency)) = (lookup(output), lookup(ingredient)) else {
                continue;
            };
            match self.try_add_edge(&dependent, &dependency) {
                Ok(true) => debug!("Edge {dependent} -> {dependency}"),
                Ok(false) => {}
                Err(e) => warn!("Skipping edge {dependent} -> {dependency}: {e}"),
            }
        }
    }

    pub fn edges(&self) -> &[DependencyEdge<H>] {
        &self.accepted
    }

    pub fn skipped(&self) -> &[SkippedEdge<H>] {
        &self.skipped
    }

    pub fn edge_count(&self) -> usize {
        self.accepted.len()
    }

    /// Consume the builder, returning accepted and skipped edges.
    pub fn finish(self) -> (Vec<DependencyEdge<H>>, Vec<SkippedEdge<H>>) {
        (self.accepted, self.skipped)
    }
}

impl<H> Default for DependencyEdgeBuilder<H>
where
    H: Clone + Eq + Hash + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

fn render_path<H: fmt::Display>(path: &[H]) -> String {
    path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ")
}
