//! Recipe graphs and the sources that produce them.
//!
//! A [`RecipeGraph`] maps an output item to the set of ingredient items it is
//! crafted from. Graphs are snapshots built once per generation run and
//! always restricted to the working item set before use.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::core::{AutotierError, ItemId};

/// Output → ingredient adjacency.
///
/// Iteration is ordered by output id, and each ingredient set is ordered by
/// id, which fixes the canonical edge order used by edge creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeGraph {
    edges: BTreeMap<ItemId, BTreeSet<ItemId>>,
}

impl RecipeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `output` is crafted from `ingredient`.
    pub fn insert(&mut self, output: ItemId, ingredient: ItemId) {
        self.edges.entry(output).or_default().insert(ingredient);
    }

    /// In-graph ingredients of `output`.
    pub fn ingredients(&self, output: &ItemId) -> Option<&BTreeSet<ItemId>> {
        self.edges.get(output)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &BTreeSet<ItemId>)> {
        self.edges.iter()
    }

    /// All `(output, ingredient)` pairs in canonical order.
    pub fn pairs(&self) -> impl Iterator<Item = (&ItemId, &ItemId)> {
        self.edges.iter().flat_map(|(output, ingredients)| {
            ingredients.iter().map(move |ingredient| (output, ingredient))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of outputs with at least one ingredient.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    /// Ingredient → outputs that consume it.
    pub fn reverse(&self) -> BTreeMap<ItemId, BTreeSet<ItemId>> {
        let mut reverse: BTreeMap<ItemId, BTreeSet<ItemId>> = BTreeMap::new();
        for (output, ingredient) in self.pairs() {
            reverse.entry(ingredient.clone()).or_default().insert(output.clone());
        }
        reverse
    }

    /// Copy of this graph keeping only outputs and ingredients in `ids`.
    ///
    /// Self-loops are removed and outputs left without ingredients are
    /// dropped.
    #[must_use]
    pub fn restricted_to(&self, ids: &BTreeSet<ItemId>) -> Self {
        let edges = self
            .edges
            .iter()
            .filter(|(output, _)| ids.contains(*output))
            .filter_map(|(output, ingredients)| {
                let kept: BTreeSet<ItemId> = ingredients
                    .iter()
                    .filter(|ingredient| *ingredient != output && ids.contains(*ingredient))
                    .cloned()
                    .collect();
                (!kept.is_empty()).then(|| (output.clone(), kept))
            })
            .collect();
        Self {
            edges,
        }
    }
}

impl FromIterator<(ItemId, ItemId)> for RecipeGraph {
    fn from_iter<I: IntoIterator<Item = (ItemId, ItemId)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (output, ingredient) in iter {
            graph.insert(output, ingredient);
        }
        graph
    }
}

/// Supplies the recipe graph for a set of items.
///
/// Returning an empty graph is legitimate (no known recipes). An error means
/// the source itself is unavailable; callers degrade to tag grouping.
pub trait DependencyGraphSource {
    fn recipe_graph(&self, ids: &BTreeSet<ItemId>) -> Result<RecipeGraph, AutotierError>;
}

/// A single crafting recipe from the item snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identifier (`minecraft:iron_sword_from_smithing`, ...).
    pub id: String,

    /// Recipe category (`minecraft:crafting`, `emi:anvil_repairing`, ...).
    #[serde(default)]
    pub category: String,

    pub output: ItemId,

    #[serde(default)]
    pub inputs: Vec<ItemId>,
}

/// Recipe ids containing this marker are cosmetic and never form progression.
const COSMETIC_RECIPE_MARKER: &str = "trim";

/// [`DependencyGraphSource`] backed by the recipe list of a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct RecipeBookSource<'a> {
    recipes: Option<&'a [Recipe]>,
    skipped_categories: &'a [String],
}

impl<'a> RecipeBookSource<'a> {
    /// `recipes` is `None` when the snapshot carries no recipe section at all.
    pub fn new(recipes: Option<&'a [Recipe]>, skipped_categories: &'a [String]) -> Self {
        Self {
            recipes,
            skipped_categories,
        }
    }

    fn is_skipped(&self, recipe: &Recipe) -> bool {
        self.skipped_categories.iter().any(|category| *category == recipe.category)
            || recipe.id.contains(COSMETIC_RECIPE_MARKER)
    }
}

impl DependencyGraphSource for RecipeBookSource<'_> {
    fn recipe_graph(&self, ids: &BTreeSet<ItemId>) -> Result<RecipeGraph, AutotierError> {
        let recipes = self.recipes.ok_or_else(|| AutotierError::GraphSourceUnavailable {
            reason: "item snapshot has no recipe section".to_string(),
        })?;

        let mut graph = RecipeGraph::new();
        let mut skipped = 0usize;

        for recipe in recipes {
            if !ids.contains(&recipe.output) {
                continue;
            }
            if self.is_skipped(recipe) {
                skipped += 1;
                continue;
            }
            for input in &recipe.inputs {
                if *input != recipe.output && ids.contains(input) {
                    graph.insert(recipe.output.clone(), input.clone());
                }
            }
        }

        debug!(
            "Recipe graph: {} outputs, {} edges ({} recipes skipped)",
            graph.len(),
            graph.edge_count(),
            skipped
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ItemId {
        ItemId::parse(raw).unwrap()
    }

    fn ids(raw: &[&str]) -> BTreeSet<ItemId> {
        raw.iter().map(|r| id(r)).collect()
    }

    fn recipe(recipe_id: &str, category: &str, output: &str, inputs: &[&str]) -> Recipe {
        Recipe {
            id: recipe_id.to_string(),
            category: category.to_string(),
            output: id(output),
            inputs: inputs.iter().map(|i| id(i)).collect(),
        }
    }

    #[test]
    fn test_restricted_to_drops_outside_ids_and_self_loops() {
        let graph: RecipeGraph = [
            (id("m:b"), id("m:a")),
            (id("m:b"), id("m:b")),
            (id("m:b"), id("m:outside")),
            (id("m:outside"), id("m:a")),
            (id("m:c"), id("m:c")),
        ]
        .into_iter()
        .collect();

        let restricted = graph.restricted_to(&ids(&["m:a", "m:b", "m:c"]));
        assert_eq!(restricted.len(), 1);
        assert_eq!(restricted.ingredients(&id("m:b")), Some(&ids(&["m:a"])));
        assert!(restricted.ingredients(&id("m:c")).is_none());
    }

    #[test]
    fn test_reverse() {
        let graph: RecipeGraph =
            [(id("m:b"), id("m:a")), (id("m:c"), id("m:a"))].into_iter().collect();
        let reverse = graph.reverse();
        assert_eq!(reverse[&id("m:a")], ids(&["m:b", "m:c"]));
    }

    #[test]
    fn test_recipe_book_filters() {
        let skipped = vec!["emi:anvil_repairing".to_string()];
        let recipes = vec![
            recipe("m:stone_sword", "minecraft:crafting", "m:stone_sword", &["m:wood_sword", "m:stick"]),
            recipe("m:repair", "emi:anvil_repairing", "m:iron_sword", &["m:stone_sword"]),
            recipe("m:iron_sword_trim", "minecraft:smithing", "m:iron_sword", &["m:wood_sword"]),
            recipe("m:iron_sword", "minecraft:smithing", "m:iron_sword", &["m:iron_sword", "m:stone_sword"]),
            recipe("m:iron_sword_alt", "minecraft:crafting", "m:iron_sword", &["m:wood_sword"]),
        ];
        let source = RecipeBookSource::new(Some(recipes.as_slice()), &skipped);
        let graph = source
            .recipe_graph(&ids(&["m:wood_sword", "m:stone_sword", "m:iron_sword"]))
            .unwrap();

        assert_eq!(graph.ingredients(&id("m:stone_sword")), Some(&ids(&["m:wood_sword"])));
        assert_eq!(
            graph.ingredients(&id("m:iron_sword")),
            Some(&ids(&["m:stone_sword", "m:wood_sword"]))
        );
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_recipe_book_without_recipes_is_unavailable() {
        let source = RecipeBookSource::new(None, &[]);
        let err = source.recipe_graph(&ids(&["m:a"])).unwrap_err();
        assert!(matches!(err, AutotierError::GraphSourceUnavailable { .. }));
    }

    #[test]
    fn test_recipe_book_empty_is_ok() {
        let recipes: Vec<Recipe> = Vec::new();
        let source = RecipeBookSource::new(Some(recipes.as_slice()), &[]);
        assert!(source.recipe_graph(&ids(&["m:a"])).unwrap().is_empty());
    }
}
