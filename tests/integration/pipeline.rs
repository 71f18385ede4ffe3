use autotier::config::TierlistConfig;
use autotier::core::{ItemId, ScannedItem, attributes};
use autotier::pipeline::{ItemKind, TierlistLayout, generate_all};
use autotier::snapshot::ItemSnapshot;
use autotier::test_utils::{ConfigFixture, SnapshotBuilder, init_test_logging};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use std::collections::{BTreeSet, HashMap, HashSet};

fn id(raw: &str) -> ItemId {
    ItemId::parse(raw).unwrap()
}

/// Deterministic pseudo-random snapshot: 30 weapons, forward recipes plus a
/// few back edges that close cycles.
fn tangled_snapshot() -> ItemSnapshot {
    let mut builder = SnapshotBuilder::new();
    for i in 0..30u64 {
        let damage = ((i * 7) % 13 + 1) as f64;
        builder = builder.weapon(&format!("test:w{i:02}"), damage, 1.0 + (i % 3) as f64 * 0.25);
    }

    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move |bound: u64| {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % bound
    };

    for i in 1..30u64 {
        if next(3) > 0 {
            let ingredient = next(i);
            builder = builder.recipe(&format!("test:w{i:02}"), &[&format!("test:w{ingredient:02}")]);
        }
    }
    for (output, ingredient) in [(2, 3), (3, 2), (5, 23), (11, 29)] {
        builder = builder.recipe(&format!("test:w{output:02}"), &[&format!("test:w{ingredient:02}")]);
    }
    builder.build()
}

fn recipe_pairs(snapshot: &ItemSnapshot) -> Vec<(ItemId, ItemId)> {
    snapshot
        .recipes
        .iter()
        .flatten()
        .flat_map(|recipe| {
            recipe.inputs.iter().map(move |input| (recipe.output.clone(), input.clone()))
        })
        .filter(|(output, input)| output != input)
        .collect()
}

fn weapons(snapshot: &ItemSnapshot, config: &TierlistConfig) -> TierlistLayout {
    let report = generate_all(config, snapshot, &[ItemKind::Weapons], None);
    assert!(!report.has_failures(), "{:?}", report.failures);
    report.layout(ItemKind::Weapons).cloned().unwrap()
}

#[test]
fn test_sword_chain_shares_one_column() {
    init_test_logging(None);
    let snapshot = SnapshotBuilder::sword_chain().build();
    let layout = weapons(&snapshot, &TierlistConfig::default());

    assert!(layout.progression);
    let tiers: Vec<_> = layout.items.iter().map(|item| (item.id.as_str(), item.tier)).collect();
    assert_eq!(
        tiers,
        vec![("minecraft:wooden_sword", 2), ("minecraft:stone_sword", 3), ("minecraft:iron_sword", 5)]
    );
    assert!(layout.items.iter().all(|item| item.column == 0 && item.row == 0));
    assert_eq!(layout.edges.len(), 2);
    assert!(layout.skipped_edges.is_empty());

    // Tier indices are sequential, so tier 5 sits directly below tier 3.
    let iron = layout.item(&id("minecraft:iron_sword")).unwrap();
    assert_eq!(iron.y, 4.0);
    assert_eq!(layout.tier_markers[2].label, "[5] DPS: [8.0-9.6)");
}

#[test]
fn test_every_item_placed_exactly_once() {
    let snapshot = tangled_snapshot();
    let layout = weapons(&snapshot, &TierlistConfig::default());

    let placed: Vec<&ItemId> = layout.items.iter().map(|item| &item.id).collect();
    let unique: BTreeSet<&ItemId> = placed.iter().copied().collect();
    assert_eq!(placed.len(), 30);
    assert_eq!(unique.len(), 30);

    let grouped: usize = layout.groups.iter().map(|group| group.members).sum();
    assert_eq!(grouped, 30);
}

#[test]
fn test_no_two_items_share_tier_and_column() {
    let layout = weapons(&tangled_snapshot(), &TierlistConfig::default());

    let mut seen = HashSet::new();
    for item in &layout.items {
        assert!(
            seen.insert((item.tier, item.column)),
            "{} collides at tier {} column {}",
            item.id,
            item.tier,
            item.column
        );
    }
}

#[test]
fn test_groups_occupy_disjoint_ranges() {
    let config = TierlistConfig::default();
    let layout = weapons(&tangled_snapshot(), &config);
    let spacing = config.layout.progression_group_spacing;

    for pair in layout.groups.windows(2) {
        assert!(pair[0].start_column <= pair[0].end_column);
        assert!(
            pair[1].start_column > pair[0].end_column + spacing,
            "{:?} overlaps {:?}",
            pair[0],
            pair[1]
        );
    }
    for item in &layout.items {
        let inside = layout
            .groups
            .iter()
            .filter(|group| (group.start_column..=group.end_column).contains(&item.column))
            .count();
        assert_eq!(inside, 1, "{} sits in {inside} group ranges", item.id);
    }
}

#[test]
fn test_dependents_never_left_of_lower_tier_ingredients() {
    let snapshot = tangled_snapshot();
    let layout = weapons(&snapshot, &TierlistConfig::default());
    let placed: HashMap<&ItemId, (i32, u32)> =
        layout.items.iter().map(|item| (&item.id, (item.tier, item.column))).collect();

    for (output, ingredient) in recipe_pairs(&snapshot) {
        let (out_tier, out_column) = placed[&output];
        let (in_tier, in_column) = placed[&ingredient];
        if in_tier < out_tier {
            assert!(
                out_column >= in_column,
                "{output} (column {out_column}) is left of {ingredient} (column {in_column})"
            );
        }
    }
}

#[test]
fn test_accepted_edges_are_acyclic() {
    let snapshot = tangled_snapshot();
    let layout = weapons(&snapshot, &TierlistConfig::default());
    assert!(!layout.skipped_edges.is_empty(), "back edges should be refused");

    let mut graph = DiGraph::<&ItemId, ()>::new();
    let mut nodes = HashMap::new();
    for edge in &layout.edges {
        let from = *nodes.entry(&edge.dependent).or_insert_with(|| graph.add_node(&edge.dependent));
        let to = *nodes.entry(&edge.dependency).or_insert_with(|| graph.add_node(&edge.dependency));
        graph.add_edge(from, to, ());
    }
    assert!(!is_cyclic_directed(&graph));

    for skipped in &layout.skipped_edges {
        assert_eq!(skipped.cycle.first(), skipped.cycle.last());
    }
}

#[test]
fn test_regeneration_is_idempotent() {
    let snapshot = tangled_snapshot();
    let config = TierlistConfig::default();

    let first = generate_all(&config, &snapshot, &ItemKind::ALL, None);
    let second = generate_all(&config, &snapshot, &ItemKind::ALL, None);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(
        first.layout(ItemKind::Weapons).unwrap().fingerprint,
        second.layout(ItemKind::Weapons).unwrap().fingerprint
    );
}

#[test]
fn test_two_cycle_keeps_one_edge() {
    let snapshot = SnapshotBuilder::new()
        .weapon("test:alpha", 4.0, 1.0)
        .weapon("test:beta", 8.0, 1.0)
        .recipe("test:alpha", &["test:beta"])
        .recipe("test:beta", &["test:alpha"])
        .build();

    let layout = weapons(&snapshot, &TierlistConfig::default());
    assert_eq!(layout.edges.len(), 1);
    assert_eq!(layout.skipped_edges.len(), 1);
    assert_eq!(layout.groups.len(), 1);
    assert_eq!(layout.groups[0].kind, "chain");
}

#[test]
fn test_tag_mode_groups_and_headers() {
    let config: TierlistConfig = toml::from_str(ConfigFixture::tag_mode()).unwrap();
    let snapshot = SnapshotBuilder::new()
        .item(
            ScannedItem::new(id("test:one"))
                .with_attribute(attributes::ATTACK_DAMAGE, 4.0)
                .with_attribute(attributes::ATTACK_SPEED, 1.0)
                .with_tag("forge:tier/early"),
        )
        .item(
            ScannedItem::new(id("test:two"))
                .with_attribute(attributes::ATTACK_DAMAGE, 4.5)
                .with_attribute(attributes::ATTACK_SPEED, 1.0)
                .with_tag("forge:tier/early"),
        )
        .item(
            ScannedItem::new(id("test:three"))
                .with_attribute(attributes::ATTACK_DAMAGE, 5.0)
                .with_attribute(attributes::ATTACK_SPEED, 1.0)
                .with_tag("forge:tier/late"),
        )
        .recipe("test:two", &["test:one"])
        .build();

    let layout = weapons(&snapshot, &config);
    assert!(!layout.progression);
    assert!(layout.edges.is_empty());

    let columns: Vec<_> = ["test:one", "test:two", "test:three"]
        .iter()
        .map(|raw| layout.item(&id(raw)).unwrap().column)
        .collect();
    assert_eq!(columns, vec![0, 1, 4]);
    assert_eq!(layout.item(&id("test:three")).unwrap().tag_label.as_deref(), Some("Late"));

    assert_eq!(layout.headers.len(), 1);
    assert_eq!(layout.headers[0].title, "Early game");
    assert_eq!((layout.headers[0].x, layout.headers[0].y), (0.5, -4.0));
}

#[test]
fn test_missing_recipes_fall_back_to_tag_layout() {
    let snapshot = SnapshotBuilder::new()
        .weapon("test:a", 4.0, 1.0)
        .weapon("test:b", 5.0, 1.0)
        .build();

    let layout = weapons(&snapshot, &TierlistConfig::default());
    assert!(!layout.progression);
    assert!(layout.edges.is_empty());
    assert_eq!(layout.groups.len(), 1);
    assert_eq!(layout.groups[0].kind, "isolated");
}

#[test]
fn test_empty_kind_does_not_block_other_kind() {
    let snapshot = SnapshotBuilder::new()
        .armor("minecraft:iron_chestplate", 6.0, 0.0)
        .with_recipe_section()
        .build();

    let report = generate_all(&TierlistConfig::default(), &snapshot, &ItemKind::ALL, None);
    assert!(!report.has_failures());
    assert!(report.layout(ItemKind::Weapons).is_none());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].kind, ItemKind::Weapons);

    let armor = report.layout(ItemKind::Armor).unwrap();
    assert_eq!(armor.items.len(), 1);
    assert_eq!(armor.items[0].tier, 6);
}

#[test]
fn test_override_moves_item_and_its_column_follows() {
    let mut config = TierlistConfig::default();
    config.weapons.tier_overrides = vec!["minecraft:wooden_sword=7".to_string()];
    let snapshot = SnapshotBuilder::sword_chain().build();

    let layout = weapons(&snapshot, &config);
    let wooden = layout.item(&id("minecraft:wooden_sword")).unwrap();
    assert_eq!(wooden.tier, 7);
    assert_eq!(layout.items.last().unwrap().id, id("minecraft:wooden_sword"));
}
