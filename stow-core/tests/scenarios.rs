use jiff::ToSpan;
use stow_core::{Container, Engine, EngineConfig, Item, SimulatedClock};

fn date(y: i16, m: i8, d: i8) -> jiff::civil::Date {
    jiff::civil::Date::new(y, m, d).unwrap()
}

fn engine() -> Engine {
    Engine::new(SimulatedClock::new(date(2026, 1, 1)), EngineConfig::default())
}

/// L1: placing into an empty container then computing the retrieval plan
/// yields exactly one step and no blockers.
#[test]
fn l1_place_then_retrieve_has_no_blockers() {
    let mut engine = engine();
    engine.add_container(Container::new("A".into(), "Crew Quarters".into(), 100, 85, 200).unwrap());
    engine.add_item(Item::new("X".into(), "widget".into(), 10, 10, 20, 1.0, 80, None, 1, "Crew Quarters".into()).unwrap());

    let outcome = engine.place_item("X").unwrap();
    assert!(outcome.is_some());

    let steps = engine.retrieval_plan("X").unwrap();
    assert_eq!(steps.len(), 1);
}

/// L2: after a commit, the container's occupied volume grows by exactly
/// the chosen orientation's volume.
#[test]
fn l2_placement_consumes_exactly_the_chosen_orientation_volume() {
    let mut engine = engine();
    engine.add_container(Container::new("A".into(), "Crew Quarters".into(), 100, 85, 200).unwrap());
    engine.add_item(Item::new("X".into(), "widget".into(), 10, 10, 20, 1.0, 80, None, 1, "Crew Quarters".into()).unwrap());

    let outcome = engine.place_item("X").unwrap().expect("fits");
    let container = engine.container("A").unwrap();
    assert_eq!(container.occupancy().len(), 1);
    assert_eq!(outcome.region.volume(), 10 * 10 * 20);
}

/// P1: after any mutating operation, no two occupancy boxes in any
/// container overlap, and every box lies within the container's bounds.
#[test]
fn p1_no_overlap_after_multiple_placements() {
    let mut engine = engine();
    engine.add_container(Container::new("A".into(), "Crew Quarters".into(), 50, 50, 50).unwrap());
    for i in 0..4 {
        let id = format!("item-{i}");
        engine.add_item(Item::new(id.clone(), id.clone(), 10, 10, 10, 1.0, 50, None, 1, "Crew Quarters".into()).unwrap());
        engine.place_item(&id).unwrap();
    }

    let container = engine.container("A").unwrap();
    let occupancy = container.occupancy();
    for i in 0..occupancy.len() {
        for j in (i + 1)..occupancy.len() {
            assert!(!occupancy[i].1.overlaps(&occupancy[j].1));
        }
        assert!(occupancy[i].1.fits_within(container.width, container.depth, container.height));
    }
}

/// P3: a placed item's registry placement matches exactly one occupancy
/// entry in the container it names.
#[test]
fn p3_item_placement_matches_container_occupancy() {
    let mut engine = engine();
    engine.add_container(Container::new("A".into(), "Crew Quarters".into(), 50, 50, 50).unwrap());
    engine.add_item(Item::new("X".into(), "widget".into(), 10, 10, 20, 1.0, 80, None, 1, "Crew Quarters".into()).unwrap());

    engine.place_item("X").unwrap();

    let item = engine.item("X").unwrap();
    let (container_id, placement) = item.current_placement().expect("item was placed");
    let container = engine.container(container_id).unwrap();
    let matches: Vec<_> = container
        .occupancy()
        .iter()
        .filter(|(id, region)| id == "X" && region == placement)
        .collect();
    assert_eq!(matches.len(), 1);
}

/// P2: uses_remaining stays within [0, usage_limit] and never increases.
#[test]
fn p2_uses_remaining_is_bounded_and_non_increasing() {
    let mut engine = engine();
    engine.add_container(Container::new("A".into(), "Zone".into(), 10, 10, 10).unwrap());
    engine.add_item(Item::new("i1".into(), "tool".into(), 1, 1, 1, 1.0, 50, None, 2, "Zone".into()).unwrap());

    let mut previous = u32::MAX;
    for _ in 0..4 {
        engine.simulate_day(&["i1".to_string()]);
        let uses = engine.item("i1").unwrap().uses_remaining();
        assert!(uses <= previous);
        assert!(uses <= 2);
        previous = uses;
    }
    assert_eq!(previous, 0);
}

/// L3: every waste return plan respects the mass cap.
#[test]
fn l3_waste_return_plan_respects_the_mass_cap() {
    let mut engine = engine();
    engine.add_container(Container::new("undock".into(), "Zone".into(), 100, 100, 100).unwrap());
    for (id, mass) in [("a", 4.0), ("b", 3.0), ("c", 8.0), ("d", 2.0)] {
        engine.add_item(Item::new(id.into(), id.into(), 1, 1, 1, mass, 50, None, 0, "Zone".into()).unwrap());
    }

    let plan = engine.waste_return_plan("undock", 10.0).unwrap();
    assert!(plan.manifest.total_weight <= 10.0);
}

/// L4: simulate_day strictly advances the date by one day.
#[test]
fn l4_simulate_day_strictly_advances_one_day() {
    let mut engine = engine();
    let before = engine.today();
    let (after, _) = engine.simulate_day(&[]);
    assert_eq!(after, before.checked_add(1.day()).unwrap());
}

/// S3 end to end through the engine: a shallower item blocks a deeper one
/// and must be set aside and replaced.
#[test]
fn s3_retrieval_plan_accounts_for_blockers_through_the_engine() {
    let mut engine = engine();
    // Width and height exactly match the items' footprint, so a second
    // identical item can only be placed deeper, never beside the first.
    engine.add_container(Container::new("A".into(), "Crew Quarters".into(), 10, 100, 20).unwrap());
    engine.add_item(Item::new("X".into(), "shallow".into(), 10, 10, 20, 1.0, 50, None, 1, "Crew Quarters".into()).unwrap());
    engine.add_item(Item::new("Y".into(), "deep".into(), 10, 10, 20, 1.0, 90, None, 1, "Crew Quarters".into()).unwrap());

    engine.place_item("X").unwrap();
    engine.place_item("Y").unwrap();

    let steps = engine.retrieval_plan("Y").unwrap();
    assert_eq!(steps.len(), 4, "X sits shallower than Y and must be removed and restored");
}

/// Completing an undocking removes every item it held and frees the
/// container for reuse.
#[test]
fn complete_undocking_clears_items_and_container() {
    let mut engine = engine();
    engine.add_container(Container::new("undock".into(), "Zone".into(), 100, 100, 100).unwrap());
    engine.add_item(Item::new("a".into(), "a".into(), 1, 1, 1, 1.0, 50, None, 0, "Zone".into()).unwrap());
    engine.place_item("a").unwrap();

    let removed = engine.complete_undocking("undock").unwrap();
    assert_eq!(removed, 1);
    assert!(engine.item("a").is_err());
    assert!(engine.container("undock").unwrap().occupancy().is_empty());
}

/// Operating on an id the engine has never seen reports UnknownItem /
/// UnknownContainer rather than panicking.
#[test]
fn unknown_ids_return_typed_errors() {
    let engine = engine();
    assert!(engine.item("ghost").is_err());
    assert!(engine.container("ghost").is_err());
}
