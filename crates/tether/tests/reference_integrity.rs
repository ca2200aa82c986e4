//! # Reference Integrity Tests
//!
//! End-to-end checks of entity recycling, tag bindings, and factory
//! composition.
//!
//! Run with: cargo test -p tether --test reference_integrity

use tether::{
    EntityFactory, FactoryError, MapProperties, Placement, SimulationConfig, StaticCatalog,
    PLAYER_TAG, SLUMBERER_EYELID_TAG, SLUMBERER_EYE_TAG,
};
use tether_core::{
    Anim, Attached, Bounds, Camera, EntityId, Frozen, Homing, Inbetween, Pluckable, Pos,
    RefContext, SafeRef, TagRegistry, TaggedRef, World,
};

fn full_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with("player-idle", 25.0, 16.0)
        .with("slumberer-idle", 64.0, 48.0)
        .with("slumberer-eye", 8.0, 8.0)
        .with("slumberer-eyelid", 8.0, 8.0)
        .with("turnip-stuck", 25.0, 16.0)
        .with("turnip-idle", 25.0, 16.0)
        .with("chicklet-stuck", 25.0, 16.0)
        .with("chicklet-idle", 25.0, 16.0)
}

fn factory_with(catalog: StaticCatalog) -> EntityFactory {
    EntityFactory::new(&SimulationConfig::default(), catalog)
}

fn spawn(
    factory: &mut EntityFactory,
    world: &mut World,
    tags: &mut TagRegistry,
    kind: &str,
    x: f32,
    y: f32,
) -> Option<EntityId> {
    factory
        .spawn(world, tags, kind, Placement::at(x, y), &MapProperties::new())
        .expect("construction should succeed")
}

// ============================================================================
// Safe references under recycling
// ============================================================================

#[test]
fn safe_reference_dies_with_its_entity_and_stays_dead() {
    let mut world = World::new(8);
    let mut live: Vec<(EntityId, SafeRef)> = Vec::new();

    // Churn: spawn, capture, delete every other entity, refill the slots.
    for round in 0..10 {
        for _ in 0..4 {
            let id = world.spawn();
            live.push((id, SafeRef::capture(id)));
        }
        let doomed: Vec<_> = live.iter().step_by(2).map(|(id, _)| *id).collect();
        for id in doomed {
            assert!(world.despawn(id), "round {round}");
        }

        for (id, reference) in &live {
            assert_eq!(reference.is_alive(&world), world.is_alive(*id));
        }
        live.retain(|(id, _)| world.is_alive(*id));
        for (_, reference) in &live {
            assert!(reference.resolve(&world).is_some());
        }
        if live.len() > 3 {
            for (id, _) in live.drain(..) {
                world.despawn(id);
            }
        }
    }
}

#[test]
fn immediate_same_tick_reuse_is_a_different_entity() {
    let mut world = World::new(1);
    let first = world.spawn();
    let reference = SafeRef::capture(first);

    world.despawn(first);
    let second = world.spawn();

    assert_eq!(first.index(), second.index());
    assert!(second.generation() > first.generation());
    assert!(!reference.is_alive(&world));
    assert_ne!(reference.target(), second);
}

#[test]
fn slot_generation_strictly_increases_per_deletion() {
    let mut world = World::new(2);
    let mut previous = world.generation_of(1).unwrap();
    let _pin = world.spawn();

    for _ in 0..100 {
        let id = world.spawn();
        assert_eq!(id.index(), 1);
        world.despawn(id);
        let now = world.generation_of(1).unwrap();
        assert!(now > previous);
        previous = now;
    }
}

// ============================================================================
// Tag registry and tagged references
// ============================================================================

#[test]
fn reregistering_a_tag_returns_the_new_entity() {
    let mut world = World::new(4);
    let mut tags = TagRegistry::new();
    let a = world.spawn();
    let b = world.spawn();

    tags.register("player", a);
    tags.register("player", b);

    assert_eq!(tags.lookup("player"), Some(b));
    let reference = TaggedRef::new("player");
    assert_eq!(reference.resolve(&tags, &world).map(|e| e.id()), Some(b));
}

#[test]
fn tagged_reference_to_deleted_entity_resolves_to_none() {
    let mut world = World::new(4);
    let mut tags = TagRegistry::new();
    let player = world.spawn();
    tags.register("player", player);

    world.despawn(player);
    // A newcomer in the same slot must not be mistaken for the player.
    let _newcomer = world.spawn();

    assert!(TaggedRef::new("player").resolve(&tags, &world).is_none());
    assert_eq!(tags.lookup("player"), Some(player));
}

#[test]
fn register_then_delete_in_same_tick_leaves_stale_binding() {
    let mut world = World::new(4);
    let mut tags = TagRegistry::new();
    let eye = world.spawn();
    tags.register("slumberer-eye", eye);
    world.despawn(eye);

    assert_eq!(tags.len(), 1);
    assert_eq!(tags.lookup("slumberer-eye"), Some(eye));
    assert!(tags.resolve("slumberer-eye", &world).is_none());
}

// ============================================================================
// Factory
// ============================================================================

#[test]
fn same_kind_twice_has_same_component_set_and_different_positions() {
    let mut world = World::new(16);
    let mut tags = TagRegistry::new();
    let mut factory = factory_with(full_catalog());

    let a = spawn(&mut factory, &mut world, &mut tags, "chicklet", 0.0, 0.0).unwrap();
    let b = spawn(&mut factory, &mut world, &mut tags, "chicklet", 48.0, 16.0).unwrap();

    assert_ne!(a, b);
    assert_eq!(world.component_mask(a), world.component_mask(b));
    assert_eq!(world.get::<Pos>(a), Some(&Pos::new(0.0, 0.0)));
    assert_eq!(world.get::<Pos>(b), Some(&Pos::new(48.0, 16.0)));
    assert_eq!(world.get::<Anim>(a), world.get::<Anim>(b));
}

#[test]
fn unknown_kind_returns_none_and_creates_nothing() {
    let mut world = World::new(16);
    let mut tags = TagRegistry::new();
    let mut factory = factory_with(full_catalog());

    assert_eq!(spawn(&mut factory, &mut world, &mut tags, "gremlin", 0.0, 0.0), None);
    assert_eq!(world.alive_count(), 0);
    assert!(tags.is_empty());
}

#[test]
fn player_scenario() {
    let mut world = World::new(16);
    let mut tags = TagRegistry::new();
    let mut factory = factory_with(full_catalog());

    let player = spawn(&mut factory, &mut world, &mut tags, "player", 32.0, 16.0).unwrap();
    assert_eq!(world.alive_count(), 2);
    assert_eq!(tags.lookup(PLAYER_TAG), Some(player));
    assert_eq!(world.get::<Pos>(player), Some(&Pos::new(32.0, 16.0)));

    let camera = world.entities_with::<Camera>().next().unwrap();
    let follow = world.get::<Homing>(camera).unwrap().target;
    assert_eq!(follow.target(), player);
    assert!(follow.is_alive(&world));

    world.despawn(player);

    assert!(follow.resolve(&world).is_none());
    assert!(world.is_alive(camera));
    assert_eq!(tags.lookup(PLAYER_TAG), Some(player));
    assert!(tags.resolve(PLAYER_TAG, &world).is_none());

    // Respawning re-registers the role; the camera's captured reference
    // still points at the dead instance.
    let respawned = spawn(&mut factory, &mut world, &mut tags, "player", 32.0, 16.0).unwrap();
    assert_eq!(tags.lookup(PLAYER_TAG), Some(respawned));
    assert!(!follow.is_alive(&world));
}

#[test]
fn turnip_scenario() {
    let mut world = World::new(16);
    let mut tags = TagRegistry::new();
    let mut factory = factory_with(full_catalog());

    let a = spawn(&mut factory, &mut world, &mut tags, "turnip", 0.0, 0.0).unwrap();
    let b = spawn(&mut factory, &mut world, &mut tags, "turnip", 0.0, 0.0).unwrap();

    assert_ne!(a, b);
    for id in [a, b] {
        assert!(world.has::<Pluckable>(id));
        assert!(world.has::<Frozen>(id));
        assert_eq!(world.get::<Bounds>(id), Some(&Bounds::new(0.0, 0.0, 25.0, 16.0)));
    }
    assert!(tags.is_empty());
}

#[test]
fn slumberer_wires_eye_and_eyelid() {
    let mut world = World::new(16);
    let mut tags = TagRegistry::new();
    let mut factory = factory_with(full_catalog());

    let player = spawn(&mut factory, &mut world, &mut tags, "player", 100.0, 0.0).unwrap();
    let slumberer = spawn(&mut factory, &mut world, &mut tags, "slumberer", 0.0, 0.0).unwrap();
    assert_eq!(world.get::<Anim>(slumberer).map(|a| a.layer), Some(-2));

    let eye = tags.lookup(SLUMBERER_EYE_TAG).unwrap();
    let eyelid = tags.lookup(SLUMBERER_EYELID_TAG).unwrap();

    let gaze = world.get::<Inbetween>(eye).unwrap();
    let ctx = RefContext::new(&world, &tags);
    assert_eq!(gaze.a.resolve(&ctx).map(|e| e.id()), Some(slumberer));
    assert_eq!(gaze.b.resolve(&ctx).map(|e| e.id()), Some(player));
    assert!(!world.get::<Anim>(eye).unwrap().looping);

    let lid = world.get::<Attached>(eyelid).unwrap();
    assert_eq!(lid.anchor.target(), slumberer);
    assert!((lid.x - 12.0).abs() < f32::EPSILON);
    assert!((lid.y - 28.0).abs() < f32::EPSILON);
}

#[test]
fn failed_satellite_leaves_primary_in_place() {
    let catalog = StaticCatalog::new()
        .with("slumberer-idle", 64.0, 48.0)
        .with("slumberer-eye", 8.0, 8.0);
    let mut world = World::new(16);
    let mut tags = TagRegistry::new();
    let mut factory = factory_with(catalog);

    let err = factory
        .spawn(&mut world, &mut tags, "slumberer", Placement::at(0.0, 0.0), &MapProperties::new())
        .unwrap_err();
    assert_eq!(
        err,
        FactoryError::MissingAsset {
            anim: "slumberer-eyelid".into()
        }
    );

    // Body and eye were committed before the eyelid failed.
    assert_eq!(world.entities_with::<tether_core::Slumberer>().count(), 1);
    assert!(tags.resolve(SLUMBERER_EYE_TAG, &world).is_some());
    assert!(tags.lookup(SLUMBERER_EYELID_TAG).is_none());
}
