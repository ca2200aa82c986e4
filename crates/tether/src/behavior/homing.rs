//! Homing: steer velocity toward a target entity's centre.

use tether_core::{Bounds, EntityId, Homing, Physics, Pos, World};

use super::{center_of, BehaviorStats};

/// Sets the velocity of every homing entity toward its target.
///
/// A dead or out-of-range target leaves the velocity untouched.
pub fn update(world: &mut World) -> BehaviorStats {
    let mut stats = BehaviorStats::default();

    for slot in 0..world.capacity() {
        let Some(id) = world.id_at(slot) else {
            continue;
        };
        let Some(&homing) = world.get::<Homing>(id) else {
            continue;
        };

        let Some((vx, vy)) = steer(world, id, homing) else {
            stats.skipped += 1;
            continue;
        };
        if let Some(physics) = world.get_mut::<Physics>(id) {
            physics.vx = vx;
            physics.vy = vy;
            stats.applied += 1;
        }
    }

    stats
}

fn steer(world: &World, id: EntityId, homing: Homing) -> Option<(f32, f32)> {
    let target = homing.target.resolve(world)?;
    let (tx, ty) = center_of(&target)?;

    let pos = world.get::<Pos>(id)?;
    let (ox, oy) = world.get::<Bounds>(id).map_or((0.0, 0.0), |b| b.center());
    let dx = tx - (pos.x + ox);
    let dy = ty - (pos.y + oy);

    if dx * dx + dy * dy > homing.max_distance * homing.max_distance {
        return None;
    }
    Some((dx * homing.speed_factor, dy * homing.speed_factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::SafeRef;

    fn follower(world: &mut World, target: EntityId) -> EntityId {
        let id = world.spawn();
        world.insert(id, Pos::new(0.0, 0.0));
        world.insert(id, Physics::default());
        world.insert(id, Homing::new(SafeRef::capture(target)));
        id
    }

    #[test]
    fn test_steers_toward_target_centre() {
        let mut world = World::new(4);
        let target = world.spawn();
        world.insert(target, Pos::new(10.0, 0.0));
        world.insert(target, Bounds::new(0.0, 0.0, 4.0, 2.0));
        let drone = follower(&mut world, target);

        let stats = update(&mut world);
        assert_eq!(stats, BehaviorStats { applied: 1, skipped: 0 });

        let physics = world.get::<Physics>(drone).unwrap();
        assert!((physics.vx - 60.0).abs() < f32::EPSILON);
        assert!((physics.vy - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_dead_target_is_skipped_without_side_effects() {
        let mut world = World::new(4);
        let target = world.spawn();
        world.insert(target, Pos::new(10.0, 0.0));
        let drone = follower(&mut world, target);
        world.get_mut::<Physics>(drone).unwrap().vx = 7.0;

        world.despawn(target);
        let _reused = world.spawn();

        let stats = update(&mut world);
        assert_eq!(stats, BehaviorStats { applied: 0, skipped: 1 });
        assert!(world.is_alive(drone));
        assert!(world.has::<Homing>(drone));
        assert!((world.get::<Physics>(drone).unwrap().vx - 7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_out_of_range_target_is_skipped() {
        let mut world = World::new(4);
        let target = world.spawn();
        world.insert(target, Pos::new(5000.0, 0.0));
        let _drone = follower(&mut world, target);

        assert_eq!(update(&mut world).skipped, 1);
    }
}
