//! Clamped: keep an entity inside a rectangle.

use tether_core::{Clamped, Pos, World};

use super::BehaviorStats;

/// Clamps every clamped entity's position.
pub fn update(world: &mut World) -> BehaviorStats {
    let mut stats = BehaviorStats::default();

    for slot in 0..world.capacity() {
        let Some(id) = world.id_at(slot) else {
            continue;
        };
        let Some(&clamp) = world.get::<Clamped>(id) else {
            continue;
        };
        if let Some(pos) = world.get_mut::<Pos>(id) {
            pos.x = pos.x.max(clamp.minx).min(clamp.maxx);
            pos.y = pos.y.max(clamp.miny).min(clamp.maxy);
            stats.applied += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_both_axes() {
        let mut world = World::new(2);
        let camera = world.spawn();
        world.insert(camera, Pos::new(-5.0, 500.0));
        world.insert(camera, Clamped::new(0.0, 0.0, 320.0, 240.0));

        update(&mut world);
        assert_eq!(world.get::<Pos>(camera), Some(&Pos::new(0.0, 240.0)));
    }
}
