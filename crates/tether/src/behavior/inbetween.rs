//! Inbetween: place an entity between two anchors.

use tether_core::{Inbetween, Pos, RefContext, TagRegistry, World};

use super::BehaviorStats;

/// Moves every inbetween entity to its tween point. Either anchor being dead
/// skips the entity for this tick.
pub fn update(world: &mut World, tags: &TagRegistry) -> BehaviorStats {
    let mut stats = BehaviorStats::default();

    for slot in 0..world.capacity() {
        let Some(id) = world.id_at(slot) else {
            continue;
        };
        let Some(&inbetween) = world.get::<Inbetween>(id) else {
            continue;
        };

        let Some(target) = tween_point(&RefContext::new(world, tags), &inbetween) else {
            stats.skipped += 1;
            continue;
        };
        if let Some(pos) = world.get_mut::<Pos>(id) {
            *pos = target;
            stats.applied += 1;
        }
    }

    stats
}

fn tween_point(ctx: &RefContext<'_>, inbetween: &Inbetween) -> Option<Pos> {
    let a = inbetween.a.resolve(ctx)?.get::<Pos>()?;
    let b = inbetween.b.resolve(ctx)?.get::<Pos>()?;

    let (ax, ay) = (a.x + inbetween.ax, a.y + inbetween.ay);
    let (bx, by) = (b.x + inbetween.bx, b.y + inbetween.by);

    let mut dx = (bx - ax) * inbetween.tween;
    let mut dy = (by - ay) * inbetween.tween;

    let distance = (dx * dx + dy * dy).sqrt();
    if distance > inbetween.max_distance {
        let scale = inbetween.max_distance / distance;
        dx *= scale;
        dy *= scale;
    }

    Some(Pos::new(ax + dx, ay + dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::{EntityId, SafeRef, TaggedRef};

    fn at(world: &mut World, x: f32, y: f32) -> EntityId {
        let id = world.spawn();
        world.insert(id, Pos::new(x, y));
        id
    }

    #[test]
    fn test_halfway_between() {
        let mut world = World::new(4);
        let tags = TagRegistry::new();
        let a = at(&mut world, 0.0, 0.0);
        let b = at(&mut world, 10.0, 20.0);
        let mid = at(&mut world, 99.0, 99.0);
        world.insert(mid, Inbetween::new(SafeRef::capture(a), SafeRef::capture(b), 0.5));

        assert_eq!(update(&mut world, &tags).applied, 1);
        assert_eq!(world.get::<Pos>(mid), Some(&Pos::new(5.0, 10.0)));
    }

    #[test]
    fn test_max_distance_limits_offset_from_first_anchor() {
        let mut world = World::new(4);
        let mut tags = TagRegistry::new();
        let body = at(&mut world, 0.0, 0.0);
        let player = at(&mut world, 100.0, 0.0);
        tags.register("player", player);

        let eye = at(&mut world, 0.0, 0.0);
        let mut gaze = Inbetween::new(SafeRef::capture(body), TaggedRef::new("player"), 0.5);
        gaze.ax = 10.0;
        gaze.max_distance = 2.0;
        world.insert(eye, gaze);

        update(&mut world, &tags);
        assert_eq!(world.get::<Pos>(eye), Some(&Pos::new(12.0, 0.0)));
    }

    #[test]
    fn test_missing_tag_skips() {
        let mut world = World::new(4);
        let tags = TagRegistry::new();
        let body = at(&mut world, 0.0, 0.0);
        let eye = at(&mut world, 3.0, 3.0);
        world.insert(eye, Inbetween::new(SafeRef::capture(body), TaggedRef::new("player"), 0.5));

        assert_eq!(update(&mut world, &tags), BehaviorStats { applied: 0, skipped: 1 });
        assert_eq!(world.get::<Pos>(eye), Some(&Pos::new(3.0, 3.0)));
    }
}
