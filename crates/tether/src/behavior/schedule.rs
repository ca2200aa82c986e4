//! Schedule: timed self-deletion.

use tether_core::{EntityId, Schedule, World};

use super::BehaviorStats;

/// Advances every schedule by `delta` seconds and queues expired entities
/// into `deletions`. Nothing is deleted here.
pub fn update(world: &mut World, delta: f32, deletions: &mut Vec<EntityId>) -> BehaviorStats {
    let mut stats = BehaviorStats::default();

    for slot in 0..world.capacity() {
        let Some(id) = world.id_at(slot) else {
            continue;
        };
        let Some(schedule) = world.get_mut::<Schedule>(id) else {
            continue;
        };

        schedule.remaining -= delta;
        if schedule.remaining <= 0.0 {
            deletions.push(id);
        }
        stats.applied += 1;
    }

    stats
}
