//! Attached: follow an anchor at a fixed offset.

use tether_core::{Attached, Pos, World};

use super::BehaviorStats;

/// Snaps every attached entity to its anchor. Orphans stay where they are;
/// they are not deleted.
pub fn update(world: &mut World) -> BehaviorStats {
    let mut stats = BehaviorStats::default();

    for slot in 0..world.capacity() {
        let Some(id) = world.id_at(slot) else {
            continue;
        };
        let Some(&attached) = world.get::<Attached>(id) else {
            continue;
        };

        let anchor = attached
            .anchor
            .resolve(world)
            .and_then(|anchor| anchor.get::<Pos>().copied());
        let Some(anchor) = anchor else {
            stats.skipped += 1;
            continue;
        };

        if let Some(pos) = world.get_mut::<Pos>(id) {
            *pos = Pos::new(anchor.x + attached.x, anchor.y + attached.y);
            stats.applied += 1;
        }
    }

    stats
}
