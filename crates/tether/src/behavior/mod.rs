//! # Relational Behaviors
//!
//! Per-tick systems that derive an entity's state from other entities.
//!
//! Every behavior follows the same contract:
//! - resolve each reference once per entity per tick
//! - if a required reference is dead, skip that entity for this tick
//! - never delete anything and never panic because a target is gone
//!
//! Systems walk the world by slot index so they can read other entities
//! through a shared borrow and then write their own entity.

pub mod attached;
pub mod clamped;
pub mod homing;
pub mod inbetween;
pub mod schedule;

use std::ops::AddAssign;

use tether_core::{Bounds, EntityRef, Pos};

/// What one behavior pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BehaviorStats {
    /// Entities the behavior updated.
    pub applied: u32,
    /// Entities skipped because a reference was dead (or out of range).
    pub skipped: u32,
}

impl AddAssign for BehaviorStats {
    fn add_assign(&mut self, rhs: Self) {
        self.applied += rhs.applied;
        self.skipped += rhs.skipped;
    }
}

/// Centre of a resolved entity: its position plus the centre of its bounds,
/// or just its position if it has no bounds.
pub(crate) fn center_of(entity: &EntityRef<'_>) -> Option<(f32, f32)> {
    let pos = entity.get::<Pos>()?;
    let (cx, cy) = entity.get::<Bounds>().map_or((0.0, 0.0), |b| b.center());
    Some((pos.x + cx, pos.y + cy))
}
