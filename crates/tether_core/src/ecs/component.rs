//! # Component System
//!
//! Components are pure data containers with no behavior.
//! They must be `Copy` and have a default value so every storage can be
//! pre-allocated as a dense array at world creation.
//!
//! Numeric components consumed by the external physics step (`Pos`, `Angle`,
//! `Bounds`, `Size`, `Physics`) are additionally `Pod` so their storages can
//! be handed over as raw bytes.

use bytemuck::{Pod, Zeroable};

use super::storage::ComponentStorage;
use crate::reference::{EntityReference, SafeRef};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: No heap allocations, bitwise copyable
/// - `Default`: Must have a default value for pre-allocation
///
/// Implementations are generated by the `components!` table at the bottom of
/// this module, which also owns the component ID assignment.
pub trait Component: Copy + Default + 'static {
    /// Unique identifier for this component type (0-63).
    ///
    /// This ID is used for the component bitmask in entities.
    const ID: u8;

    /// The dense storage holding this component type.
    fn storage(storages: &Storages) -> &ComponentStorage<Self>;

    /// The dense storage holding this component type, mutably.
    fn storage_mut(storages: &mut Storages) -> &mut ComponentStorage<Self>;
}

// =============================================================================
// Spatial
// =============================================================================

/// World-space position of an entity's bottom-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Pos {
    /// X coordinate in world space.
    pub x: f32,
    /// Y coordinate in world space.
    pub y: f32,
}

impl Pos {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the squared distance to another position.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Rotation in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Angle {
    /// Rotation in degrees, counter-clockwise.
    pub rotation: f32,
}

/// Axis-aligned bounds relative to `Pos`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Bounds {
    /// Left edge.
    pub minx: f32,
    /// Bottom edge.
    pub miny: f32,
    /// Right edge.
    pub maxx: f32,
    /// Top edge.
    pub maxy: f32,
}

impl Bounds {
    /// Creates bounds from two corners.
    #[inline]
    #[must_use]
    pub const fn new(minx: f32, miny: f32, maxx: f32, maxy: f32) -> Self {
        Self {
            minx,
            miny,
            maxx,
            maxy,
        }
    }

    /// Bounds covering a `width` x `height` frame anchored at the origin.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Horizontal extent.
    #[inline]
    #[must_use]
    pub fn width(self) -> f32 {
        self.maxx - self.minx
    }

    /// Vertical extent.
    #[inline]
    #[must_use]
    pub fn height(self) -> f32 {
        self.maxy - self.miny
    }

    /// Centre point, relative to the owning entity's `Pos`.
    #[inline]
    #[must_use]
    pub fn center(self) -> (f32, f32) {
        (
            self.minx + self.width() / 2.0,
            self.miny + self.height() / 2.0,
        )
    }
}

/// Physical extent in world units, independent of the render bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Size {
    /// Width in world units.
    pub width: f32,
    /// Height in world units.
    pub height: f32,
}

impl Size {
    /// Creates a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// =============================================================================
// Physics (state only; integration happens outside this crate)
// =============================================================================

/// Velocity and friction consumed by the external physics step.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Physics {
    /// Horizontal velocity, world units per second.
    pub vx: f32,
    /// Vertical velocity, world units per second.
    pub vy: f32,
    /// Velocity damping factor.
    pub friction: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            vx: 0.0,
            vy: 0.0,
            friction: 4.0,
        }
    }
}

/// Subject to gravity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gravity;

/// Immobile: the physics step must not move this entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frozen;

/// Collides with solid map tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapSolid;

/// Reports contact with map walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapWallSensor;

// =============================================================================
// Presentation
// =============================================================================

/// Animation state handed to the external animation collaborator.
///
/// `id` is opaque here; only the animation catalog knows whether it exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anim {
    /// Animation identifier.
    pub id: &'static str,
    /// Draw layer; lower layers are drawn first.
    pub layer: i32,
    /// Whether the animation loops.
    pub looping: bool,
    /// Draw scale.
    pub scale: f32,
    /// Playback speed multiplier.
    pub speed: f32,
    /// Draw opacity, 0.0-1.0.
    pub alpha: f32,
}

impl Anim {
    /// A looping animation on layer 0.
    #[must_use]
    pub const fn new(id: &'static str) -> Self {
        Self::on_layer(id, 0)
    }

    /// A looping animation on the given layer.
    #[must_use]
    pub const fn on_layer(id: &'static str, layer: i32) -> Self {
        Self {
            id,
            layer,
            looping: true,
            scale: 1.0,
            speed: 1.0,
            alpha: 1.0,
        }
    }
}

impl Default for Anim {
    fn default() -> Self {
        Self::new("")
    }
}

/// The entity the camera is mounted on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Camera;

// =============================================================================
// Gameplay
// =============================================================================

/// Driven by player input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerControlled;

/// Can be plucked out of the ground by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pluckable {
    /// Animation to switch to once plucked.
    pub plucked_anim: &'static str,
}

/// The sleeping giant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slumberer;

/// Counts down and deletes its entity when the timer runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Schedule {
    /// Seconds left before deletion.
    pub remaining: f32,
}

impl Schedule {
    /// Deletes the entity after `seconds`.
    #[must_use]
    pub const fn delete_after(seconds: f32) -> Self {
        Self { remaining: seconds }
    }
}

// =============================================================================
// Relational
// =============================================================================

/// Steers this entity's velocity toward a target entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homing {
    /// The entity to follow.
    pub target: SafeRef,
    /// Multiplier from distance to velocity.
    pub speed_factor: f32,
    /// Targets further away than this are ignored.
    pub max_distance: f32,
}

impl Homing {
    /// Homes in on `target` with default tuning.
    #[must_use]
    pub const fn new(target: SafeRef) -> Self {
        Self {
            target,
            speed_factor: 5.0,
            max_distance: 1000.0,
        }
    }
}

impl Default for Homing {
    fn default() -> Self {
        Self::new(SafeRef::default())
    }
}

/// Places this entity between two anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inbetween {
    /// First anchor.
    pub a: EntityReference,
    /// Second anchor.
    pub b: EntityReference,
    /// 0.0 = on `a`, 1.0 = on `b`.
    pub tween: f32,
    /// Offset from `a`'s position.
    pub ax: f32,
    /// Offset from `a`'s position.
    pub ay: f32,
    /// Offset from `b`'s position.
    pub bx: f32,
    /// Offset from `b`'s position.
    pub by: f32,
    /// Maximum distance from the `a` anchor point.
    pub max_distance: f32,
}

impl Inbetween {
    /// Tweens between `a` and `b` with zero offsets and no distance limit.
    #[must_use]
    pub fn new(a: impl Into<EntityReference>, b: impl Into<EntityReference>, tween: f32) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            tween,
            ax: 0.0,
            ay: 0.0,
            bx: 0.0,
            by: 0.0,
            max_distance: f32::MAX,
        }
    }
}

impl Default for Inbetween {
    fn default() -> Self {
        Self::new(SafeRef::default(), SafeRef::default(), 0.5)
    }
}

/// Pins this entity to an anchor at a fixed offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Attached {
    /// The entity to follow.
    pub anchor: SafeRef,
    /// Horizontal offset from the anchor's position.
    pub x: f32,
    /// Vertical offset from the anchor's position.
    pub y: f32,
}

impl Attached {
    /// Attaches to `anchor` at offset (`x`, `y`).
    #[must_use]
    pub const fn new(anchor: SafeRef, x: f32, y: f32) -> Self {
        Self { anchor, x, y }
    }
}

/// Keeps `Pos` inside a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clamped {
    /// Minimum x.
    pub minx: f32,
    /// Minimum y.
    pub miny: f32,
    /// Maximum x.
    pub maxx: f32,
    /// Maximum y.
    pub maxy: f32,
}

impl Clamped {
    /// Clamps to the given rectangle.
    #[must_use]
    pub const fn new(minx: f32, miny: f32, maxx: f32, maxy: f32) -> Self {
        Self {
            minx,
            miny,
            maxx,
            maxy,
        }
    }
}

// =============================================================================
// Component table - add new component types here
// =============================================================================

macro_rules! components {
    ($($ty:ident = $id:literal => $field:ident),* $(,)?) => {
        /// Dense storages for every component type, one slot per entity.
        pub struct Storages {
            $($field: ComponentStorage<$ty>,)*
        }

        impl Storages {
            pub(crate) fn new(capacity: usize) -> Self {
                Self {
                    $($field: ComponentStorage::new(capacity),)*
                }
            }

            pub(crate) fn reset(&mut self, index: usize) {
                $(self.$field.reset(index);)*
            }
        }

        $(
            impl Component for $ty {
                const ID: u8 = $id;

                #[inline]
                fn storage(storages: &Storages) -> &ComponentStorage<Self> {
                    &storages.$field
                }

                #[inline]
                fn storage_mut(storages: &mut Storages) -> &mut ComponentStorage<Self> {
                    &mut storages.$field
                }
            }
        )*
    };
}

components! {
    Pos = 0 => positions,
    Angle = 1 => angles,
    Bounds = 2 => bounds,
    Physics = 3 => physics,
    Gravity = 4 => gravity,
    Frozen = 5 => frozen,
    MapSolid = 6 => map_solid,
    MapWallSensor = 7 => map_wall_sensors,
    Anim = 8 => anims,
    Camera = 9 => cameras,
    PlayerControlled = 10 => player_controlled,
    Pluckable = 11 => pluckables,
    Slumberer = 12 => slumberers,
    Schedule = 13 => schedules,
    Homing = 14 => homings,
    Inbetween = 15 => inbetweens,
    Attached = 16 => attachments,
    Clamped = 17 => clamps,
    Size = 18 => sizes,
}
