//! # Construction Fragments
//!
//! Small, reusable steps that attach a bundle of components to an entity
//! under construction. Fragments hold only their parameters and leave no
//! state behind once applied.

use tether_core::{
    Angle, Anim, Bounds, Camera, Clamped, Frozen, Gravity, Homing, MapSolid, Physics, Pluckable,
    Pos, SafeRef,
};

use super::builder::EntityBuilder;
use crate::assets::AnimationCatalog;
use crate::error::{FactoryError, FactoryResult};

/// Bounds given to every default entity.
pub const DEFAULT_BOUNDS: Bounds = Bounds::new(0.0, 0.0, 25.0, 16.0);

/// A named construction step.
pub trait Fragment {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Attaches this fragment's components.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced asset is missing.
    fn apply(&self, entity: &mut EntityBuilder<'_>) -> FactoryResult<()>;
}

impl<F: Fragment + ?Sized> Fragment for &F {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn apply(&self, entity: &mut EntityBuilder<'_>) -> FactoryResult<()> {
        (**self).apply(entity)
    }
}

/// World position.
#[derive(Clone, Copy, Debug)]
pub struct Placed {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Fragment for Placed {
    fn name(&self) -> &'static str {
        "placed"
    }

    fn apply(&self, entity: &mut EntityBuilder<'_>) -> FactoryResult<()> {
        entity.with(Pos::new(self.x, self.y));
        Ok(())
    }
}

/// A solid, falling body: default physics and default render bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultBody;

impl Fragment for DefaultBody {
    fn name(&self) -> &'static str {
        "default-body"
    }

    fn apply(&self, entity: &mut EntityBuilder<'_>) -> FactoryResult<()> {
        entity
            .with(Angle::default())
            .with(DEFAULT_BOUNDS)
            .with(MapSolid)
            .with(Physics::default())
            .with(Gravity);
        Ok(())
    }
}

/// An animation checked against the catalog.
pub struct Animated<'a> {
    /// Where animation ids are validated.
    pub catalog: &'a dyn AnimationCatalog,
    /// The animation to attach.
    pub anim: Anim,
}

impl Fragment for Animated<'_> {
    fn name(&self) -> &'static str {
        "animated"
    }

    fn apply(&self, entity: &mut EntityBuilder<'_>) -> FactoryResult<()> {
        if !self.catalog.contains(self.anim.id) {
            return Err(FactoryError::MissingAsset {
                anim: self.anim.id.to_owned(),
            });
        }
        entity.with(self.anim);
        Ok(())
    }
}

/// Stuck in the ground until plucked. The plucked animation is checked
/// against the catalog up front, so plucking never hits a missing asset.
pub struct Pluck<'a> {
    /// Where the plucked animation is validated.
    pub catalog: &'a dyn AnimationCatalog,
    /// Animation shown once plucked.
    pub plucked_anim: &'static str,
}

impl Fragment for Pluck<'_> {
    fn name(&self) -> &'static str {
        "pluck"
    }

    fn apply(&self, entity: &mut EntityBuilder<'_>) -> FactoryResult<()> {
        if !self.catalog.contains(self.plucked_anim) {
            return Err(FactoryError::MissingAsset {
                anim: self.plucked_anim.to_owned(),
            });
        }
        entity
            .with(Pluckable {
                plucked_anim: self.plucked_anim,
            })
            .with(Frozen);
        Ok(())
    }
}

/// A camera that homes in on a target and stays inside the level.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    /// Entity to follow.
    pub target: SafeRef,
    /// Viewport in world units, centred on the camera.
    pub bounds: Bounds,
    /// Area the camera may not leave.
    pub clamp: Clamped,
    /// Homing speed factor.
    pub speed_factor: f32,
}

impl Fragment for CameraRig {
    fn name(&self) -> &'static str {
        "camera-rig"
    }

    fn apply(&self, entity: &mut EntityBuilder<'_>) -> FactoryResult<()> {
        let mut homing = Homing::new(self.target);
        homing.speed_factor = self.speed_factor;

        entity
            .with(self.bounds)
            .with(Physics::default())
            .with(homing)
            .with(Camera)
            .with(self.clamp);
        Ok(())
    }
}
