//! Per-tick animation rules and the entities they move.

mod confetti;
mod orbit;
mod shader_time;

pub use confetti::{facing_opacity, ConfettiRule};
pub use orbit::{OrbitPath, OrbitingLightRule};
pub use shader_time::ShaderTimeRule;

use glam::Vec3;
use thiserror::Error;

use crate::frame_loop::FrameTime;
use crate::scene::Scene;
use crate::store::ParamError;

/// Axis-aligned bounding volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// A moving visual element (confetti piece)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedEntity {
    pub position: Vec3,
    /// Euler angles (radians, XYZ order)
    pub rotation: Vec3,
    /// Not clamped; see [`facing_opacity`]
    pub opacity: f32,
    /// Volume the entity is recycled within
    pub bounds: Bounds,
}

impl AnimatedEntity {
    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.opacity.is_finite()
    }
}

/// Which clock a rule reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBasis {
    /// Time since the previous tick
    Elapsed,
    /// Time since the loop's first tick
    SinceStart,
    /// Raw host timestamp; motion phase does not depend on frame pacing
    Absolute,
}

#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("entity {index} has a non-finite state")]
    NonFiniteEntity { index: usize },

    #[error("scene has no light {index}")]
    MissingLight { index: usize },

    #[error(transparent)]
    Param(#[from] ParamError),
}

/// Computes the next state of part of the scene from the current tick's time
pub trait AnimationRule {
    fn name(&self) -> &str;

    fn time_basis(&self) -> TimeBasis;

    fn uses_absolute_time(&self) -> bool {
        self.time_basis() == TimeBasis::Absolute
    }

    fn apply(&mut self, scene: &mut Scene, time: &FrameTime) -> Result<(), RuleError>;
}
