//! Rising, spinning confetti that is recycled at the top of its volume.

use glam::{EulerRot, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{AnimatedEntity, AnimationRule, Bounds, RuleError, TimeBasis};
use crate::frame_loop::FrameTime;
use crate::scene::Scene;
use crate::store::ParamError;

/// Opacity of a piece: its local forward axis (+Z after rotation) dotted with
/// the camera-facing axis.
///
/// The result lies in [-1, 1] and is used as-is. Pieces facing away get a
/// negative opacity; the renderer receives it unclamped.
pub fn facing_opacity(rotation: Vec3, facing: Vec3) -> f32 {
    let orientation = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    facing.dot(orientation * Vec3::Z)
}

/// Moves confetti up at a constant speed and spins it on X and Y
pub struct ConfettiRule {
    speed: f32,
    speed_param: Option<String>,
    facing: Vec3,
    rng: StdRng,
}

impl ConfettiRule {
    pub fn new(speed: f32, facing: Vec3, seed: u64) -> Self {
        Self {
            speed,
            speed_param: None,
            facing,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Read the rise speed from a scene parameter every tick
    pub fn with_speed_param(mut self, name: &str) -> Self {
        self.speed_param = Some(name.to_string());
        self
    }

    /// Create `count` pieces at random positions inside `bounds`
    pub fn spawn(&mut self, bounds: Bounds, count: usize) -> Vec<AnimatedEntity> {
        (0..count)
            .map(|_| {
                let mut piece = AnimatedEntity {
                    position: self.sample_position(&bounds),
                    rotation: Vec3::ZERO,
                    opacity: 1.0,
                    bounds,
                };
                let offset = self.rng.gen::<f32>();
                piece.rotation.x += offset;
                piece.rotation.y += offset;
                piece.opacity = facing_opacity(piece.rotation, self.facing);
                piece
            })
            .collect()
    }

    /// Whole-unit position per axis, inclusive of the lower bound
    fn sample_position(&mut self, bounds: &Bounds) -> Vec3 {
        let size = bounds.size();
        Vec3::new(
            (self.rng.gen::<f32>() * size.x).floor() + bounds.min.x,
            (self.rng.gen::<f32>() * size.y).floor() + bounds.min.y,
            (self.rng.gen::<f32>() * size.z).floor() + bounds.min.z,
        )
    }

    fn step(&mut self, piece: &mut AnimatedEntity, dt: f32, speed: f32) {
        piece.position.y += dt * speed;
        piece.rotation.x += dt;
        piece.rotation.y += dt;

        if piece.position.y > piece.bounds.max.y {
            piece.position = self.sample_position(&piece.bounds);
            // Spin is continued, not restarted
            let offset = self.rng.gen::<f32>();
            piece.rotation.x += offset;
            piece.rotation.y += offset;
        }

        piece.opacity = facing_opacity(piece.rotation, self.facing);
    }
}

impl AnimationRule for ConfettiRule {
    fn name(&self) -> &str {
        "confetti"
    }

    fn time_basis(&self) -> TimeBasis {
        TimeBasis::Elapsed
    }

    fn apply(&mut self, scene: &mut Scene, time: &FrameTime) -> Result<(), RuleError> {
        let speed = match &self.speed_param {
            Some(name) => scene
                .params
                .get_f32(name)
                .ok_or_else(|| ParamError::Unknown(name.clone()))?,
            None => self.speed,
        };
        let dt = time.elapsed_secs();

        for (index, piece) in scene.entities.iter_mut().enumerate() {
            if !piece.is_finite() {
                log::warn!("skipping confetti piece: {}", RuleError::NonFiniteEntity { index });
                continue;
            }
            self.step(piece, dt, speed);
        }
        Ok(())
    }
}
