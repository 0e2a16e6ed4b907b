//! Lights circling the scene on absolute time.

use glam::Vec3;

use super::{AnimationRule, RuleError, TimeBasis};
use crate::frame_loop::FrameTime;
use crate::scene::Scene;

/// Horizontal circle around the Y axis, one revolution per 2π seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPath {
    /// Circle radius (meters)
    pub radius: f32,

    /// Height above the ground (meters)
    pub height: f32,

    /// Phase offset (radians)
    pub phase: f32,
}

impl OrbitPath {
    pub fn new(radius: f32, height: f32, phase: f32) -> Self {
        Self {
            radius,
            height,
            phase,
        }
    }

    /// Position at absolute time `t` (seconds)
    pub fn position_at(&self, t: f32) -> Vec3 {
        let angle = t + self.phase;
        Vec3::new(
            self.radius * angle.sin(),
            self.height,
            self.radius * angle.cos(),
        )
    }
}

/// Moves `scene.lights[i]` along `paths[i]`.
///
/// Uses the raw host timestamp rather than accumulated elapsed time, so orbit
/// phase is independent of frame-rate jitter.
pub struct OrbitingLightRule {
    paths: Vec<OrbitPath>,
}

impl OrbitingLightRule {
    pub fn new(paths: Vec<OrbitPath>) -> Self {
        Self { paths }
    }
}

impl AnimationRule for OrbitingLightRule {
    fn name(&self) -> &str {
        "orbiting-lights"
    }

    fn time_basis(&self) -> TimeBasis {
        TimeBasis::Absolute
    }

    fn apply(&mut self, scene: &mut Scene, time: &FrameTime) -> Result<(), RuleError> {
        let t = time.absolute_secs();
        for (index, path) in self.paths.iter().enumerate() {
            let light = scene
                .lights
                .get_mut(index)
                .ok_or(RuleError::MissingLight { index })?;
            light.position = path.position_at(t);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};
    use std::time::Duration;

    use super::*;
    use crate::camera::Camera;
    use crate::scene::PointLight;

    fn light() -> PointLight {
        PointLight {
            position: Vec3::ZERO,
            color: Vec3::ONE,
            intensity: 1.0,
            range_m: 10.0,
        }
    }

    fn at(seconds: f32) -> FrameTime {
        FrameTime {
            frame: 0,
            timestamp: Duration::from_secs_f32(seconds),
            elapsed: Duration::ZERO,
            since_start: Duration::ZERO,
        }
    }

    #[test]
    fn test_orbit_cardinal_points() {
        let path = OrbitPath::new(2.0, 3.0, 0.0);

        let start = path.position_at(0.0);
        assert!((start - Vec3::new(0.0, 3.0, 2.0)).length() < 1e-6);

        let quarter = path.position_at(FRAC_PI_2);
        assert!((quarter - Vec3::new(2.0, 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_phase_shifted_light_shares_period() {
        let white = OrbitPath::new(2.0, 3.0, 0.0);
        let red = OrbitPath::new(2.0, 3.0, PI);

        for step in 0..20 {
            let t = step as f32 * 0.37;
            let a = white.position_at(t);
            let b = red.position_at(t);
            // Opposite sides of the same circle
            assert!((a.x + b.x).abs() < 1e-4);
            assert!((a.z + b.z).abs() < 1e-4);
            assert!((red.position_at(t + 2.0 * PI) - b).length() < 1e-3);
        }
    }

    #[test]
    fn test_rule_moves_scene_lights() {
        let mut scene = Scene::new(Camera::default());
        scene.lights = vec![light(), light()];
        let mut rule = OrbitingLightRule::new(vec![
            OrbitPath::new(2.0, 3.0, 0.0),
            OrbitPath::new(2.0, 3.0, PI),
        ]);

        rule.apply(&mut scene, &at(FRAC_PI_2)).unwrap();
        assert!((scene.lights[0].position - Vec3::new(2.0, 3.0, 0.0)).length() < 1e-5);
        assert!((scene.lights[1].position - Vec3::new(-2.0, 3.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_missing_light_is_reported() {
        let mut scene = Scene::new(Camera::default());
        scene.lights = vec![light()];
        let mut rule = OrbitingLightRule::new(vec![
            OrbitPath::new(2.0, 3.0, 0.0),
            OrbitPath::new(2.0, 3.0, PI),
        ]);

        let err = rule.apply(&mut scene, &at(1.0)).unwrap_err();
        assert_eq!(err, RuleError::MissingLight { index: 1 });
        // Earlier lights were still moved
        assert_ne!(scene.lights[0].position, Vec3::ZERO);
    }
}
