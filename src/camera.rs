//! Static perspective camera shared by all demos.

use glam::{Mat4, Vec3};

/// Perspective camera looking from `eye` at `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position (meters)
    pub eye: Vec3,

    /// Look-at target (meters)
    pub target: Vec3,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, fov_degrees: f32) -> Self {
        Self {
            eye,
            target,
            fov_degrees,
            near_plane_m: 0.1,
            far_plane_m: 1000.0,
        }
    }

    pub fn with_planes(mut self, near_plane_m: f32, far_plane_m: f32) -> Self {
        self.near_plane_m = near_plane_m;
        self.far_plane_m = far_plane_m;
        self
    }

    /// World-to-view matrix. Y is always up (camera never rolls).
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            aspect_ratio,
            self.near_plane_m,
            self.far_plane_m,
        )
    }

    pub fn view_proj(&self, aspect_ratio: f32) -> Mat4 {
        self.projection(aspect_ratio) * self.view()
    }

    /// Unit axis pointing from the target back towards the camera
    pub fn facing_axis(&self) -> Vec3 {
        (self.eye - self.target).try_normalize().unwrap_or(Vec3::Z)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 50.0)
    }
}
