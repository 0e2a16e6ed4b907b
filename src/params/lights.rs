//! Lit-spheres demo parameters.

use std::f32::consts::PI;

/// Grid of spheres lit by two orbiting point lights
#[derive(Debug, Clone)]
pub struct LightsConfig {
    /// Distance between neighbouring spheres (meters)
    pub sphere_spacing_m: f32,

    /// Spheres span [-extent, extent] on X and Z (meters)
    pub grid_extent_m: f32,

    /// Sphere radius (meters)
    pub sphere_radius_m: f32,

    /// Ground plane edge length (meters)
    pub ground_size_m: f32,

    /// Orbit radius of the lights (meters)
    pub orbit_radius_m: f32,

    /// Orbit height of the lights (meters)
    pub orbit_height_m: f32,

    /// Phase of the second light relative to the first (radians)
    pub second_light_phase: f32,

    /// Distance at which a light stops contributing (meters)
    pub light_range_m: f32,

    /// Light intensity (dimensionless)
    pub light_intensity: f32,

    /// Ambient light and clear color (sRGB, 0x111111)
    pub ambient: [f32; 3],

    /// Camera position (meters)
    pub camera_position: [f32; 3],

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Draw markers at the light positions
    pub debug_lights: bool,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            sphere_spacing_m: 5.0,
            grid_extent_m: 10.0,
            sphere_radius_m: 1.0,
            ground_size_m: 1000.0,
            orbit_radius_m: 2.0,
            orbit_height_m: 3.0,
            second_light_phase: PI,
            light_range_m: 10.0,
            light_intensity: 1.0,
            ambient: [0.067, 0.067, 0.067],
            camera_position: [5.0, 5.0, 5.0],
            fov_degrees: 75.0,
            debug_lights: true,
        }
    }
}

impl LightsConfig {
    /// Sphere centres on the XZ grid, resting on the ground
    pub fn sphere_positions(&self) -> Vec<[f32; 3]> {
        let steps = (2.0 * self.grid_extent_m / self.sphere_spacing_m).round() as i32;
        let mut positions = Vec::new();
        for ix in 0..=steps {
            for iz in 0..=steps {
                positions.push([
                    -self.grid_extent_m + ix as f32 * self.sphere_spacing_m,
                    self.sphere_radius_m,
                    -self.grid_extent_m + iz as f32 * self.sphere_spacing_m,
                ]);
            }
        }
        positions
    }
}
