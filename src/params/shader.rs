//! Hologram and scan-line shader parameters.

/// Hologram shader: diffuse glow, moving noise bars, scan lines and film grain
#[derive(Debug, Clone)]
pub struct HologramConfig {
    /// Diffuse lighting multiplier, panel range 0..10
    pub lighting_intensity: f32,

    /// Output exposure multiplier, panel range 0..10
    pub exposure: f32,

    /// Scan line scroll speed (lines per second), panel range 0..30
    pub scan_line_speed: f32,

    /// Film grain amplitude, panel range 0..1
    pub film_grain_intensity: f32,

    /// Scan line density (inverse of the device pixel ratio), panel range 0..1
    pub scan_line_scale: f32,

    /// How dark the gaps between scan lines get, panel range 0..1
    pub scan_line_intensity: f32,

    /// Output alpha, panel range 0..1
    pub opacity: f32,

    /// Smooth the diffuse term with smoothstep
    pub smooth_step_lighting: bool,

    /// Base color blended towards blue by brightness (sRGB)
    pub color: [f32; 3],

    /// Clear color (sRGB)
    pub clear_color: [f32; 3],

    /// Camera position (meters)
    pub camera_position: [f32; 3],

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Distance between neighbouring shapes along X (meters)
    pub shape_spacing_m: f32,

    /// Box edge length (meters)
    pub box_size_m: f32,

    /// Sphere radius (meters)
    pub sphere_radius_m: f32,
}

impl Default for HologramConfig {
    fn default() -> Self {
        Self {
            lighting_intensity: 3.5,
            exposure: 2.0,
            scan_line_speed: 0.0,
            film_grain_intensity: 0.15,
            scan_line_scale: 1.0,
            scan_line_intensity: 0.75,
            opacity: 0.8,
            smooth_step_lighting: true,
            color: [0.07, 0.07, 0.15],
            clear_color: [0.07, 0.07, 0.15],
            camera_position: [0.0, 2.0, 10.0],
            fov_degrees: 50.0,
            shape_spacing_m: 4.0,
            box_size_m: 2.0,
            sphere_radius_m: 1.2,
        }
    }
}

/// Earlier scan-line shader: opaque, blends towards the clear color.
///
/// Shares shapes and camera with [`HologramConfig`].
#[derive(Debug, Clone)]
pub struct ScanlineConfig {
    /// Diffuse lighting multiplier, panel range 0..10
    pub lighting_intensity: f32,

    /// Scan line scroll speed, panel range 0..100
    pub scan_line_speed: f32,

    /// Film grain amplitude, panel range 0..10
    pub film_grain_intensity: f32,

    /// Scan line frequency in radians per pixel row
    pub scan_line_width: f32,

    /// Clear color (sRGB)
    pub clear_color: [f32; 3],
}

impl Default for ScanlineConfig {
    fn default() -> Self {
        Self {
            lighting_intensity: 2.0,
            scan_line_speed: 10.0,
            film_grain_intensity: 0.5,
            scan_line_width: 5.0,
            clear_color: [0.07, 0.07, 0.15],
        }
    }
}
