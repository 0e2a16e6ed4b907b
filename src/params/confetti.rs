//! Confetti demo parameters.

/// Rising confetti cubes
#[derive(Debug, Clone)]
pub struct ConfettiConfig {
    /// Number of pieces (fixed for the life of the scene)
    pub piece_count: usize,

    /// Cube edge length (world units)
    pub piece_size: f32,

    /// Rise speed (world units per second)
    pub rise_speed: f32,

    /// Upper limit for the live-editable rise speed
    pub max_rise_speed: f32,

    /// Lower corner of the recycling volume
    pub bounds_min: [f32; 3],

    /// Upper corner of the recycling volume
    pub bounds_max: [f32; 3],

    /// Camera distance along +Z (world units)
    pub camera_distance: f32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Clipping planes (world units)
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            piece_count: 100,
            piece_size: 20.0,
            rise_speed: 100.0,
            max_rise_speed: 500.0,
            bounds_min: [-1000.0, -1000.0, -1000.0],
            bounds_max: [1000.0, 1000.0, 100.0],
            camera_distance: 160.0,
            fov_degrees: 60.0,
            near_plane: 1.0,
            far_plane: 10000.0,
        }
    }
}
