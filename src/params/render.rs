//! Window, rendering and frame loop configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
        }
    }
}

/// Frame loop and telemetry configuration
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Simulated refresh rate for headless runs (Hz)
    pub headless_fps: u32,

    /// Weight of the newest sample in the smoothed FPS (0..1)
    pub fps_smoothing: f32,

    /// Minimum time between stats log lines (seconds)
    pub stats_interval_s: f32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            headless_fps: 60,
            fps_smoothing: 0.05,
            stats_interval_s: 1.0,
        }
    }
}

impl LoopConfig {
    /// Time between simulated refreshes
    pub fn headless_step(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.headless_fps.max(1) as f64)
    }
}
