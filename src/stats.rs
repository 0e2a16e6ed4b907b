//! Frame-timing statistics.

use std::time::Duration;

use crate::frame_loop::FrameTime;
use crate::params::LoopConfig;

/// Consumer of per-tick timing, called once per tick
pub trait Telemetry {
    fn update(&mut self, time: &FrameTime);

    /// Show or hide the display
    fn toggle(&mut self);
}

/// FPS counter that logs a summary while visible
#[derive(Debug, Clone)]
pub struct Stats {
    visible: bool,
    responsiveness: f32,
    report_interval: Duration,
    last_report: Option<Duration>,
    reports: u64,

    pub frames: u64,
    pub fps: f32,
    pub smooth_fps: f32,
}

impl Stats {
    pub fn new(config: &LoopConfig) -> Self {
        Self {
            visible: false,
            responsiveness: config.fps_smoothing,
            report_interval: Duration::from_secs_f32(config.stats_interval_s),
            last_report: None,
            reports: 0,
            frames: 0,
            fps: 0.0,
            smooth_fps: 0.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Summaries logged so far
    pub fn reports(&self) -> u64 {
        self.reports
    }

    fn report_due(&self, timestamp: Duration) -> bool {
        self.last_report
            .map_or(true, |last| timestamp.saturating_sub(last) >= self.report_interval)
    }

    pub fn summary(&self) -> String {
        format!(
            "{:.1} fps (smoothed {:.1}), {} frames",
            self.fps, self.smooth_fps, self.frames
        )
    }
}

impl Telemetry for Stats {
    fn update(&mut self, time: &FrameTime) {
        self.frames += 1;

        let dt = time.elapsed_secs();
        if dt > 0.0 {
            self.fps = 1.0 / dt;
            self.smooth_fps = if self.smooth_fps == 0.0 {
                self.fps
            } else {
                (1.0 - self.responsiveness) * self.smooth_fps + self.responsiveness * self.fps
            };
        }

        if !self.visible {
            return;
        }
        if self.report_due(time.timestamp) {
            log::info!("{}", self.summary());
            self.last_report = Some(time.timestamp);
            self.reports += 1;
        }
    }

    fn toggle(&mut self) {
        self.visible = !self.visible;
        self.last_report = None;
        log::info!("stats {}", if self.visible { "shown" } else { "hidden" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_loop::FrameClock;

    #[test]
    fn test_fps_tracks_frame_interval() {
        let mut stats = Stats::new(&LoopConfig::default());
        let mut clock = FrameClock::new();

        for frame in 0..120u64 {
            let time = clock.tick(Duration::from_millis(frame * 20));
            stats.update(&time);
        }

        assert_eq!(stats.frames, 120);
        assert!((stats.fps - 50.0).abs() < 0.1);
        assert!((stats.smooth_fps - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_first_frame_leaves_fps_untouched() {
        let mut stats = Stats::new(&LoopConfig::default());
        let time = FrameClock::new().tick(Duration::from_secs(3));
        stats.update(&time);
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.fps, 0.0);
    }

    #[test]
    fn test_toggle_flips_visibility() {
        let mut stats = Stats::new(&LoopConfig::default());
        assert!(!stats.is_visible());
        stats.toggle();
        assert!(stats.is_visible());
        stats.toggle();
        assert!(!stats.is_visible());
    }

    #[test]
    fn test_reports_once_per_interval_while_visible() {
        let mut stats = Stats::new(&LoopConfig::default());
        let mut clock = FrameClock::new();

        // Hidden stats never report
        for frame in 0..10u64 {
            stats.update(&clock.tick(Duration::from_millis(frame * 16)));
        }
        assert_eq!(stats.reports(), 0);

        stats.toggle();
        let mut clock = FrameClock::new();
        // 0 ms through 2000 ms at 16 ms steps: reports at 0 and 1008 ms
        for frame in 0..=125u64 {
            stats.update(&clock.tick(Duration::from_millis(frame * 16)));
        }
        assert_eq!(stats.reports(), 2);
        assert_eq!(stats.last_report, Some(Duration::from_millis(1008)));
    }

    #[test]
    fn test_toggle_resets_report_timer() {
        let mut stats = Stats::new(&LoopConfig::default());
        let mut clock = FrameClock::new();
        stats.toggle();
        stats.update(&clock.tick(Duration::from_millis(100)));
        assert_eq!(stats.last_report, Some(Duration::from_millis(100)));

        stats.toggle();
        assert_eq!(stats.last_report, None);

        // Showing again reports on the next tick instead of waiting out the interval
        stats.toggle();
        stats.update(&clock.tick(Duration::from_millis(116)));
        assert_eq!(stats.reports(), 2);
        assert!(!stats.report_due(Duration::from_millis(500)));
        assert!(stats.report_due(Duration::from_millis(1116)));
    }
}
