//! Tick-to-tick time tracking.

use std::time::Duration;

/// Time record for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    /// Tick index, starting at 0
    pub frame: u64,

    /// Host timestamp of this tick (from the host's monotonic epoch)
    pub timestamp: Duration,

    /// Time since the previous tick (zero on the first tick)
    pub elapsed: Duration,

    /// Time since the first tick of the loop
    pub since_start: Duration,
}

impl FrameTime {
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn since_start_secs(&self) -> f32 {
        self.since_start.as_secs_f32()
    }

    pub fn absolute_secs(&self) -> f32 {
        self.timestamp.as_secs_f32()
    }
}

/// Remembers the previous tick's timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_timestamp: Option<Duration>,
    first_timestamp: Option<Duration>,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now`.
    ///
    /// The first tick (and the first tick after [`FrameClock::reset`]) has zero
    /// elapsed time. A timestamp older than the previous one also yields zero.
    pub fn tick(&mut self, now: Duration) -> FrameTime {
        let elapsed = match self.last_timestamp {
            Some(last) if now < last => {
                log::trace!("timestamp went backwards ({now:?} < {last:?})");
                Duration::ZERO
            }
            Some(last) => now - last,
            None => Duration::ZERO,
        };
        let first = *self.first_timestamp.get_or_insert(now);
        self.last_timestamp = Some(now);

        let time = FrameTime {
            frame: self.frames,
            timestamp: now,
            elapsed,
            since_start: now.saturating_sub(first),
        };
        self.frames += 1;
        time
    }

    /// Forget the previous timestamp so the next tick applies no motion.
    /// The loop epoch and frame counter are kept.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }

    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last_timestamp
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_has_zero_elapsed() {
        for start in [0, 16, 123_456] {
            let mut clock = FrameClock::new();
            let time = clock.tick(Duration::from_millis(start));
            assert_eq!(time.elapsed, Duration::ZERO);
            assert_eq!(time.since_start, Duration::ZERO);
            assert_eq!(time.frame, 0);
        }
    }

    #[test]
    fn test_elapsed_between_consecutive_ticks() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_millis(1000));
        let time = clock.tick(Duration::from_millis(1016));
        assert_eq!(time.elapsed, Duration::from_millis(16));
        assert_eq!(time.frame, 1);

        let time = clock.tick(Duration::from_millis(1050));
        assert_eq!(time.elapsed, Duration::from_millis(34));
        assert_eq!(time.since_start, Duration::from_millis(50));
        assert_eq!(clock.last_timestamp(), Some(Duration::from_millis(1050)));
    }

    #[test]
    fn test_backwards_timestamp_yields_zero_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_millis(500));
        let time = clock.tick(Duration::from_millis(400));
        assert_eq!(time.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_reset_keeps_epoch() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_secs(1));
        clock.tick(Duration::from_secs(2));
        clock.reset();

        let time = clock.tick(Duration::from_secs(10));
        assert_eq!(time.elapsed, Duration::ZERO);
        assert_eq!(time.since_start, Duration::from_secs(9));
        assert_eq!(clock.frames(), 3);
    }
}
