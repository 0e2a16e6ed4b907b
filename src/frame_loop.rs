//! Frame loop controller: one tick per display refresh.
//!
//! Each tick, in order:
//! 1. compute the elapsed time since the previous tick (zero on the first),
//! 2. run every animation rule,
//! 3. render,
//! 4. update telemetry,
//! 5. schedule the next tick.
//!
//! Rule and render failures are logged and the loop keeps going. Failing to
//! schedule the next tick stops the loop and is returned to the caller.

mod clock;
mod scheduler;

pub use clock::{FrameClock, FrameTime};
pub use scheduler::{FrameRequest, FrameScheduler, ManualScheduler, RedrawScheduler, ScheduleError};

use std::time::Duration;

use thiserror::Error;

use crate::animation::AnimationRule;
use crate::rendering::Renderer;
use crate::scene::Scene;
use crate::stats::Telemetry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoopError {
    #[error("failed to schedule the next frame")]
    Schedule(#[from] ScheduleError),
}

/// Caller-owned state a tick operates on
pub struct FrameContext<R, T> {
    pub scene: Scene,
    pub renderer: R,
    pub telemetry: T,
}

impl<R: Renderer, T: Telemetry> FrameContext<R, T> {
    pub fn new(scene: Scene, renderer: R, telemetry: T) -> Self {
        Self {
            scene,
            renderer,
            telemetry,
        }
    }
}

/// Drives animation rules, rendering and telemetry from host frame callbacks
pub struct FrameLoop<S> {
    scheduler: S,
    clock: FrameClock,
    rules: Vec<Box<dyn AnimationRule>>,
    pending: Option<FrameRequest>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            clock: FrameClock::new(),
            rules: Vec::new(),
            pending: None,
        }
    }

    pub fn add_rule(&mut self, rule: Box<dyn AnimationRule>) {
        log::debug!(
            "registered rule `{}` ({:?} time)",
            rule.name(),
            rule.time_basis()
        );
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Request the first tick. No-op while already running.
    ///
    /// The first tick after a (re)start applies no motion.
    pub fn start(&mut self) -> Result<(), LoopError> {
        if self.pending.is_some() {
            return Ok(());
        }
        self.clock.reset();
        self.pending = Some(self.scheduler.schedule()?);
        log::debug!("frame loop started with {} rules", self.rules.len());
        Ok(())
    }

    /// Cancel the pending tick. Late host callbacks become no-ops.
    pub fn stop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel(request);
            log::debug!("frame loop stopped after {} frames", self.clock.frames());
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Host callback for a display refresh at `now`.
    ///
    /// Returns `Ok(None)` when no tick was pending (stopped loop).
    pub fn on_frame<R: Renderer, T: Telemetry>(
        &mut self,
        context: &mut FrameContext<R, T>,
        now: Duration,
    ) -> Result<Option<FrameTime>, LoopError> {
        if self.pending.take().is_none() {
            log::trace!("ignoring frame callback while stopped");
            return Ok(None);
        }

        let time = self.clock.tick(now);

        for rule in &mut self.rules {
            if let Err(err) = rule.apply(&mut context.scene, &time) {
                log::warn!("rule `{}` failed on frame {}: {err}", rule.name(), time.frame);
            }
        }

        if let Err(err) = context.renderer.render(&context.scene) {
            log::warn!("render failed on frame {}: {err}", time.frame);
        }

        context.telemetry.update(&time);

        match self.scheduler.schedule() {
            Ok(request) => self.pending = Some(request),
            Err(err) => {
                log::error!("frame loop halted on frame {}: {err}", time.frame);
                return Err(err.into());
            }
        }

        log::trace!("frame {} done ({:?} elapsed)", time.frame, time.elapsed);
        Ok(Some(time))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::animation::{AnimatedEntity, Bounds, RuleError, TimeBasis};
    use crate::camera::Camera;
    use crate::rendering::RenderError;

    /// Shared event log so ordering across collaborators can be checked
    type Events = Rc<RefCell<Vec<String>>>;

    struct RecordingRule {
        events: Events,
        fail: bool,
    }

    impl AnimationRule for RecordingRule {
        fn name(&self) -> &str {
            "recording"
        }

        fn time_basis(&self) -> TimeBasis {
            TimeBasis::Elapsed
        }

        fn apply(&mut self, scene: &mut Scene, time: &FrameTime) -> Result<(), RuleError> {
            self.events
                .borrow_mut()
                .push(format!("rule {:?}", time.elapsed));
            if self.fail {
                return Err(RuleError::MissingLight { index: 0 });
            }
            for entity in &mut scene.entities {
                entity.position.y += time.elapsed_secs();
            }
            Ok(())
        }
    }

    struct RecordingRenderer {
        events: Events,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, _scene: &Scene) -> Result<(), RenderError> {
            self.events.borrow_mut().push("render".into());
            Ok(())
        }
    }

    struct RecordingTelemetry {
        events: Events,
    }

    impl Telemetry for RecordingTelemetry {
        fn update(&mut self, time: &FrameTime) {
            self.events
                .borrow_mut()
                .push(format!("stats {}", time.frame));
        }

        fn toggle(&mut self) {}
    }

    fn context(events: &Events) -> FrameContext<RecordingRenderer, RecordingTelemetry> {
        let mut scene = Scene::new(Camera::default());
        scene.entities.push(AnimatedEntity {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            opacity: 1.0,
            bounds: Bounds::new(Vec3::splat(-10.0), Vec3::splat(10.0)),
        });
        FrameContext::new(
            scene,
            RecordingRenderer {
                events: Rc::clone(events),
            },
            RecordingTelemetry {
                events: Rc::clone(events),
            },
        )
    }

    fn rule(events: &Events, fail: bool) -> Box<dyn AnimationRule> {
        Box::new(RecordingRule {
            events: Rc::clone(events),
            fail,
        })
    }

    #[test]
    fn test_tick_runs_steps_in_order() {
        let events = Events::default();
        let mut ctx = context(&events);
        let mut frame_loop = FrameLoop::new(ManualScheduler::new());
        frame_loop.add_rule(rule(&events, false));

        frame_loop.start().unwrap();
        assert_eq!(frame_loop.scheduler().pending(), 1);

        frame_loop.scheduler_mut().fire();
        frame_loop
            .on_frame(&mut ctx, Duration::from_millis(1000))
            .unwrap();

        assert_eq!(
            *events.borrow(),
            vec!["rule 0ns".to_string(), "render".into(), "stats 0".into()]
        );
        // Next tick scheduled last
        assert_eq!(frame_loop.scheduler().pending(), 1);
    }

    #[test]
    fn test_first_tick_applies_no_motion() {
        let events = Events::default();
        let mut ctx = context(&events);
        let mut frame_loop = FrameLoop::new(ManualScheduler::new());
        frame_loop.add_rule(rule(&events, false));
        frame_loop.start().unwrap();

        let time = frame_loop
            .on_frame(&mut ctx, Duration::from_secs(9999))
            .unwrap()
            .unwrap();
        assert_eq!(time.elapsed, Duration::ZERO);
        assert_eq!(ctx.scene.entities[0].position.y, 0.0);

        let time = frame_loop
            .on_frame(&mut ctx, Duration::from_millis(9_999_500))
            .unwrap()
            .unwrap();
        assert_eq!(time.elapsed, Duration::from_millis(500));
        assert!((ctx.scene.entities[0].position.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_failing_rule_does_not_stop_loop() {
        let events = Events::default();
        let mut ctx = context(&events);
        let mut frame_loop = FrameLoop::new(ManualScheduler::new());
        frame_loop.add_rule(rule(&events, true));
        frame_loop.add_rule(rule(&events, false));
        frame_loop.start().unwrap();

        for ms in [0u64, 16, 32] {
            let result = frame_loop.on_frame(&mut ctx, Duration::from_millis(ms));
            assert!(result.unwrap().is_some());
        }

        assert!(frame_loop.is_running());
        let renders = events.borrow().iter().filter(|e| *e == "render").count();
        assert_eq!(renders, 3);
        assert!((ctx.scene.entities[0].position.y - 0.032).abs() < 1e-6);
    }

    struct LostSurfaceRenderer {
        events: Events,
    }

    impl Renderer for LostSurfaceRenderer {
        fn render(&mut self, _scene: &Scene) -> Result<(), RenderError> {
            self.events.borrow_mut().push("render".into());
            Err(RenderError::Surface(wgpu::SurfaceError::Lost))
        }
    }

    #[test]
    fn test_failing_render_does_not_stop_loop() {
        let events = Events::default();
        let mut ctx = FrameContext::new(
            Scene::new(Camera::default()),
            LostSurfaceRenderer {
                events: Rc::clone(&events),
            },
            RecordingTelemetry {
                events: Rc::clone(&events),
            },
        );
        let mut frame_loop = FrameLoop::new(ManualScheduler::new());
        frame_loop.start().unwrap();

        for ms in [0u64, 16, 32] {
            assert!(frame_loop.scheduler_mut().fire().is_some());
            let result = frame_loop.on_frame(&mut ctx, Duration::from_millis(ms));
            assert!(result.unwrap().is_some());
        }

        assert!(frame_loop.is_running());
        assert_eq!(frame_loop.scheduler().pending(), 1);
        let events = events.borrow();
        assert_eq!(events.iter().filter(|e| *e == "render").count(), 3);
        assert_eq!(
            events.iter().filter(|e| e.starts_with("stats")).count(),
            3
        );
        assert_eq!(events.last().map(String::as_str), Some("stats 2"));
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let events = Events::default();
        let mut ctx = context(&events);
        let mut frame_loop = FrameLoop::new(ManualScheduler::new());
        frame_loop.start().unwrap();
        frame_loop.stop();

        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.scheduler().pending(), 0);

        // A late host callback does nothing
        let result = frame_loop
            .on_frame(&mut ctx, Duration::from_millis(16))
            .unwrap();
        assert!(result.is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_restart_resets_elapsed() {
        let events = Events::default();
        let mut ctx = context(&events);
        let mut frame_loop = FrameLoop::new(ManualScheduler::new());
        frame_loop.start().unwrap();
        frame_loop.on_frame(&mut ctx, Duration::from_secs(1)).unwrap();
        frame_loop.stop();

        frame_loop.start().unwrap();
        let time = frame_loop
            .on_frame(&mut ctx, Duration::from_secs(30))
            .unwrap()
            .unwrap();
        assert_eq!(time.elapsed, Duration::ZERO);
        assert_eq!(time.frame, 1);
    }

    #[test]
    fn test_start_twice_schedules_once() {
        let mut frame_loop = FrameLoop::new(ManualScheduler::new());
        frame_loop.start().unwrap();
        frame_loop.start().unwrap();
        assert_eq!(frame_loop.scheduler().pending(), 1);
    }

    #[test]
    fn test_schedule_failure_surfaces_from_start() {
        let mut scheduler = ManualScheduler::new();
        scheduler.set_refusing(true);
        let mut frame_loop = FrameLoop::new(scheduler);

        assert_eq!(
            frame_loop.start(),
            Err(LoopError::Schedule(ScheduleError::Refused))
        );
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn test_schedule_failure_mid_loop_is_fatal() {
        let events = Events::default();
        let mut ctx = context(&events);
        let mut frame_loop = FrameLoop::new(ManualScheduler::new());
        frame_loop.start().unwrap();

        frame_loop.scheduler_mut().set_refusing(true);
        let result = frame_loop.on_frame(&mut ctx, Duration::ZERO);
        assert_eq!(result, Err(LoopError::Schedule(ScheduleError::Refused)));
        assert!(!frame_loop.is_running());
    }
}
