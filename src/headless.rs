//! Run a demo for a fixed number of ticks without a window.

use std::time::Duration;

use crate::demo::Demo;
use crate::frame_loop::{FrameContext, FrameLoop, LoopError, ManualScheduler};
use crate::params::{LoopConfig, RenderConfig};
use crate::rendering::HeadlessRenderer;
use crate::scene::Scene;
use crate::stats::{Stats, Telemetry};

/// Outcome of a headless run
pub struct HeadlessRun {
    /// Ticks actually executed
    pub frames: u64,

    /// Timestamp of the last tick
    pub simulated: Duration,

    pub scene: Scene,
    pub renderer: HeadlessRenderer,
    pub stats: Stats,
}

/// Tick `demo` `frames` times at the configured simulated refresh rate
pub fn run(
    demo: Demo,
    frames: u64,
    loop_config: &LoopConfig,
    render_config: &RenderConfig,
    show_stats: bool,
) -> Result<HeadlessRun, LoopError> {
    let Demo {
        kind,
        scene,
        rules,
        shader_inputs,
        ..
    } = demo;

    let renderer = HeadlessRenderer::new(
        shader_inputs,
        [
            render_config.window_width as f32,
            render_config.window_height as f32,
        ],
    );
    let mut stats = Stats::new(loop_config);
    if show_stats {
        stats.toggle();
    }
    let mut context = FrameContext::new(scene, renderer, stats);

    let mut frame_loop = FrameLoop::new(ManualScheduler::new());
    for rule in rules {
        frame_loop.add_rule(rule);
    }

    let step = loop_config.headless_step();
    log::info!(
        "running {kind} headless: {frames} frames, {} rules, {step:?} per frame",
        frame_loop.rule_count()
    );

    frame_loop.start()?;
    let mut now = Duration::ZERO;
    let mut ticks = 0;
    while ticks < frames && frame_loop.scheduler_mut().fire().is_some() {
        if frame_loop.on_frame(&mut context, now)?.is_none() {
            break;
        }
        ticks += 1;
        now += step;
    }
    frame_loop.stop();
    debug_assert_eq!(frame_loop.clock().frames(), ticks);

    let simulated = now.saturating_sub(step);
    log::info!(
        "headless run done: {ticks} frames, {:.2}s simulated",
        simulated.as_secs_f32()
    );

    Ok(HeadlessRun {
        frames: ticks,
        simulated,
        scene: context.scene,
        renderer: context.renderer,
        stats: context.telemetry,
    })
}
