//! lumenloop - small real-time visual demos on a shared frame loop
//!
//! Confetti, orbiting lights, and two retro shader looks, each driven by the
//! same loop, parameter store and debug panel.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use lumenloop::cli::Args;
use lumenloop::demo::Demo;
use lumenloop::frame_loop::{FrameContext, FrameLoop, RedrawScheduler};
use lumenloop::headless;
use lumenloop::panel::{DebugPanel, PanelCommand};
use lumenloop::params::{LoopConfig, RenderConfig};
use lumenloop::rendering::{RenderSystem, Renderer};
use lumenloop::stats::{Stats, Telemetry};

const KEY_HELP: &str = "keys: Tab/Up/Down select, Left/Right adjust, Enter/Space toggle, \
                        H list parameters, F1 stats, P pause, Esc quit";

/// Everything that exists once the window is up
struct Running {
    window: Arc<Window>,
    frame_loop: FrameLoop<RedrawScheduler>,
    context: FrameContext<RenderSystem, Stats>,
    panel: DebugPanel,
}

/// Main application state
struct App {
    // Taken when the window is created
    demo: Option<Demo>,
    running: Option<Running>,

    // Configuration
    render_config: RenderConfig,
    loop_config: LoopConfig,
    show_stats: bool,

    // Time tracking
    epoch: Instant,

    failure: Option<anyhow::Error>,
}

impl App {
    fn new(demo: Demo, render_config: RenderConfig, loop_config: LoopConfig, show_stats: bool) -> Self {
        Self {
            demo: Some(demo),
            running: None,
            render_config,
            loop_config,
            show_stats,
            epoch: Instant::now(),
            failure: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop, demo: Demo) -> anyhow::Result<Running> {
        let window_attributes = Window::default_attributes()
            .with_title(format!("lumenloop - {}", demo.kind))
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let Demo {
            scene,
            rules,
            shader_inputs,
            hidden,
            ..
        } = demo;

        let panel = DebugPanel::new(&scene.params, &hidden);
        let renderer =
            pollster::block_on(RenderSystem::new(Arc::clone(&window), &scene, shader_inputs))?;

        let mut stats = Stats::new(&self.loop_config);
        if self.show_stats {
            stats.toggle();
        }

        let mut frame_loop = FrameLoop::new(RedrawScheduler::new(Arc::clone(&window)));
        for rule in rules {
            frame_loop.add_rule(rule);
        }
        frame_loop.start()?;

        log::info!("{KEY_HELP}");

        Ok(Running {
            window,
            frame_loop,
            context: FrameContext::new(scene, renderer, stats),
            panel,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let command = match code {
            KeyCode::Escape => {
                event_loop.exit();
                return;
            }
            KeyCode::F1 => {
                running.context.telemetry.toggle();
                return;
            }
            KeyCode::KeyH => {
                log::info!("parameters:\n{}", running.panel.describe(&running.context.scene.params));
                return;
            }
            KeyCode::KeyP => {
                if running.frame_loop.is_running() {
                    running.frame_loop.stop();
                    log::info!("paused");
                } else if let Err(err) = running.frame_loop.start() {
                    self.fail(event_loop, err.into());
                } else {
                    log::info!("resumed");
                }
                return;
            }
            KeyCode::Tab | KeyCode::ArrowDown => PanelCommand::Next,
            KeyCode::ArrowUp => PanelCommand::Previous,
            KeyCode::ArrowRight => PanelCommand::Increase,
            KeyCode::ArrowLeft => PanelCommand::Decrease,
            KeyCode::Enter | KeyCode::Space => PanelCommand::Toggle,
            _ => return,
        };

        if let Err(err) = running
            .panel
            .apply(command, &mut running.context.scene.params)
        {
            log::warn!("panel edit failed: {err}");
        }
        // Paused demos still show edits
        if !running.frame_loop.is_running() {
            if let Err(err) = running.context.renderer.render(&running.context.scene) {
                log::warn!("render failed: {err}");
            }
        }
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        let now = self.epoch.elapsed();
        if let Err(err) = running.frame_loop.on_frame(&mut running.context, now) {
            self.fail(event_loop, err.into());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return; // Already initialized
        }
        let Some(demo) = self.demo.take() else {
            return;
        };

        match self.init(event_loop, demo) {
            Ok(running) => self.running = Some(running),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self
            .running
            .as_ref()
            .is_some_and(|running| running.window.id() != window_id)
        {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(running) = self.running.as_mut() {
                    running.context.renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat,
                        ..
                    },
                ..
            } => {
                // Held arrows keep adjusting; other keys fire once
                let adjusting = matches!(code, KeyCode::ArrowLeft | KeyCode::ArrowRight);
                if !repeat || adjusting {
                    self.handle_key(event_loop, code);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("lumenloop", LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let kind = args.parse_demo();
    let render_config = args.render_config();
    let loop_config = LoopConfig::default();

    let demo = Demo::build(kind, args.seed).context("failed to build demo")?;

    if let Some(frames) = args.frames {
        let run = headless::run(demo, frames, &loop_config, &render_config, args.stats)?;
        log::info!("{}", run.stats.summary());
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(demo, render_config, loop_config, args.stats);
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
