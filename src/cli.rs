//! Command-line argument parsing.

use clap::Parser;

use crate::demo::DemoKind;
use crate::params::RenderConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "lumenloop")]
#[command(about = "Small real-time visual demos on a shared frame loop", long_about = None)]
pub struct Args {
    /// Demo to run: confetti, lights, hologram (default), scanline
    #[arg(long, value_name = "DEMO", default_value = "hologram")]
    pub demo: String,

    /// Show frame statistics from the start (toggle with F1)
    #[arg(long)]
    pub stats: bool,

    /// Run this many frames headless at the simulated refresh rate, then exit
    #[arg(long, value_name = "COUNT")]
    pub frames: Option<u64>,

    /// Seed for randomized demo state
    #[arg(long, value_name = "SEED", default_value = "0")]
    pub seed: u64,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,
}

impl Args {
    /// Parse the demo kind, falling back to the hologram demo
    pub fn parse_demo(&self) -> DemoKind {
        match DemoKind::from_name(&self.demo) {
            Some(kind) => {
                log::info!("demo: {kind}");
                kind
            }
            None => {
                log::warn!("unknown demo '{}', using hologram", self.demo);
                DemoKind::Hologram
            }
        }
    }

    /// Render configuration with command-line overrides applied
    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        if let Some(width) = self.width {
            config.window_width = width.max(1);
        }
        if let Some(height) = self.height {
            config.window_height = height.max(1);
        }
        config
    }
}
