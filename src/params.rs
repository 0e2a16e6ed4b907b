//! Demo parameters with physical units and documented defaults.
//!
//! Every magic number of the demos lives here with:
//! - Units (meters, seconds, degrees, ...)
//! - The range exposed to the debug panel, where one exists

mod confetti;
mod lights;
mod render;
mod shader;

pub use confetti::ConfettiConfig;
pub use lights::LightsConfig;
pub use render::{LoopConfig, RenderConfig};
pub use shader::{HologramConfig, ScanlineConfig};
