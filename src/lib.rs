//! lumenloop library - frame loop, parameter store and animation rules for visual demos

pub mod animation;
pub mod camera;
pub mod cli;
pub mod demo;
pub mod frame_loop;
pub mod headless;
pub mod panel;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod stats;
pub mod store;
