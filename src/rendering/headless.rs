//! Renderer that builds frame data without a GPU.

use std::cell::RefCell;
use std::rc::Rc;

use super::{collect_instances, RenderError, Renderer, ShaderInputs, Uniforms};
use crate::scene::Scene;

/// Builds uniforms and instance lists each frame and keeps the last ones
pub struct HeadlessRenderer {
    inputs: Rc<RefCell<ShaderInputs>>,
    resolution: [f32; 2],
    pub frames_rendered: u64,
    pub last_uniforms: Option<Uniforms>,
    pub last_instance_counts: [usize; 4],
}

impl HeadlessRenderer {
    pub fn new(inputs: Rc<RefCell<ShaderInputs>>, resolution: [f32; 2]) -> Self {
        Self {
            inputs,
            resolution,
            frames_rendered: 0,
            last_uniforms: None,
            last_instance_counts: [0; 4],
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let inputs = *self.inputs.borrow();
        self.last_uniforms = Some(Uniforms::new(&inputs, scene, self.resolution));
        self.last_instance_counts = collect_instances(scene, &inputs).map(|batch| batch.len());
        self.frames_rendered += 1;
        log::trace!(
            "headless frame {} ({:?} instances)",
            self.frames_rendered,
            self.last_instance_counts
        );
        Ok(())
    }
}
