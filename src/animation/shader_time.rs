//! Feeds the shader's `time` uniform.

use super::{AnimationRule, RuleError, TimeBasis};
use crate::frame_loop::FrameTime;
use crate::scene::Scene;

/// Writes seconds since the loop's first tick into a float parameter
pub struct ShaderTimeRule {
    param: String,
}

impl ShaderTimeRule {
    pub fn new(param: &str) -> Self {
        Self {
            param: param.to_string(),
        }
    }
}

impl AnimationRule for ShaderTimeRule {
    fn name(&self) -> &str {
        "shader-time"
    }

    fn time_basis(&self) -> TimeBasis {
        TimeBasis::SinceStart
    }

    fn apply(&mut self, scene: &mut Scene, time: &FrameTime) -> Result<(), RuleError> {
        scene.params.set(&self.param, time.since_start_secs())?;
        Ok(())
    }
}
