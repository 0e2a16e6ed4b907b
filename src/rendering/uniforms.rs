//! Shader inputs, their parameter names, and the GPU uniform block.

use std::cell::RefCell;
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::scene::Scene;
use crate::store::{Binding, ParamValue};

/// Parameter names the renderer understands
pub mod names {
    pub const TIME: &str = "time";
    pub const LIGHTING_INTENSITY: &str = "lightingIntensity";
    pub const EXPOSURE: &str = "exposure";
    pub const SCAN_LINE_SPEED: &str = "scanLineSpeed";
    pub const SCAN_LINE_SCALE: &str = "scanLineScale";
    pub const SCAN_LINE_INTENSITY: &str = "scanLineIntensity";
    pub const FILM_GRAIN_INTENSITY: &str = "filmGrainIntensity";
    pub const OPACITY: &str = "opacity";
    pub const SMOOTH_STEP_LIGHTING: &str = "smoothStepLighting";
    pub const COLOR: &str = "color";
    pub const DEBUG_LIGHTS: &str = "debugLights";
    pub const SHOW_LIGHT_0: &str = "showLight0";
    pub const SHOW_LIGHT_1: &str = "showLight1";
}

/// Number of point lights the shader evaluates
pub const MAX_LIGHTS: usize = 2;

/// Fragment shading model, matched by value in `shader.wgsl`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ShadingMode {
    /// View-space normals as color
    Normal = 0,
    /// Ambient plus point lights
    Lit = 1,
    Hologram = 2,
    Scanline = 3,
}

/// CPU-side shader state, kept in sync with the parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderInputs {
    pub mode: ShadingMode,
    pub time: f32,
    pub lighting_intensity: f32,
    pub exposure: f32,
    pub scan_line_speed: f32,
    pub scan_line_scale: f32,
    pub scan_line_intensity: f32,
    pub film_grain_intensity: f32,
    pub opacity: f32,
    pub smooth_step_lighting: bool,
    pub color: Vec3,
    pub ambient: Vec3,
    pub clear_color: Vec3,
    pub debug_lights: bool,
    pub light_visible: [bool; MAX_LIGHTS],
}

impl Default for ShaderInputs {
    fn default() -> Self {
        Self {
            mode: ShadingMode::Normal,
            time: 0.0,
            lighting_intensity: 1.0,
            exposure: 1.0,
            scan_line_speed: 0.0,
            scan_line_scale: 1.0,
            scan_line_intensity: 0.0,
            film_grain_intensity: 0.0,
            opacity: 1.0,
            smooth_step_lighting: true,
            color: Vec3::ONE,
            ambient: Vec3::ZERO,
            clear_color: Vec3::ZERO,
            debug_lights: false,
            light_visible: [true; MAX_LIGHTS],
        }
    }
}

/// Writes parameter changes through to shared [`ShaderInputs`]
pub struct UniformBinding {
    inputs: Rc<RefCell<ShaderInputs>>,
}

impl UniformBinding {
    pub fn new(inputs: Rc<RefCell<ShaderInputs>>) -> Self {
        Self { inputs }
    }
}

impl Binding for UniformBinding {
    fn changed(&mut self, name: &str, value: &ParamValue) {
        let mut inputs = self.inputs.borrow_mut();
        match (name, *value) {
            (names::TIME, ParamValue::Float(v)) => inputs.time = v,
            (names::LIGHTING_INTENSITY, ParamValue::Float(v)) => inputs.lighting_intensity = v,
            (names::EXPOSURE, ParamValue::Float(v)) => inputs.exposure = v,
            (names::SCAN_LINE_SPEED, ParamValue::Float(v)) => inputs.scan_line_speed = v,
            (names::SCAN_LINE_SCALE, ParamValue::Float(v)) => inputs.scan_line_scale = v,
            (names::SCAN_LINE_INTENSITY, ParamValue::Float(v)) => inputs.scan_line_intensity = v,
            (names::FILM_GRAIN_INTENSITY, ParamValue::Float(v)) => inputs.film_grain_intensity = v,
            (names::OPACITY, ParamValue::Float(v)) => inputs.opacity = v,
            (names::SMOOTH_STEP_LIGHTING, ParamValue::Bool(v)) => inputs.smooth_step_lighting = v,
            (names::COLOR, ParamValue::Vec3(v)) => inputs.color = v,
            (names::DEBUG_LIGHTS, ParamValue::Bool(v)) => inputs.debug_lights = v,
            (names::SHOW_LIGHT_0, ParamValue::Bool(v)) => inputs.light_visible[0] = v,
            (names::SHOW_LIGHT_1, ParamValue::Bool(v)) => inputs.light_visible[1] = v,
            _ => log::trace!("parameter `{name}` has no uniform"),
        }
    }
}

/// Uniform buffer layout shared with `shader.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub inv_view: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// xyz = position, w = range
    pub light_positions: [[f32; 4]; MAX_LIGHTS],
    /// rgb = color * intensity, w = 1 when visible
    pub light_colors: [[f32; 4]; MAX_LIGHTS],
    pub base_color: [f32; 4],
    pub clear_color: [f32; 4],
    pub time: f32,
    pub shading_mode: u32,
    pub lighting_intensity: f32,
    pub exposure: f32,
    pub scan_line_scale: f32,
    pub scan_line_intensity: f32,
    pub scan_line_speed: f32,
    pub film_grain_intensity: f32,
    pub opacity: f32,
    pub smooth_step_lighting: u32,
    pub resolution: [f32; 2],
}

/// Authored colors are sRGB; the surface expects linear values and re-encodes on write.
pub fn srgb_to_linear(color: Vec3) -> Vec3 {
    color.max(Vec3::ZERO).powf(2.2)
}

impl Uniforms {
    pub fn new(inputs: &ShaderInputs, scene: &Scene, resolution: [f32; 2]) -> Self {
        let aspect_ratio = resolution[0] / resolution[1].max(1.0);
        let view = scene.camera.view();

        let mut light_positions = [[0.0; 4]; MAX_LIGHTS];
        let mut light_colors = [[0.0; 4]; MAX_LIGHTS];
        for (i, light) in scene.lights.iter().take(MAX_LIGHTS).enumerate() {
            light_positions[i] = light.position.extend(light.range_m).to_array();
            let visible = if inputs.light_visible[i] { 1.0 } else { 0.0 };
            light_colors[i] = (srgb_to_linear(light.color) * light.intensity)
                .extend(visible)
                .to_array();
        }

        let base_color = match inputs.mode {
            ShadingMode::Lit => inputs.ambient,
            _ => inputs.color,
        };

        Self {
            view_proj: scene.camera.view_proj(aspect_ratio).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            inv_view: view.inverse().to_cols_array_2d(),
            camera_pos: scene.camera.eye.extend(1.0).to_array(),
            light_positions,
            light_colors,
            base_color: srgb_to_linear(base_color).extend(1.0).to_array(),
            clear_color: srgb_to_linear(inputs.clear_color).extend(1.0).to_array(),
            time: inputs.time,
            shading_mode: inputs.mode as u32,
            lighting_intensity: inputs.lighting_intensity,
            exposure: inputs.exposure,
            scan_line_scale: inputs.scan_line_scale,
            scan_line_intensity: inputs.scan_line_intensity,
            scan_line_speed: inputs.scan_line_speed,
            film_grain_intensity: inputs.film_grain_intensity,
            opacity: inputs.opacity,
            smooth_step_lighting: inputs.smooth_step_lighting as u32,
            resolution,
        }
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            inv_view: Mat4::IDENTITY.to_cols_array_2d(),
            ..Self::zeroed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::PointLight;
    use crate::store::{ParamRange, ParameterStore};

    #[test]
    fn test_uniform_block_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<Uniforms>(), 352);
    }

    #[test]
    fn test_binding_writes_through() {
        let inputs = Rc::new(RefCell::new(ShaderInputs::default()));
        let mut store = ParameterStore::new();
        store
            .define(names::EXPOSURE, 2.0_f32, Some(ParamRange::new(0.0, 10.0)))
            .unwrap();
        store.define(names::SHOW_LIGHT_1, true, None).unwrap();
        store.define("unrelated", 1.0_f32, None).unwrap();
        store.bind_all(UniformBinding::new(Rc::clone(&inputs)));

        // Replayed on bind
        assert_eq!(inputs.borrow().exposure, 2.0);

        store.set(names::EXPOSURE, 11.0_f32).unwrap();
        store.set(names::SHOW_LIGHT_1, false).unwrap();
        store.set("unrelated", 5.0_f32).unwrap();

        let inputs = inputs.borrow();
        assert_eq!(inputs.exposure, 10.0);
        assert_eq!(inputs.light_visible, [true, false]);
    }

    #[test]
    fn test_uniforms_carry_lights_and_mode() {
        let mut scene = Scene::new(Camera::default());
        scene.lights.push(PointLight {
            position: Vec3::new(1.0, 2.0, 3.0),
            color: Vec3::new(1.0, 0.0, 0.0),
            intensity: 2.0,
            range_m: 10.0,
        });
        let inputs = ShaderInputs {
            mode: ShadingMode::Lit,
            ambient: Vec3::splat(0.1),
            light_visible: [false, true],
            ..Default::default()
        };

        let uniforms = Uniforms::new(&inputs, &scene, [1280.0, 720.0]);
        assert_eq!(uniforms.shading_mode, 1);
        assert_eq!(uniforms.light_positions[0], [1.0, 2.0, 3.0, 10.0]);
        assert_eq!(uniforms.light_colors[0], [2.0, 0.0, 0.0, 0.0]);
        assert_eq!(uniforms.light_colors[1], [0.0; 4]);
        let ambient = 0.1_f32.powf(2.2);
        assert!((uniforms.base_color[0] - ambient).abs() < 1e-6);
        assert_eq!(uniforms.base_color[3], 1.0);
    }

    #[test]
    fn test_background_colors_are_linearized() {
        let scene = Scene::new(Camera::default());
        let inputs = ShaderInputs {
            mode: ShadingMode::Scanline,
            color: Vec3::new(0.07, 0.07, 0.15),
            clear_color: Vec3::new(0.07, 0.07, 0.15),
            ..Default::default()
        };

        let uniforms = Uniforms::new(&inputs, &scene, [1280.0, 720.0]);
        // Dark background stays dark once the surface re-encodes it
        assert!(uniforms.clear_color[0] < 0.01);
        assert!((uniforms.clear_color[2] - 0.15_f32.powf(2.2)).abs() < 1e-6);
        // Scan-line shading blends into the exact same background
        assert_eq!(uniforms.base_color, uniforms.clear_color);

        assert_eq!(srgb_to_linear(Vec3::ONE), Vec3::ONE);
        assert_eq!(srgb_to_linear(Vec3::new(-1.0, 0.0, 0.5)).x, 0.0);
    }
}
