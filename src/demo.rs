//! Demo scenes: parameters, entities, lights and rules for each demo kind.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::rc::Rc;

use glam::Vec3;

use crate::animation::{AnimationRule, Bounds, ConfettiRule, OrbitPath, OrbitingLightRule, ShaderTimeRule};
use crate::camera::Camera;
use crate::panel::DebugPanel;
use crate::params::{ConfettiConfig, HologramConfig, LightsConfig, ScanlineConfig};
use crate::rendering::{names, ShaderInputs, ShadingMode, UniformBinding};
use crate::scene::{PointLight, Prop, Scene, Shape};
use crate::store::{ParamError, ParamRange};

/// Rise speed of the confetti
pub const CONFETTI_SPEED: &str = "confettiSpeed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    Confetti,
    Lights,
    Hologram,
    Scanline,
}

impl DemoKind {
    pub const ALL: [DemoKind; 4] = [
        DemoKind::Confetti,
        DemoKind::Lights,
        DemoKind::Hologram,
        DemoKind::Scanline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Confetti => "confetti",
            DemoKind::Lights => "lights",
            DemoKind::Hologram => "hologram",
            DemoKind::Scanline => "scanline",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ready-to-run demo
pub struct Demo {
    pub kind: DemoKind,
    pub scene: Scene,
    pub rules: Vec<Box<dyn AnimationRule>>,
    /// Shader state kept in sync with `scene.params`
    pub shader_inputs: Rc<RefCell<ShaderInputs>>,
    /// Parameters driven by rules, not shown on the panel
    pub hidden: Vec<&'static str>,
}

impl Demo {
    pub fn build(kind: DemoKind, seed: u64) -> Result<Self, ParamError> {
        let demo = match kind {
            DemoKind::Confetti => confetti(&ConfettiConfig::default(), seed)?,
            DemoKind::Lights => lights(&LightsConfig::default())?,
            DemoKind::Hologram => hologram(&HologramConfig::default())?,
            DemoKind::Scanline => scanline(&HologramConfig::default(), &ScanlineConfig::default())?,
        };
        log::info!(
            "built {kind} demo: {} entities, {} props, {} lights, {} parameters",
            demo.scene.entities.len(),
            demo.scene.props.len(),
            demo.scene.lights.len(),
            demo.scene.params.len()
        );
        Ok(demo)
    }

    pub fn panel(&self) -> DebugPanel {
        DebugPanel::new(&self.scene.params, &self.hidden)
    }

    /// Bind the shader inputs to every parameter, then apply demo-fixed inputs
    fn bind_inputs(&mut self, fixed: impl FnOnce(&mut ShaderInputs)) {
        self.scene
            .params
            .bind_all(UniformBinding::new(Rc::clone(&self.shader_inputs)));
        fixed(&mut self.shader_inputs.borrow_mut());
    }
}

fn empty(kind: DemoKind, camera: Camera) -> Demo {
    Demo {
        kind,
        scene: Scene::new(camera),
        rules: Vec::new(),
        shader_inputs: Rc::new(RefCell::new(ShaderInputs::default())),
        hidden: Vec::new(),
    }
}

fn confetti(config: &ConfettiConfig, seed: u64) -> Result<Demo, ParamError> {
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, config.camera_distance),
        Vec3::ZERO,
        config.fov_degrees,
    )
    .with_planes(config.near_plane, config.far_plane);
    let mut demo = empty(DemoKind::Confetti, camera);

    demo.scene.params.define(
        CONFETTI_SPEED,
        config.rise_speed,
        Some(ParamRange::new(0.0, config.max_rise_speed)),
    )?;

    let bounds = Bounds::new(
        Vec3::from_array(config.bounds_min),
        Vec3::from_array(config.bounds_max),
    );
    let mut rule = ConfettiRule::new(config.rise_speed, camera.facing_axis(), seed)
        .with_speed_param(CONFETTI_SPEED);
    demo.scene.entities = rule.spawn(bounds, config.piece_count);
    demo.scene.entity_shape = Shape::Cube;
    demo.scene.entity_size = config.piece_size;
    demo.rules.push(Box::new(rule));

    demo.bind_inputs(|inputs| inputs.mode = ShadingMode::Normal);
    Ok(demo)
}

fn lights(config: &LightsConfig) -> Result<Demo, ParamError> {
    let camera = Camera::new(
        Vec3::from_array(config.camera_position),
        Vec3::ZERO,
        config.fov_degrees,
    );
    let mut demo = empty(DemoKind::Lights, camera);

    demo.scene
        .params
        .define(names::DEBUG_LIGHTS, config.debug_lights, None)?;
    demo.scene.params.define(names::SHOW_LIGHT_0, true, None)?;
    demo.scene.params.define(names::SHOW_LIGHT_1, true, None)?;

    demo.scene.props.push(
        Prop::new(Shape::Plane, Vec3::ZERO).with_scale(Vec3::new(
            config.ground_size_m,
            1.0,
            config.ground_size_m,
        )),
    );
    for position in config.sphere_positions() {
        demo.scene.props.push(
            Prop::new(Shape::Sphere, Vec3::from_array(position))
                .with_scale(Vec3::splat(config.sphere_radius_m)),
        );
    }

    let paths = vec![
        OrbitPath::new(config.orbit_radius_m, config.orbit_height_m, 0.0),
        OrbitPath::new(
            config.orbit_radius_m,
            config.orbit_height_m,
            config.second_light_phase,
        ),
    ];
    let colors = [Vec3::ONE, Vec3::new(1.0, 0.0, 0.0)];
    for (path, color) in paths.iter().zip(colors) {
        demo.scene.lights.push(PointLight {
            position: path.position_at(0.0),
            color,
            intensity: config.light_intensity,
            range_m: config.light_range_m,
        });
    }
    demo.rules.push(Box::new(OrbitingLightRule::new(paths)));

    let ambient = Vec3::from_array(config.ambient);
    demo.bind_inputs(|inputs| {
        inputs.mode = ShadingMode::Lit;
        inputs.ambient = ambient;
        inputs.clear_color = ambient;
    });
    Ok(demo)
}

/// Box, sphere and ring side by side along X
fn hologram_shapes(config: &HologramConfig) -> Vec<Prop> {
    vec![
        Prop::new(Shape::Cube, Vec3::new(-config.shape_spacing_m, 0.0, 0.0))
            .with_scale(Vec3::splat(config.box_size_m)),
        Prop::new(Shape::Sphere, Vec3::ZERO).with_scale(Vec3::splat(config.sphere_radius_m)),
        // Ring stood upright, facing the camera
        Prop::new(Shape::Torus, Vec3::new(config.shape_spacing_m, 0.0, 0.0))
            .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
    ]
}

fn hologram_camera(config: &HologramConfig) -> Camera {
    Camera::new(
        Vec3::from_array(config.camera_position),
        Vec3::ZERO,
        config.fov_degrees,
    )
}

fn hologram(config: &HologramConfig) -> Result<Demo, ParamError> {
    let mut demo = empty(DemoKind::Hologram, hologram_camera(config));
    demo.scene.props = hologram_shapes(config);

    let params = &mut demo.scene.params;
    params.define(names::TIME, 0.0_f32, None)?;
    params.define(
        names::LIGHTING_INTENSITY,
        config.lighting_intensity,
        Some(ParamRange::new(0.0, 10.0)),
    )?;
    params.define(names::EXPOSURE, config.exposure, Some(ParamRange::new(0.0, 10.0)))?;
    params.define(
        names::SCAN_LINE_SPEED,
        config.scan_line_speed,
        Some(ParamRange::new(0.0, 30.0)),
    )?;
    params.define(
        names::FILM_GRAIN_INTENSITY,
        config.film_grain_intensity,
        Some(ParamRange::new(0.0, 1.0)),
    )?;
    params.define(
        names::SCAN_LINE_SCALE,
        config.scan_line_scale,
        Some(ParamRange::new(0.0, 1.0)),
    )?;
    params.define(
        names::SCAN_LINE_INTENSITY,
        config.scan_line_intensity,
        Some(ParamRange::new(0.0, 1.0)),
    )?;
    params.define(names::OPACITY, config.opacity, Some(ParamRange::new(0.0, 1.0)))?;
    params.define(names::SMOOTH_STEP_LIGHTING, config.smooth_step_lighting, None)?;
    params.define(
        names::COLOR,
        Vec3::from_array(config.color),
        Some(ParamRange::vec3(Vec3::ZERO, Vec3::ONE)),
    )?;

    demo.rules.push(Box::new(ShaderTimeRule::new(names::TIME)));
    demo.hidden.push(names::TIME);

    let clear_color = Vec3::from_array(config.clear_color);
    demo.bind_inputs(|inputs| {
        inputs.mode = ShadingMode::Hologram;
        inputs.clear_color = clear_color;
    });
    Ok(demo)
}

fn scanline(shapes: &HologramConfig, config: &ScanlineConfig) -> Result<Demo, ParamError> {
    let mut demo = empty(DemoKind::Scanline, hologram_camera(shapes));
    demo.scene.props = hologram_shapes(shapes);

    let params = &mut demo.scene.params;
    params.define(names::TIME, 0.0_f32, None)?;
    params.define(
        names::LIGHTING_INTENSITY,
        config.lighting_intensity,
        Some(ParamRange::new(0.0, 10.0)),
    )?;
    params.define(
        names::SCAN_LINE_SPEED,
        config.scan_line_speed,
        Some(ParamRange::new(0.0, 100.0)),
    )?;
    params.define(
        names::FILM_GRAIN_INTENSITY,
        config.film_grain_intensity,
        Some(ParamRange::new(0.0, 10.0)),
    )?;

    demo.rules.push(Box::new(ShaderTimeRule::new(names::TIME)));
    demo.hidden.push(names::TIME);

    let clear_color = Vec3::from_array(config.clear_color);
    let scan_line_width = config.scan_line_width;
    demo.bind_inputs(|inputs| {
        inputs.mode = ShadingMode::Scanline;
        // The scan-line shader fades towards the background, not a tint
        inputs.color = clear_color;
        inputs.clear_color = clear_color;
        inputs.scan_line_scale = scan_line_width;
    });
    Ok(demo)
}
