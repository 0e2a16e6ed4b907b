//! Scene state handed to animation rules and renderers each tick.

use glam::Vec3;

use crate::animation::AnimatedEntity;
use crate::camera::Camera;
use crate::store::ParameterStore;

/// Mesh a scene object is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Cube,
    Sphere,
    Torus,
    Plane,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Cube, Shape::Sphere, Shape::Torus, Shape::Plane];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Static scene object (ground, spheres, hologram shapes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub shape: Shape,
    pub position: Vec3,
    /// Euler angles (radians, XYZ order)
    pub rotation: Vec3,
    pub scale: Vec3,
    pub tint: Vec3,
}

impl Prop {
    pub fn new(shape: Shape, position: Vec3) -> Self {
        Self {
            shape,
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            tint: Vec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Point light with linear range falloff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero (meters)
    pub range_m: f32,
}

/// Everything one demo draws and animates
pub struct Scene {
    pub params: ParameterStore,
    pub camera: Camera,

    /// Animated entities, all drawn with `entity_shape`
    pub entities: Vec<AnimatedEntity>,
    pub entity_shape: Shape,
    /// Edge length of an entity (meters)
    pub entity_size: f32,

    pub props: Vec<Prop>,
    pub lights: Vec<PointLight>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            params: ParameterStore::new(),
            camera,
            entities: Vec::new(),
            entity_shape: Shape::Cube,
            entity_size: 1.0,
            props: Vec::new(),
            lights: Vec::new(),
        }
    }
}
