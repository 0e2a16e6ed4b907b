//! Procedural meshes and per-instance draw data.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

use super::ShaderInputs;
use crate::scene::{Scene, Shape};

/// Vertex data (position + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Per-instance data: model matrix, tint (alpha = opacity), flags (x = emissive)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub flags: [f32; 4],
}

impl Instance {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3, tint: Vec4) -> Self {
        let orientation = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
        Self {
            model: Mat4::from_scale_rotation_translation(scale, orientation, position)
                .to_cols_array_2d(),
            tint: tint.to_array(),
            flags: [0.0; 4],
        }
    }

    pub fn emissive(mut self) -> Self {
        self.flags[0] = 1.0;
        self
    }
}

/// Indexed triangle mesh (counter-clockwise winding)
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn for_shape(shape: Shape) -> Self {
        match shape {
            Shape::Cube => Self::cube(),
            Shape::Sphere => Self::sphere(22, 22),
            Shape::Torus => Self::torus(1.0, 0.34, 16, 128),
            Shape::Plane => Self::plane(),
        }
    }

    /// Unit cube centred on the origin, one quad per face
    pub fn cube() -> Self {
        let faces = [
            (Vec3::X, Vec3::Y),
            (Vec3::NEG_X, Vec3::Y),
            (Vec3::Y, Vec3::Z),
            (Vec3::NEG_Y, Vec3::Z),
            (Vec3::Z, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y),
        ];
        let mut mesh = Mesh::default();
        for (normal, up) in faces {
            let right = up.cross(normal);
            let base = mesh.vertices.len() as u32;
            for (u, v) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
                let position = normal * 0.5 + right * u + up * v;
                mesh.vertices.push(Vertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                });
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// Unit-radius UV sphere
    pub fn sphere(segments: u32, rings: u32) -> Self {
        let mut mesh = Mesh::default();
        for ring in 0..=rings {
            let theta = ring as f32 / rings as f32 * PI;
            for segment in 0..=segments {
                let phi = segment as f32 / segments as f32 * TAU;
                let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                mesh.vertices.push(Vertex {
                    position: normal.to_array(),
                    normal: normal.to_array(),
                });
            }
        }
        mesh.indices = grid_indices(rings, segments);
        mesh
    }

    /// Torus around the Y axis with ring radius `radius` and tube radius `tube`
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let mut mesh = Mesh::default();
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let ring_centre = Vec3::new(u.cos() * radius, 0.0, u.sin() * radius);
            for j in 0..=radial_segments {
                let v = j as f32 / radial_segments as f32 * TAU;
                let outward = Vec3::new(u.cos(), 0.0, u.sin());
                let normal = outward * v.cos() + Vec3::Y * v.sin();
                mesh.vertices.push(Vertex {
                    position: (ring_centre + normal * tube).to_array(),
                    normal: normal.to_array(),
                });
            }
        }
        mesh.indices = grid_indices(tubular_segments, radial_segments);
        mesh
    }

    /// Unit XZ plane facing +Y
    pub fn plane() -> Self {
        let corners = [(-0.5, 0.5), (0.5, 0.5), (0.5, -0.5), (-0.5, -0.5)];
        Mesh {
            vertices: corners
                .iter()
                .map(|&(x, z)| Vertex {
                    position: [x, 0.0, z],
                    normal: [0.0, 1.0, 0.0],
                })
                .collect(),
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}

/// Triangle indices for a (rows + 1) x (columns + 1) vertex grid
fn grid_indices(rows: u32, columns: u32) -> Vec<u32> {
    let stride = columns + 1;
    let mut indices = Vec::with_capacity((rows * columns * 6) as usize);
    for row in 0..rows {
        for column in 0..columns {
            let a = row * stride + column;
            let b = a + stride;
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    indices
}

/// Per-shape instance lists for one frame, indexed by [`Shape::index`]
pub fn collect_instances(scene: &Scene, inputs: &ShaderInputs) -> [Vec<Instance>; 4] {
    let mut batches: [Vec<Instance>; 4] = Default::default();

    for prop in &scene.props {
        batches[prop.shape.index()].push(Instance::new(
            prop.position,
            prop.rotation,
            prop.scale,
            prop.tint.extend(1.0),
        ));
    }

    let entity_scale = Vec3::splat(scene.entity_size);
    for entity in &scene.entities {
        batches[scene.entity_shape.index()].push(Instance::new(
            entity.position,
            entity.rotation,
            entity_scale,
            Vec3::ONE.extend(entity.opacity),
        ));
    }

    if inputs.debug_lights {
        for (light, visible) in scene.lights.iter().zip(inputs.light_visible) {
            if visible {
                let marker =
                    Instance::new(light.position, Vec3::ZERO, Vec3::splat(0.1), light.color.extend(1.0));
                batches[Shape::Sphere.index()].push(marker.emissive());
            }
        }
    }

    batches
}

/// Upper bound of [`collect_instances`] per shape for this scene
pub fn instance_capacity(scene: &Scene) -> [usize; 4] {
    let mut capacity = [0usize; 4];
    for prop in &scene.props {
        capacity[prop.shape.index()] += 1;
    }
    capacity[scene.entity_shape.index()] += scene.entities.len();
    capacity[Shape::Sphere.index()] += scene.lights.len();
    capacity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimatedEntity, Bounds};
    use crate::camera::Camera;
    use crate::scene::{PointLight, Prop};

    fn assert_well_formed(mesh: &Mesh) {
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
        for vertex in &mesh.vertices {
            let length = Vec3::from_array(vertex.normal).length();
            assert!((length - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_meshes_are_well_formed() {
        for shape in Shape::ALL {
            assert_well_formed(&Mesh::for_shape(shape));
        }
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let mesh = Mesh::cube();
        for triangle in mesh.indices.chunks(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
                .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a);
            let normal = Vec3::from_array(mesh.vertices[triangle[0] as usize].normal);
            assert!(face_normal.dot(normal) > 0.0);
        }
    }

    #[test]
    fn test_instances_follow_scene() {
        let mut scene = Scene::new(Camera::default());
        scene.props.push(Prop::new(Shape::Torus, Vec3::new(4.0, 0.0, 0.0)));
        scene.entity_size = 20.0;
        scene.entities.push(AnimatedEntity {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            opacity: -0.5,
            bounds: Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
        });
        scene.lights.push(PointLight {
            position: Vec3::new(0.0, 3.0, 2.0),
            color: Vec3::X,
            intensity: 1.0,
            range_m: 10.0,
        });

        let mut inputs = ShaderInputs::default();
        inputs.debug_lights = false;
        let batches = collect_instances(&scene, &inputs);
        assert_eq!(batches[Shape::Torus.index()].len(), 1);
        assert_eq!(batches[Shape::Cube.index()].len(), 1);
        assert_eq!(batches[Shape::Cube.index()][0].tint[3], -0.5);
        assert!(batches[Shape::Sphere.index()].is_empty());

        inputs.debug_lights = true;
        let batches = collect_instances(&scene, &inputs);
        assert_eq!(batches[Shape::Sphere.index()].len(), 1);
        assert_eq!(batches[Shape::Sphere.index()][0].flags[0], 1.0);

        let capacity = instance_capacity(&scene);
        for shape in Shape::ALL {
            assert!(batches[shape.index()].len() <= capacity[shape.index()]);
        }
    }
}
