//! Procedural meshes for the demo primitives.
//!
//! Everything is built on the CPU as [`MeshData`] first (front faces wind
//! counter-clockwise seen from outside, `v` grows downwards) and uploaded
//! with [`MeshData::upload`].

use std::f32::consts::{PI, TAU};

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::model::{Mesh, ModelVertex},
    scene::Primitive,
};

/// Segment count used for the sphere and the cylinder.
pub const DEFAULT_SEGMENTS: u32 = 64;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn upload(&self, device: &wgpu::Device, name: &str) -> Mesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Mesh {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: self.indices.len() as u32,
        }
    }

    fn push_vertex(&mut self, position: Vector3<f32>, tex_coords: [f32; 2], normal: Vector3<f32>) -> u32 {
        self.vertices.push(ModelVertex {
            position: position.into(),
            tex_coords,
            normal: normal.into(),
        });
        (self.vertices.len() - 1) as u32
    }

    /// Quad spanned by `u` and `v` around `center`; faces `u x v`.
    fn push_quad(&mut self, center: Vector3<f32>, u: Vector3<f32>, v: Vector3<f32>, normal: Vector3<f32>) {
        let a = self.push_vertex(center - u - v, [0.0, 1.0], normal);
        let b = self.push_vertex(center + u - v, [1.0, 1.0], normal);
        let c = self.push_vertex(center + u + v, [1.0, 0.0], normal);
        let d = self.push_vertex(center - u + v, [0.0, 0.0], normal);
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
}

/// Axis aligned box centred on the origin, four vertices per face.
pub fn cube(width: f32, height: f32, depth: f32) -> MeshData {
    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    let x = Vector3::unit_x();
    let y = Vector3::unit_y();
    let z = Vector3::unit_z();
    let mut mesh = MeshData::default();
    mesh.push_quad(x * hx, -z * hz, y * hy, x);
    mesh.push_quad(-x * hx, z * hz, y * hy, -x);
    mesh.push_quad(y * hy, x * hx, -z * hz, y);
    mesh.push_quad(-y * hy, x * hx, z * hz, -y);
    mesh.push_quad(z * hz, x * hx, y * hy, z);
    mesh.push_quad(-z * hz, -x * hx, y * hy, -z);
    mesh
}

/// UV sphere with `segments` sectors and `segments / 2` stacks.
pub fn sphere(radius: f32, segments: u32) -> MeshData {
    let sectors = segments.max(3);
    let stacks = (segments / 2).max(2);
    let mut mesh = MeshData::default();
    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let phi = PI * v;
        for sector in 0..=sectors {
            let u = sector as f32 / sectors as f32;
            let theta = TAU * u;
            let normal = Vector3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push_vertex(normal * radius, [u, v], normal);
        }
    }
    let ring = sectors + 1;
    for stack in 0..stacks {
        for sector in 0..sectors {
            let a = stack * ring + sector;
            let b = a + ring;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Capped cylinder along +Y, centred on the origin.
pub fn cylinder(height: f32, radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height / 2.0;
    let mut mesh = MeshData::default();

    // side: a top and a bottom vertex per seam position
    let side_start = mesh.vertices.len() as u32;
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let theta = TAU * u;
        let normal = Vector3::new(theta.cos(), 0.0, theta.sin());
        let rim = normal * radius;
        mesh.push_vertex(rim + Vector3::new(0.0, half, 0.0), [u, 0.0], normal);
        mesh.push_vertex(rim - Vector3::new(0.0, half, 0.0), [u, 1.0], normal);
    }
    for i in 0..segments {
        let top = side_start + i * 2;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;
        mesh.indices
            .extend_from_slice(&[top, next_top, bottom, next_top, next_bottom, bottom]);
    }

    for (y, normal) in [(half, Vector3::unit_y()), (-half, -Vector3::unit_y())] {
        let center = mesh.push_vertex(Vector3::new(0.0, y, 0.0), [0.5, 0.5], normal);
        let rim_start = mesh.vertices.len() as u32;
        for i in 0..=segments {
            let theta = TAU * (i as f32 / segments as f32);
            let (s, c) = theta.sin_cos();
            mesh.push_vertex(
                Vector3::new(c * radius, y, s * radius),
                [0.5 + c * 0.5, 0.5 + s * 0.5],
                normal,
            );
        }
        for i in 0..segments {
            let (p, q) = (rim_start + i, rim_start + i + 1);
            if normal.y > 0.0 {
                mesh.indices.extend_from_slice(&[center, q, p]);
            } else {
                mesh.indices.extend_from_slice(&[center, p, q]);
            }
        }
    }
    mesh
}

/// Flat quad in the XZ plane facing +Y.
pub fn plane(width: f32, depth: f32) -> MeshData {
    let mut mesh = MeshData::default();
    mesh.push_quad(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::unit_x() * (width / 2.0),
        -Vector3::unit_z() * (depth / 2.0),
        Vector3::unit_y(),
    );
    mesh
}

/// GPU meshes of every [`Primitive`], built with the demo's dimensions.
#[derive(Debug)]
pub struct Meshes {
    cube: Mesh,
    sphere: Mesh,
    cylinder: Mesh,
    plane: Mesh,
}

impl Meshes {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            cube: cube(1.0, 1.0, 1.0).upload(device, Primitive::Cube.name()),
            sphere: sphere(0.5, DEFAULT_SEGMENTS).upload(device, Primitive::Sphere.name()),
            cylinder: cylinder(1.0, 0.5, DEFAULT_SEGMENTS).upload(device, Primitive::Cylinder.name()),
            plane: plane(1.0, 1.0).upload(device, Primitive::Plane.name()),
        }
    }

    pub fn get(&self, primitive: Primitive) -> &Mesh {
        match primitive {
            Primitive::Cube => &self.cube,
            Primitive::Sphere => &self.sphere,
            Primitive::Cylinder => &self.cylinder,
            Primitive::Plane => &self.plane,
        }
    }
}
