//! Primitive mesh geometry.
//!
//! The scene is built exclusively from six primitive shapes. Each one is
//! generated once on the CPU as a [`MeshData`] and uploaded by a
//! [`MeshProvider`](crate::resources::MeshProvider). Conventions, all in
//! object space before the model matrix is applied:
//!
//! - `Plane`: 2×2 square on the XZ plane centred at the origin, normal +Y
//! - `Box`: unit cube spanning -0.5..0.5 on every axis
//! - `Cylinder`: radius 1, base at y = 0, top at y = 1, capped
//! - `Cone`: radius 1, base at y = 0, apex at y = 1, capped
//! - `Sphere`: radius 1 centred at the origin
//! - `Pyramid4`: square base spanning -0.5..0.5 at y = -0.5, apex at y = 0.5
//!
//! Texture coordinates follow the bottom-up convention of the vertically
//! flipped images produced by the texture loader: v = 0 is the bottom edge.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};

/// A vertex as it is laid out in the vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl ShapeVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// The primitive shapes a draw step can reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    Plane,
    Sphere,
    Cone,
    Box,
    Cylinder,
    Pyramid4,
}

impl MeshKind {
    /// Every kind, in the order the party scene uploads them.
    pub const ALL: [MeshKind; 6] = [
        MeshKind::Plane,
        MeshKind::Sphere,
        MeshKind::Cone,
        MeshKind::Box,
        MeshKind::Cylinder,
        MeshKind::Pyramid4,
    ];

    /// Generate the geometry for this kind.
    pub fn geometry(self) -> MeshData {
        match self {
            MeshKind::Plane => MeshData::plane(),
            MeshKind::Sphere => MeshData::sphere(SPHERE_SEGMENTS, SPHERE_RINGS),
            MeshKind::Cone => MeshData::cone(ROUND_SEGMENTS),
            MeshKind::Box => MeshData::cube(),
            MeshKind::Cylinder => MeshData::cylinder(ROUND_SEGMENTS),
            MeshKind::Pyramid4 => MeshData::pyramid4(),
        }
    }
}

const ROUND_SEGMENTS: u32 = 36;
const SPHERE_SEGMENTS: u32 = 36;
const SPHERE_RINGS: u32 = 18;

/// CPU-side triangle list, counter-clockwise when seen from outside.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ShapeVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn plane() -> Self {
        let mut mesh = Self::default();
        let up = [0.0, 1.0, 0.0];
        mesh.quad(
            [
                [-1.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [1.0, 0.0, -1.0],
                [-1.0, 0.0, -1.0],
            ],
            up,
        );
        mesh
    }

    pub fn cube() -> Self {
        let mut mesh = Self::default();
        // (normal, u axis, v axis) with u × v == normal
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        for (normal, u, v) in faces {
            let n = Vector3::from(normal) * 0.5;
            let u = Vector3::from(u) * 0.5;
            let v = Vector3::from(v) * 0.5;
            mesh.quad(
                [
                    (n - u - v).into(),
                    (n + u - v).into(),
                    (n + u + v).into(),
                    (n - u + v).into(),
                ],
                normal,
            );
        }
        mesh
    }

    pub fn sphere(segments: u32, rings: u32) -> Self {
        let mut mesh = Self::default();

        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            let y = phi.cos();
            let ring_radius = phi.sin();

            for seg in 0..=segments {
                let theta = 2.0 * PI * seg as f32 / segments as f32;
                let x = ring_radius * theta.cos();
                let z = ring_radius * theta.sin();
                mesh.vertices.push(ShapeVertex::new(
                    [x, y, z],
                    [x, y, z],
                    [
                        seg as f32 / segments as f32,
                        1.0 - ring as f32 / rings as f32,
                    ],
                ));
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let current = ring * (segments + 1) + seg;
                let next = current + segments + 1;
                mesh.indices
                    .extend_from_slice(&[current, current + 1, next, current + 1, next + 1, next]);
            }
        }
        mesh
    }

    pub fn cylinder(segments: u32) -> Self {
        let mut mesh = Self::default();

        let side = mesh.base_index();
        for seg in 0..=segments {
            let (c, s, u) = ring_point(seg, segments);
            mesh.vertices
                .push(ShapeVertex::new([c, 0.0, s], [c, 0.0, s], [u, 0.0]));
            mesh.vertices
                .push(ShapeVertex::new([c, 1.0, s], [c, 0.0, s], [u, 1.0]));
        }
        for seg in 0..segments {
            let b0 = side + seg * 2;
            let t0 = b0 + 1;
            let b1 = b0 + 2;
            let t1 = b0 + 3;
            mesh.indices.extend_from_slice(&[b0, t0, b1, b1, t0, t1]);
        }

        mesh.cap(segments, 1.0, true);
        mesh.cap(segments, 0.0, false);
        mesh
    }

    pub fn cone(segments: u32) -> Self {
        let mut mesh = Self::default();
        let slope = std::f32::consts::FRAC_1_SQRT_2;

        for seg in 0..segments {
            let (c0, s0, u0) = ring_point(seg, segments);
            let (c1, s1, u1) = ring_point(seg + 1, segments);
            let (cm, sm, um) = ring_point_at(seg as f32 + 0.5, segments);
            let base = mesh.base_index();
            mesh.vertices.extend_from_slice(&[
                ShapeVertex::new([c0, 0.0, s0], [c0 * slope, slope, s0 * slope], [u0, 0.0]),
                ShapeVertex::new([0.0, 1.0, 0.0], [cm * slope, slope, sm * slope], [um, 1.0]),
                ShapeVertex::new([c1, 0.0, s1], [c1 * slope, slope, s1 * slope], [u1, 0.0]),
            ]);
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        mesh.cap(segments, 0.0, false);
        mesh
    }

    pub fn pyramid4() -> Self {
        let mut mesh = Self::default();
        let apex = Vector3::new(0.0, 0.5, 0.0);
        let corners = [
            Vector3::new(-0.5, -0.5, 0.5),
            Vector3::new(0.5, -0.5, 0.5),
            Vector3::new(0.5, -0.5, -0.5),
            Vector3::new(-0.5, -0.5, -0.5),
        ];

        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            mesh.triangle([a, b, apex], [[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]]);
        }

        let down = [0.0, -1.0, 0.0];
        mesh.quad(
            [
                corners[0].into(),
                corners[3].into(),
                corners[2].into(),
                corners[1].into(),
            ],
            down,
        );
        mesh
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn base_index(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Append a quad given counter-clockwise corners starting bottom-left.
    fn quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3]) {
        let base = self.base_index();
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        for (corner, uv) in corners.into_iter().zip(uvs) {
            self.vertices.push(ShapeVertex::new(corner, normal, uv));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Append a flat-shaded triangle.
    fn triangle(&mut self, corners: [Vector3<f32>; 3], uvs: [[f32; 2]; 3]) {
        let normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize();
        let base = self.base_index();
        for (corner, uv) in corners.into_iter().zip(uvs) {
            self.vertices
                .push(ShapeVertex::new(corner.into(), normal.into(), uv));
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Append a disc of radius 1 at height `y`, facing up or down.
    fn cap(&mut self, segments: u32, y: f32, facing_up: bool) {
        let normal = if facing_up {
            [0.0, 1.0, 0.0]
        } else {
            [0.0, -1.0, 0.0]
        };
        let center = self.base_index();
        self.vertices
            .push(ShapeVertex::new([0.0, y, 0.0], normal, [0.5, 0.5]));
        for seg in 0..=segments {
            let (c, s, _) = ring_point(seg, segments);
            self.vertices.push(ShapeVertex::new(
                [c, y, s],
                normal,
                [0.5 + 0.5 * c, 0.5 + 0.5 * s],
            ));
        }
        for seg in 0..segments {
            let a = center + 1 + seg;
            let b = a + 1;
            if facing_up {
                self.indices.extend_from_slice(&[center, b, a]);
            } else {
                self.indices.extend_from_slice(&[center, a, b]);
            }
        }
    }
}

fn ring_point(seg: u32, segments: u32) -> (f32, f32, f32) {
    ring_point_at(seg as f32, segments)
}

fn ring_point_at(seg: f32, segments: u32) -> (f32, f32, f32) {
    let u = seg / segments as f32;
    let theta = 2.0 * PI * u;
    (theta.cos(), theta.sin(), u)
}
