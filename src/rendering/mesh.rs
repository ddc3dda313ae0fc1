//! Static meshes for the preview: the backdrop plane and the cube.

use bytemuck::{Pod, Zeroable};

/// Vertex data (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    /// Plane in XY facing +Z, centred on the origin
    ///
    /// UV (0, 0) is the top-left corner so textures stored top row first
    /// appear upright without flipping.
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let normal = [0.0, 0.0, 1.0];
        let vertices = vec![
            Vertex {
                position: [-hw, hh, 0.0],
                normal,
                uv: [0.0, 0.0],
            },
            Vertex {
                position: [-hw, -hh, 0.0],
                normal,
                uv: [0.0, 1.0],
            },
            Vertex {
                position: [hw, -hh, 0.0],
                normal,
                uv: [1.0, 1.0],
            },
            Vertex {
                position: [hw, hh, 0.0],
                normal,
                uv: [1.0, 0.0],
            },
        ];
        Self {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Axis-aligned cube with flat per-face normals
    pub fn cube(half_extent: f32) -> Self {
        // (normal, tangent u, tangent v) per face
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in FACES {
            let first = vertices.len() as u16;
            for (su, sv) in [(-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (1.0, 1.0)] {
                let position = [
                    (normal[0] + u[0] * su + v[0] * sv) * half_extent,
                    (normal[1] + u[1] * su + v[1] * sv) * half_extent,
                    (normal[2] + u[2] * su + v[2] * sv) * half_extent,
                ];
                vertices.push(Vertex {
                    position,
                    normal,
                    uv: [(su + 1.0) * 0.5, (1.0 - sv) * 0.5],
                });
            }
            indices.extend_from_slice(&[first, first + 1, first + 2, first, first + 2, first + 3]);
        }

        Self { vertices, indices }
    }
}
