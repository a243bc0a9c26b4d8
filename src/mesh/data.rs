//! Mesh output of a builder

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Interleaved vertex layout for sinks that upload to GPU buffers (40 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// Triangle mesh with per-vertex normal and color
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Vec4>,
    /// Indices into the vertex arrays, three per triangle
    pub triangles: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.colors.clear();
        self.triangles.clear();
    }

    /// Append one vertex with its attributes, returning its index
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, color: Vec4) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.colors.push(color);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.extend_from_slice(&[a, b, c]);
    }

    /// Check the lock-step and index invariants
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertices.len();
        self.normals.len() == n
            && self.colors.len() == n
            && self.triangles.len() % 3 == 0
            && self.triangles.iter().all(|&i| (i as usize) < n)
    }

    /// Interleave attributes into a GPU-friendly vertex array
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.colors)
            .map(|((p, n), c)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                color: c.to_array(),
            })
            .collect()
    }

    /// Raw bytes of the interleaved vertex array
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }
}
