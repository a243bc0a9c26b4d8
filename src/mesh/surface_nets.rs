//! Naive surface nets mesher
//!
//! One vertex per cell whose corners straddle the surface, placed at the mean
//! of the edge crossings; one quad per sign-changing grid edge shared by four
//! such cells. Edges on the outer faces of the field have fewer than four
//! cells and produce no quad.

use glam::{Vec3, Vec4};

use super::data::MeshData;
use super::palette::MaterialPalette;
use super::MeshBuilder;
use crate::voxel::field::VoxelField;

/// Corner offsets of a cell, bit 0 = x, bit 1 = y, bit 2 = z
const CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0],
    [0, 0, 1], [1, 0, 1], [0, 1, 1], [1, 1, 1],
];

/// Cell edges as pairs of corner indices
const EDGES: [(usize, usize); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7), // along x
    (0, 2), (1, 3), (4, 6), (5, 7), // along y
    (0, 4), (1, 5), (2, 6), (3, 7), // along z
];

const NO_VERTEX: u32 = u32::MAX;

/// Reference [`MeshBuilder`] producing a smooth surface at the zero crossing
#[derive(Clone, Debug)]
pub struct SurfaceNetsBuilder {
    palette: MaterialPalette,
    /// World units per voxel applied to output positions
    scale: f32,
}

impl SurfaceNetsBuilder {
    pub fn new(palette: MaterialPalette, scale: f32) -> Self {
        Self { palette, scale }
    }

    /// Builder with the default palette emitting positions in voxel units
    pub fn unscaled() -> Self {
        Self::new(MaterialPalette::default(), 1.0)
    }

    /// Emit the vertex for one cell, or `None` if the surface misses it
    fn cell_vertex(&self, field: &VoxelField, x: usize, y: usize, z: usize) -> Option<(Vec3, Vec3, Vec4)> {
        let mut d = [0.0f32; 8];
        let mut solid_mask = 0u8;
        for (i, c) in CORNERS.iter().enumerate() {
            d[i] = field.density_at(x + c[0], y + c[1], z + c[2]);
            if d[i] > 0.0 {
                solid_mask |= 1 << i;
            }
        }
        if solid_mask == 0 || solid_mask == 0xFF {
            return None;
        }

        let mut sum = Vec3::ZERO;
        let mut crossings = 0;
        for &(a, b) in EDGES.iter() {
            let a_solid = d[a] > 0.0;
            let b_solid = d[b] > 0.0;
            if a_solid == b_solid {
                continue;
            }
            let t = d[a] / (d[a] - d[b]);
            let pa = corner_vec(a);
            let pb = corner_vec(b);
            sum += pa + (pb - pa) * t;
            crossings += 1;
        }
        let local = sum / crossings as f32;

        // Density grows into the solid, so the outward normal is the negated gradient
        let gradient = Vec3::new(
            (d[1] - d[0]) + (d[3] - d[2]) + (d[5] - d[4]) + (d[7] - d[6]),
            (d[2] - d[0]) + (d[3] - d[1]) + (d[6] - d[4]) + (d[7] - d[5]),
            (d[4] - d[0]) + (d[5] - d[1]) + (d[6] - d[2]) + (d[7] - d[3]),
        );
        let normal = (-gradient).try_normalize().unwrap_or(Vec3::Y);

        // Material of the most solid corner
        let mut best = 0;
        for i in 1..8 {
            if d[i] > d[best] {
                best = i;
            }
        }
        let c = CORNERS[best];
        let material = field.material_at(x + c[0], y + c[1], z + c[2]);

        let position = (Vec3::new(x as f32, y as f32, z as f32) + local) * self.scale;
        Some((position, normal, self.palette.color(material)))
    }
}

impl Default for SurfaceNetsBuilder {
    fn default() -> Self {
        Self::unscaled()
    }
}

fn corner_vec(index: usize) -> Vec3 {
    let c = CORNERS[index];
    Vec3::new(c[0] as f32, c[1] as f32, c[2] as f32)
}

impl MeshBuilder for SurfaceNetsBuilder {
    fn build(&self, field: &VoxelField, resolution: usize) -> MeshData {
        let mut mesh = MeshData::new();
        if field.size() < 2 {
            return mesh;
        }
        let cells = resolution.min(field.size() - 1);
        if cells == 0 {
            return mesh;
        }

        let cell_index = |x: usize, y: usize, z: usize| (z * cells + y) * cells + x;
        let mut vertex_of_cell = vec![NO_VERTEX; cells * cells * cells];

        for z in 0..cells {
            for y in 0..cells {
                for x in 0..cells {
                    if let Some((p, n, c)) = self.cell_vertex(field, x, y, z) {
                        vertex_of_cell[cell_index(x, y, z)] = mesh.push_vertex(p, n, c);
                    }
                }
            }
        }

        // Each grid edge from sample p along axis a is shared by the cells
        // p, p - b, p - c, p - b - c where (a, b, c) is cyclic.
        for z in 0..=cells {
            for y in 0..=cells {
                for x in 0..=cells {
                    let p = [x, y, z];
                    let d0 = field.density_at(x, y, z);
                    for axis in 0..3 {
                        let b = (axis + 1) % 3;
                        let c = (axis + 2) % 3;
                        if p[axis] >= cells || p[b] == 0 || p[c] == 0 || p[b] >= cells || p[c] >= cells {
                            continue;
                        }
                        let mut q = p;
                        q[axis] += 1;
                        let d1 = field.density_at(q[0], q[1], q[2]);
                        let solid0 = d0 > 0.0;
                        if solid0 == (d1 > 0.0) {
                            continue;
                        }

                        let cell_at = |db: usize, dc: usize| {
                            let mut k = p;
                            k[b] -= db;
                            k[c] -= dc;
                            vertex_of_cell[cell_index(k[0], k[1], k[2])]
                        };
                        let quad = [cell_at(1, 1), cell_at(0, 1), cell_at(0, 0), cell_at(1, 0)];
                        if quad.contains(&NO_VERTEX) {
                            continue;
                        }

                        // Counter-clockwise around +axis when solid lies behind the surface
                        if solid0 {
                            mesh.push_triangle(quad[0], quad[1], quad[2]);
                            mesh.push_triangle(quad[0], quad[2], quad[3]);
                        } else {
                            mesh.push_triangle(quad[0], quad[2], quad[1]);
                            mesh.push_triangle(quad[0], quad[3], quad[2]);
                        }
                    }
                }
            }
        }

        mesh
    }
}
