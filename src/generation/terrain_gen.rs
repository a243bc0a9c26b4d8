//! Noise-based height field terrain

use glam::Vec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::{height_density, VoxelGenerator};
use crate::voxel::field::VoxelField;
use crate::voxel::voxel::{MaterialId, Voxel};

pub const STONE: MaterialId = 0;
pub const DIRT: MaterialId = 1;
pub const GRASS: MaterialId = 2;
pub const SNOW: MaterialId = 4;

/// Parameters controlling terrain generation (world units)
#[derive(Clone, Debug)]
pub struct TerrainParams {
    pub seed: u32,
    pub scale: f32,        // Horizontal scale (larger = smoother)
    pub base_height: f32,  // Height of the noise midpoint
    pub height_scale: f32, // Peak-to-trough amplitude
    pub octaves: u32,      // FBM octaves (detail levels)
    pub persistence: f32,  // FBM persistence (0.5 typical)
    pub lacunarity: f32,   // FBM lacunarity (2.0 typical)
    pub snow_line: f32,    // Surface above this height is snow
    pub voxel_world_size: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 20000.0,
            base_height: 3200.0,
            height_scale: 2400.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            snow_line: 4800.0,
            voxel_world_size: 100.0,
        }
    }
}

/// Procedural terrain generator using fractal Brownian motion (FBM)
pub struct NoiseTerrainGenerator {
    params: TerrainParams,
    noise: Fbm<Perlin>,
}

impl NoiseTerrainGenerator {
    /// Create a new terrain generator with the given parameters
    pub fn new(params: TerrainParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        Self { params, noise }
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Get terrain height at world position (x, y)
    pub fn height_at(&self, x: f32, y: f32) -> f32 {
        let nx = (x / self.params.scale) as f64;
        let ny = (y / self.params.scale) as f64;

        // Noise is roughly in [-1, 1]
        let n = self.noise.get([nx, ny]) as f32;
        self.params.base_height + n * self.params.height_scale * 0.5
    }

    fn material_for(&self, height: f32, z: f32) -> MaterialId {
        let depth = (height - z) / self.params.voxel_world_size;
        if height > self.params.snow_line && depth < 2.0 {
            SNOW
        } else if depth < 1.0 {
            GRASS
        } else if depth < 4.0 {
            DIRT
        } else {
            STONE
        }
    }
}

impl VoxelGenerator for NoiseTerrainGenerator {
    fn generate(&self, origin: Vec3, size: usize, field: &mut VoxelField) {
        if field.size() != size {
            *field = VoxelField::new(size);
        }
        let step = self.params.voxel_world_size;

        // One height sample per column
        let mut heights = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                heights.push(self.height_at(origin.x + x as f32 * step, origin.y + y as f32 * step));
            }
        }

        let plane = size * size;
        for (index, voxel) in field.voxels_mut().iter_mut().enumerate() {
            let column = index % plane;
            let z = origin.z + (index / plane) as f32 * step;
            let height = heights[column];
            *voxel = Voxel::new(
                height_density(height, z, step),
                self.material_for(height, z),
            );
        }
    }
}
