//! Procedural population of chunk fields
//!
//! Generators are external to the editing core: a chunk hands its field and
//! world origin to a [`VoxelGenerator`] and trusts it to fill every sample.
//! Heights run along +Z.

pub mod terrain_gen;

pub use terrain_gen::{NoiseTerrainGenerator, TerrainParams};

use glam::Vec3;

use crate::voxel::field::VoxelField;
use crate::voxel::voxel::{MaterialId, Voxel};

/// Fills a chunk's field from a procedural source.
///
/// `origin` is the chunk's world-space minimum corner and `size` the samples
/// per side. Implementations must write all `size³` voxels.
pub trait VoxelGenerator: Send + Sync {
    fn generate(&self, origin: Vec3, size: usize, field: &mut VoxelField);
}

/// Density of a sample at `z` below/above a surface at `height`, in voxel
/// units and clamped to `[-1, 1]` so brushes of unit strength flip it.
pub fn height_density(height: f32, z: f32, voxel_world_size: f32) -> f32 {
    ((height - z) / voxel_world_size).clamp(-1.0, 1.0)
}

/// Flat ground plane at a fixed height
#[derive(Clone, Debug)]
pub struct FlatGenerator {
    /// Ground height in world units
    pub ground_height: f32,
    /// World units per voxel
    pub voxel_world_size: f32,
    /// Material of the ground
    pub material: MaterialId,
}

impl FlatGenerator {
    pub fn new(ground_height: f32, voxel_world_size: f32, material: MaterialId) -> Self {
        Self { ground_height, voxel_world_size, material }
    }
}

impl VoxelGenerator for FlatGenerator {
    fn generate(&self, origin: Vec3, size: usize, field: &mut VoxelField) {
        if field.size() != size {
            *field = VoxelField::new(size);
        }
        let plane = size * size;
        for (index, voxel) in field.voxels_mut().iter_mut().enumerate() {
            let z = origin.z + (index / plane) as f32 * self.voxel_world_size;
            *voxel = Voxel::new(
                height_density(self.ground_height, z, self.voxel_world_size),
                self.material,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_density_sign() {
        assert_eq!(height_density(100.0, 0.0, 100.0), 1.0);
        assert_eq!(height_density(100.0, 150.0, 100.0), -0.5);
        assert_eq!(height_density(0.0, 1000.0, 100.0), -1.0);
    }

    #[test]
    fn test_flat_generator_fills_every_voxel() {
        let generator = FlatGenerator::new(250.0, 100.0, 3);
        let mut field = VoxelField::new(5);
        generator.generate(Vec3::ZERO, 5, &mut field);

        for z in 0..5 {
            let v = field.get(2, 2, z).unwrap();
            assert_eq!(v.material, 3);
            assert_eq!(v.is_solid(), z <= 2, "sample z={z}");
        }
        assert!(field.voxels().iter().all(|v| v.material == 3));
    }

    #[test]
    fn test_flat_generator_respects_origin() {
        let generator = FlatGenerator::new(0.0, 100.0, 1);
        let mut field = VoxelField::new(4);
        generator.generate(Vec3::new(0.0, 0.0, -1000.0), 4, &mut field);
        assert!(field.voxels().iter().all(|v| v.is_solid()));
    }

    #[test]
    fn test_flat_generator_resizes_mismatched_field() {
        let generator = FlatGenerator::new(0.0, 1.0, 1);
        let mut field = VoxelField::new(2);
        generator.generate(Vec3::ZERO, 3, &mut field);
        assert_eq!(field.size(), 3);
    }
}
