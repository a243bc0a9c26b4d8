//! Dense cubic voxel storage owned by a chunk

use crate::core::error::Error;
use crate::core::types::Result;
use super::voxel::Voxel;

/// Dense `size³` array of voxels in `z*size*size + y*size + x` order.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelField {
    size: usize,
    voxels: Vec<Voxel>,
}

impl VoxelField {
    /// Create a field of `size³` cleared voxels
    pub fn new(size: usize) -> Self {
        Self {
            size,
            voxels: vec![Voxel::SOLID; size * size * size],
        }
    }

    /// Samples per side
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of voxels (`size³`)
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Reset every voxel to solid with no material
    pub fn clear(&mut self) {
        self.voxels.fill(Voxel::SOLID);
    }

    /// Fill every voxel with the same value
    pub fn fill(&mut self, voxel: Voxel) {
        self.voxels.fill(voxel);
    }

    /// Linear index of a voxel coordinate.
    pub fn index(&self, x: i64, y: i64, z: i64) -> Result<usize> {
        let size = self.size as i64;
        if x < 0 || y < 0 || z < 0 || x >= size || y >= size || z >= size {
            return Err(Error::OutOfBounds { x, y, z, size: self.size });
        }
        Ok((z * size * size + y * size + x) as usize)
    }

    /// Voxel coordinate of a linear index.
    pub fn coords(&self, index: usize) -> Result<[usize; 3]> {
        self.check_index(index)?;
        let plane = self.size * self.size;
        Ok([index % self.size, (index / self.size) % self.size, index / plane])
    }

    pub fn get(&self, x: i64, y: i64, z: i64) -> Result<Voxel> {
        let index = self.index(x, y, z)?;
        Ok(self.voxels[index])
    }

    pub fn set(&mut self, x: i64, y: i64, z: i64, voxel: Voxel) -> Result<()> {
        let index = self.index(x, y, z)?;
        self.voxels[index] = voxel;
        Ok(())
    }

    /// Mutable access to a voxel by linear index
    pub fn get_mut_by_index(&mut self, index: usize) -> Result<&mut Voxel> {
        self.check_index(index)?;
        Ok(&mut self.voxels[index])
    }

    /// Density at a coordinate that is known to be in range.
    ///
    /// Meshers read the whole grid, so they skip the `Result` plumbing.
    #[inline]
    pub fn density_at(&self, x: usize, y: usize, z: usize) -> f32 {
        self.voxels[(z * self.size + y) * self.size + x].density
    }

    /// Material at a coordinate that is known to be in range.
    #[inline]
    pub fn material_at(&self, x: usize, y: usize, z: usize) -> u8 {
        self.voxels[(z * self.size + y) * self.size + x].material
    }

    /// Read-only view of all voxels in linear order
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Mutable view of all voxels in linear order, for generators
    pub fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.voxels.len() {
            return Err(Error::IndexOutOfRange { index, len: self.voxels.len() });
        }
        Ok(())
    }
}
