//! Voxel sample type

/// Material identifier carried by a voxel (index into a color palette)
pub type MaterialId = u8;

/// Single density sample.
///
/// Positive density is solid, negative is air; the surface is the zero
/// crossing between neighboring samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voxel {
    /// Signed density
    pub density: f32,
    /// Surface material contributed near the zero crossing
    pub material: MaterialId,
}

impl Voxel {
    /// Cleared voxel: solid, no material
    pub const SOLID: Voxel = Voxel {
        density: 1.0,
        material: 0,
    };

    /// Fully empty voxel
    pub const AIR: Voxel = Voxel {
        density: -1.0,
        material: 0,
    };

    /// Create voxel from density and material
    pub fn new(density: f32, material: MaterialId) -> Self {
        Self { density, material }
    }

    /// Check if voxel is on the solid side of the surface
    pub fn is_solid(&self) -> bool {
        self.density > 0.0
    }
}

impl Default for Voxel {
    fn default() -> Self {
        Self::SOLID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_solid_without_material() {
        let voxel = Voxel::default();
        assert!(voxel.is_solid());
        assert_eq!(voxel.material, 0);
    }

    #[test]
    fn test_air() {
        assert!(!Voxel::AIR.is_solid());
        // Zero density sits on the surface and counts as air
        assert!(!Voxel::new(0.0, 3).is_solid());
    }
}
