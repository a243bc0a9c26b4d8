//! Material to vertex color lookup

use glam::Vec4;

use crate::voxel::voxel::MaterialId;

/// RGBA colors indexed by material id
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialPalette {
    colors: Vec<Vec4>,
    fallback: Vec4,
}

impl MaterialPalette {
    pub fn new(colors: Vec<Vec4>) -> Self {
        Self {
            colors,
            fallback: Vec4::new(1.0, 0.0, 1.0, 1.0),
        }
    }

    /// Build from 8-bit RGB triples
    pub fn from_rgb8(colors: &[(u8, u8, u8)]) -> Self {
        Self::new(
            colors
                .iter()
                .map(|&(r, g, b)| {
                    Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
                })
                .collect(),
        )
    }

    /// Color for a material; unknown ids get the fallback (magenta)
    pub fn color(&self, material: MaterialId) -> Vec4 {
        self.colors.get(material as usize).copied().unwrap_or(self.fallback)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for MaterialPalette {
    fn default() -> Self {
        Self::from_rgb8(&[
            (128, 128, 128), // 0: stone
            (112, 84, 62),   // 1: dirt
            (86, 140, 58),   // 2: grass
            (214, 196, 146), // 3: sand
            (240, 240, 245), // 4: snow
            (64, 64, 72),    // 5: basalt
        ])
    }
}
