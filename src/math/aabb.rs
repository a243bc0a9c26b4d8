//! Axis-aligned bounding box

use crate::core::types::Vec3;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create AABB from center and half-extents
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Translate by an offset
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Inclusive integer sample range `[lo, hi]` per axis covered by this box,
    /// clamped to a grid of `size` samples. `None` when the box misses the grid.
    pub fn sample_range(&self, size: usize) -> Option<([usize; 3], [usize; 3])> {
        if size == 0 {
            return None;
        }
        let last = (size - 1) as f32;
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        for axis in 0..3 {
            let min = self.min[axis].ceil();
            let max = self.max[axis].floor();
            if max < 0.0 || min > last || min > max {
                return None;
            }
            lo[axis] = min.max(0.0) as usize;
            hi[axis] = max.min(last) as usize;
        }
        Some((lo, hi))
    }
}
