//! Brush value applied to a voxel field

use glam::Vec3;
use crate::math::Aabb;
use super::shape::{Axis, BrushShape, Falloff};

/// A single edit: shape, strength and location.
///
/// The location's frame (world voxel units or chunk-local voxel units)
/// depends on who holds the brush. Moving between frames builds a new value
/// with [`Brush::with_location`]; a brush is never mutated while applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    /// The shape, centered on `location`
    pub shape: BrushShape,
    /// Density added at full weight. Negative strength carves.
    pub strength: f32,
    /// Center of the shape
    pub location: Vec3,
    /// Weight profile from surface to core
    pub falloff: Falloff,
}

impl Brush {
    /// Create a brush with linear falloff
    pub fn new(shape: BrushShape, strength: f32, location: Vec3) -> Self {
        Self {
            shape,
            strength,
            location,
            falloff: Falloff::Linear,
        }
    }

    /// Create a sphere brush
    pub fn sphere(location: Vec3, radius: f32, strength: f32) -> Self {
        Self::new(BrushShape::Sphere { radius }, strength, location)
    }

    /// Create an axis-aligned box brush
    pub fn box_brush(location: Vec3, half_extents: Vec3, strength: f32) -> Self {
        Self::new(BrushShape::Box { half_extents }, strength, location)
    }

    /// Create a capsule brush
    pub fn capsule(location: Vec3, axis: Axis, half_height: f32, radius: f32, strength: f32) -> Self {
        Self::new(BrushShape::Capsule { radius, half_height, axis }, strength, location)
    }

    /// Create a cylinder brush
    pub fn cylinder(location: Vec3, axis: Axis, half_height: f32, radius: f32, strength: f32) -> Self {
        Self::new(BrushShape::Cylinder { radius, half_height, axis }, strength, location)
    }

    /// Set falloff (builder pattern)
    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }

    /// Same shape, strength and falloff at another location
    pub fn with_location(&self, location: Vec3) -> Self {
        Self { location, ..*self }
    }

    /// Radius used for boundary crossing tests; zero for shapes without one
    pub fn reach(&self) -> f32 {
        self.shape.radius().unwrap_or(0.0).max(0.0)
    }

    /// Weight in `[0, 1]` at a point in the brush's frame
    pub fn influence_at(&self, point: Vec3) -> f32 {
        self.shape.influence(point - self.location, self.falloff)
    }

    /// Check if a point in the brush's frame is inside the brush
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.shape.contains_point(point - self.location)
    }

    /// Bounds in the brush's frame
    pub fn bounds(&self) -> Aabb {
        self.shape.local_bounds().translated(self.location)
    }
}
