//! Brush system for sculpting and painting voxel fields
//!
//! A brush is a shape, a strength and a location. Strokes that cross chunk
//! boundaries are split into one brush per chunk by the world.

pub mod shape;
pub mod brush;

// Re-exports
pub use shape::{Axis, BrushShape, Falloff};
pub use brush::Brush;
