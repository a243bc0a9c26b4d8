//! Voxel data structures and editing

pub mod voxel;
pub mod field;
pub mod brush;
pub mod chunk;
pub mod factory;
pub mod world;
pub mod sculpt;

pub use voxel::{MaterialId, Voxel};
pub use field::VoxelField;
pub use brush::{Axis, Brush, BrushShape, Falloff};
pub use chunk::{Chunk, ChunkCoord, ChunkStats};
pub use factory::{ChunkFactory, DefaultChunkFactory};
pub use world::World;
pub use sculpt::{StrokeOp, StrokeReport};
