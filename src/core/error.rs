//! Error types for voxel terrain editing

use thiserror::Error;

use glam::Vec3;

use crate::voxel::chunk::ChunkCoord;

/// Main error type for the crate
///
/// Every variant is recoverable: the failing operation returns early and the
/// world and its other chunks stay usable.
#[derive(Debug, Error)]
pub enum Error {
    /// A required factory, builder or resource was never configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A voxel coordinate outside `[0, size)` on some axis.
    #[error("voxel ({x}, {y}, {z}) is out of bounds for a field of size {size}")]
    OutOfBounds { x: i64, y: i64, z: i64, size: usize },

    /// A linear voxel index outside `[0, size³)`.
    #[error("voxel index {index} is out of range for a field of {len} voxels")]
    IndexOutOfRange { index: usize, len: usize },

    /// An operation needed externally supplied context that is not attached yet.
    #[error("missing owner: {0}")]
    MissingOwner(String),

    /// The chunk factory could not produce a chunk for this coordinate.
    #[error("failed to spawn chunk {coord:?}: {reason}")]
    Spawn { coord: ChunkCoord, reason: String },

    /// A world position that no chunk coordinate can hold (non-finite or past `i32`).
    #[error("world position {position:?} is outside the chunk grid")]
    PositionOutOfRange { position: Vec3 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
