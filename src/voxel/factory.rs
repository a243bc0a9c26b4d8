//! Construction of chunks for coordinates the world has not seen yet

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use glam::Vec3;

use crate::core::config::WorldConfig;
use crate::core::types::Result;
use crate::mesh::{MeshBuffer, SharedMeshBuffer};
use super::chunk::{Chunk, ChunkCoord};

/// Creates chunks on demand.
///
/// `origin` is the chunk's world-space minimum corner. The returned chunk is
/// cleared by the world before it is registered.
pub trait ChunkFactory: Send + Sync {
    fn spawn(&self, coord: ChunkCoord, origin: Vec3) -> Result<Chunk>;

    /// Called when the world evicts the chunk at `coord`
    fn release(&self, _coord: ChunkCoord) {}
}

/// Cubic chunks of a fixed size, each with its own in-memory mesh buffer.
///
/// Buffers are kept until the chunk is released so callers can read back
/// the mesh a chunk produced.
#[derive(Debug)]
pub struct DefaultChunkFactory {
    chunk_size: usize,
    voxel_world_size: f32,
    buffers: Mutex<HashMap<ChunkCoord, SharedMeshBuffer>>,
}

impl DefaultChunkFactory {
    pub fn new(chunk_size: usize, voxel_world_size: f32) -> Self {
        Self {
            chunk_size,
            voxel_world_size,
            buffers: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.chunk_size, config.voxel_world_size)
    }

    /// Mesh buffer of a chunk spawned at `coord`
    pub fn buffer(&self, coord: ChunkCoord) -> Option<SharedMeshBuffer> {
        let buffers = self.buffers.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        buffers.get(&coord).cloned()
    }

    /// Number of live chunk buffers
    pub fn buffer_count(&self) -> usize {
        self.buffers.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }
}

impl ChunkFactory for DefaultChunkFactory {
    fn spawn(&self, coord: ChunkCoord, origin: Vec3) -> Result<Chunk> {
        let buffer: SharedMeshBuffer = Arc::new(Mutex::new(MeshBuffer::new()));
        self.buffers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(coord, buffer.clone());

        Ok(Chunk::new(coord, self.chunk_size, origin, self.voxel_world_size)
            .with_sink(Box::new(buffer)))
    }

    fn release(&self, coord: ChunkCoord) {
        self.buffers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&coord);
    }
}

/// Shares one factory between a world and the code inspecting its buffers
impl<F: ChunkFactory + ?Sized> ChunkFactory for Arc<F> {
    fn spawn(&self, coord: ChunkCoord, origin: Vec3) -> Result<Chunk> {
        (**self).spawn(coord, origin)
    }

    fn release(&self, coord: ChunkCoord) {
        (**self).release(coord)
    }
}
