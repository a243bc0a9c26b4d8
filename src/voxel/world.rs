//! World container managing the sparse chunk registry

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use glam::Vec3;
use rayon::prelude::*;

use crate::core::config::WorldConfig;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::generation::VoxelGenerator;
use crate::mesh::{MaterialPalette, MeshBuilder, SurfaceNetsBuilder};
use super::chunk::{Chunk, ChunkCoord, ChunkStats};
use super::factory::{ChunkFactory, DefaultChunkFactory};

/// Sparse map of chunks, created lazily through a [`ChunkFactory`].
///
/// An absent coordinate means the chunk has not been generated yet. There is
/// at most one chunk per coordinate.
pub struct World {
    config: WorldConfig,
    /// Map from chunk coordinates to loaded chunks
    chunks: HashMap<ChunkCoord, Chunk>,
    factory: Option<Box<dyn ChunkFactory>>,
    mesh_builder: Box<dyn MeshBuilder>,
}

impl World {
    /// World with a [`DefaultChunkFactory`] and a surface nets mesher scaled
    /// to world units
    pub fn new(config: WorldConfig) -> Self {
        let factory = DefaultChunkFactory::from_config(&config);
        Self::with_factory(config, Box::new(factory))
    }

    /// World spawning chunks through `factory`
    pub fn with_factory(config: WorldConfig, factory: Box<dyn ChunkFactory>) -> Self {
        let mut world = Self::without_factory(config);
        world.factory = Some(factory);
        world
    }

    /// World that cannot create chunks until a factory is set
    pub fn without_factory(config: WorldConfig) -> Self {
        let builder = SurfaceNetsBuilder::new(MaterialPalette::default(), config.voxel_world_size);
        Self {
            config,
            chunks: HashMap::new(),
            factory: None,
            mesh_builder: Box::new(builder),
        }
    }

    /// World plus a handle on its default factory's mesh buffers
    pub fn with_default_buffers(config: WorldConfig) -> (Self, Arc<DefaultChunkFactory>) {
        let factory = Arc::new(DefaultChunkFactory::from_config(&config));
        let world = Self::with_factory(config, Box::new(factory.clone()));
        (world, factory)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn set_factory(&mut self, factory: Box<dyn ChunkFactory>) {
        self.factory = Some(factory);
    }

    /// Remove the factory; later lookups of absent chunks fail
    pub fn clear_factory(&mut self) -> Option<Box<dyn ChunkFactory>> {
        self.factory.take()
    }

    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Mesher used by every rebuild from now on
    pub fn set_mesh_builder(&mut self, builder: Box<dyn MeshBuilder>) {
        self.mesh_builder = builder;
    }

    /// Chunk coordinate containing a world-space position (floor per axis).
    ///
    /// Fails for non-finite positions and positions past the `i32` grid.
    pub fn world_position_to_chunk_coord(&self, position: Vec3) -> Result<ChunkCoord> {
        let c = (position / self.config.chunk_world_size).floor();
        let limit = -(i32::MIN as f32);
        if !c.is_finite() || c.min_element() < -limit || c.max_element() >= limit {
            log::warn!("World position {:?} is outside the chunk grid", position);
            return Err(Error::PositionOutOfRange { position });
        }
        Ok(ChunkCoord::new(c.x as i32, c.y as i32, c.z as i32))
    }

    /// Existing chunk at `coord`, or a cleared one from the factory.
    pub fn get_or_create_chunk(&mut self, coord: ChunkCoord) -> Result<&mut Chunk> {
        spawn_into(&mut self.chunks, self.factory.as_deref(), self.config.chunk_world_size, coord)
    }

    /// Like [`World::get_or_create_chunk`], with the mesh builder borrowed alongside
    pub(crate) fn get_or_create_with_builder(
        &mut self,
        coord: ChunkCoord,
    ) -> Result<(&mut Chunk, &dyn MeshBuilder)> {
        let chunk = spawn_into(&mut self.chunks, self.factory.as_deref(), self.config.chunk_world_size, coord)?;
        Ok((chunk, self.mesh_builder.as_ref()))
    }

    /// Get immutable reference to a chunk by coordinate
    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Get mutable reference to a chunk by coordinate
    pub fn get_chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Get the number of loaded chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Get an iterator over all loaded chunk coordinates
    pub fn loaded_coords(&self) -> impl Iterator<Item = &ChunkCoord> {
        self.chunks.keys()
    }

    /// Remove a chunk from the world and return it.
    ///
    /// The factory is told so it can drop anything it kept for the chunk.
    pub fn evict_chunk(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        let chunk = self.chunks.remove(&coord)?;
        if let Some(factory) = self.factory.as_ref() {
            factory.release(coord);
        }
        log::debug!("Evicted chunk {:?}", coord);
        Some(chunk)
    }

    /// Get or create a chunk, then fill it from `generator`
    pub fn generate_chunk(&mut self, coord: ChunkCoord, generator: &dyn VoxelGenerator) -> Result<&mut Chunk> {
        let chunk = self.get_or_create_chunk(coord)?;
        chunk.generate(generator);
        Ok(chunk)
    }

    /// Rebuild the mesh of one loaded chunk. `None` if it is not loaded.
    pub fn update_chunk(&mut self, coord: ChunkCoord) -> Option<Result<ChunkStats>> {
        let (chunk, builder) = self.chunk_and_builder(coord)?;
        Some(chunk.update(builder).cloned())
    }

    /// Punch a hole in the center of a chunk, creating it if needed
    pub fn carve_chunk_center(&mut self, coord: ChunkCoord) -> Result<()> {
        let (chunk, builder) = self.get_or_create_with_builder(coord)?;
        chunk.carve_center(builder)
    }

    /// Rebuild every dirty chunk in parallel. Returns the number rebuilt.
    ///
    /// Chunks that fail to rebuild stay dirty and are logged.
    pub fn rebuild_dirty(&mut self) -> usize {
        let builder = self.mesh_builder.as_ref();
        let dirty = self.chunks.values().filter(|chunk| chunk.is_dirty()).count();
        let failures: Vec<(ChunkCoord, Error)> = self
            .chunks
            .par_iter_mut()
            .filter(|(_, chunk)| chunk.is_dirty())
            .filter_map(|(coord, chunk)| chunk.update(builder).err().map(|err| (*coord, err)))
            .collect();

        for (coord, err) in &failures {
            log::warn!("Failed to rebuild chunk {:?}: {}", coord, err);
        }

        let rebuilt = dirty - failures.len();
        log::debug!("Rebuilt {} of {} dirty chunks", rebuilt, dirty);
        rebuilt
    }

    fn chunk_and_builder(&mut self, coord: ChunkCoord) -> Option<(&mut Chunk, &dyn MeshBuilder)> {
        let chunk = self.chunks.get_mut(&coord)?;
        Some((chunk, self.mesh_builder.as_ref()))
    }
}

/// Single `entry` lookup that spawns, clears and registers a missing chunk
fn spawn_into<'a>(
    chunks: &'a mut HashMap<ChunkCoord, Chunk>,
    factory: Option<&dyn ChunkFactory>,
    chunk_world_size: f32,
    coord: ChunkCoord,
) -> Result<&'a mut Chunk> {
    match chunks.entry(coord) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => {
            let Some(factory) = factory else {
                log::error!("Cannot create chunk {:?}: no chunk factory set", coord);
                return Err(Error::Configuration(format!(
                    "no chunk factory set to create chunk {coord:?}"
                )));
            };

            let origin = coord.world_origin(chunk_world_size);
            let mut chunk = factory.spawn(coord, origin).map_err(|err| {
                log::error!("Failed to spawn chunk {:?}: {}", coord, err);
                match err {
                    Error::Spawn { .. } => err,
                    other => Error::Spawn { coord, reason: other.to_string() },
                }
            })?;
            chunk.clear();

            log::debug!("Created chunk {:?} at {:?}", coord, origin);
            Ok(entry.insert(chunk))
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}
