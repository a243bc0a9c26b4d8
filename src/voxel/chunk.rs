//! Chunk: one cubic region of sculptable voxel space

use std::time::{Duration, Instant};

use glam::Vec3;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::generation::VoxelGenerator;
use crate::mesh::{MeshBuilder, MeshSink};
use super::brush::Brush;
use super::field::VoxelField;
use super::voxel::{MaterialId, Voxel};

/// Integer coordinate identifying a chunk in the world grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate shifted by whole chunks, `None` past the edge of the grid
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// World-space origin (minimum corner) of this chunk
    pub fn world_origin(&self, chunk_world_size: f32) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32) * chunk_world_size
    }
}

/// Bookkeeping from the last generate/update of a chunk
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkStats {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub generate_time: Duration,
    pub update_time: Duration,
}

/// A cubic region of voxel space and the mesh sink displaying it.
///
/// The chunk is the only writer of its field. Brushes handed to
/// [`Chunk::sculpt`] and [`Chunk::paint`] are in the chunk's local voxel
/// frame, where sample `(x, y, z)` sits at `Vec3::new(x, y, z)`.
pub struct Chunk {
    coord: ChunkCoord,
    field: VoxelField,
    origin: Vec3,
    voxel_world_size: f32,
    stats: ChunkStats,
    dirty: bool,
    sink: Option<Box<dyn MeshSink>>,
}

impl Chunk {
    /// Create a cleared chunk with `size³` samples and no sink
    pub fn new(coord: ChunkCoord, size: usize, origin: Vec3, voxel_world_size: f32) -> Self {
        Self {
            coord,
            field: VoxelField::new(size),
            origin,
            voxel_world_size,
            stats: ChunkStats::default(),
            dirty: true,
            sink: None,
        }
    }

    /// Attach a sink (builder pattern)
    pub fn with_sink(mut self, sink: Box<dyn MeshSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the sink receiving rebuilt meshes
    pub fn attach_sink(&mut self, sink: Box<dyn MeshSink>) {
        self.sink = Some(sink);
    }

    /// Detach and return the current sink
    pub fn detach_sink(&mut self) -> Option<Box<dyn MeshSink>> {
        self.sink.take()
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// World-space minimum corner
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Minimum corner in world voxel units
    pub fn voxel_origin(&self) -> Vec3 {
        self.origin / self.voxel_world_size
    }

    /// Samples per side
    pub fn size(&self) -> usize {
        self.field.size()
    }

    pub fn field(&self) -> &VoxelField {
        &self.field
    }

    pub fn stats(&self) -> &ChunkStats {
        &self.stats
    }

    /// Whether the field changed since the last update
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reset every voxel to solid
    pub fn clear(&mut self) {
        self.field.clear();
        self.dirty = true;
    }

    /// Replace the field with a cleared one of `size³` samples
    pub fn set_size(&mut self, size: usize) {
        self.field = VoxelField::new(size);
        self.dirty = true;
    }

    /// Fill the field from a generator
    pub fn generate(&mut self, generator: &dyn VoxelGenerator) {
        let start = Instant::now();
        let size = self.field.size();
        generator.generate(self.origin, size, &mut self.field);
        self.stats.generate_time = start.elapsed();
        self.dirty = true;

        log::debug!(
            "Generated chunk {:?} in {:.2}ms",
            self.coord,
            self.stats.generate_time.as_secs_f64() * 1000.0
        );
    }

    /// Move a brush from world voxel units into this chunk's local frame
    pub fn local_brush(&self, world_brush: &Brush) -> Brush {
        world_brush.with_location(world_brush.location - self.voxel_origin())
    }

    /// Add `strength * weight` to the density of every sample inside the brush.
    ///
    /// Returns the number of samples changed. Applying the same brush twice
    /// changes them twice.
    pub fn sculpt(&mut self, brush: &Brush) -> usize {
        let strength = brush.strength;
        self.apply(brush, |voxel, weight| voxel.density += strength * weight)
    }

    /// Set the material of every sample inside the brush. Density is untouched.
    pub fn paint(&mut self, brush: &Brush, material: MaterialId) -> usize {
        self.apply(brush, |voxel, _| voxel.material = material)
    }

    fn apply(&mut self, brush: &Brush, mut edit: impl FnMut(&mut Voxel, f32)) -> usize {
        let size = self.field.size();
        let Some((lo, hi)) = brush.bounds().sample_range(size) else {
            return 0;
        };

        let voxels = self.field.voxels_mut();
        let mut changed = 0;
        for z in lo[2]..=hi[2] {
            for y in lo[1]..=hi[1] {
                for x in lo[0]..=hi[0] {
                    let weight = brush.influence_at(Vec3::new(x as f32, y as f32, z as f32));
                    if weight > 0.0 {
                        edit(&mut voxels[(z * size + y) * size + x], weight);
                        changed += 1;
                    }
                }
            }
        }

        if changed > 0 {
            self.dirty = true;
        }
        changed
    }

    /// Rebuild the whole mesh and hand it to the sink.
    pub fn update(&mut self, builder: &dyn MeshBuilder) -> Result<&ChunkStats> {
        let Some(sink) = self.sink.as_mut() else {
            log::error!("Chunk {:?} has no mesh sink to update", self.coord);
            return Err(Error::MissingOwner(format!("chunk {:?} has no mesh sink", self.coord)));
        };

        let start = Instant::now();
        let resolution = self.field.size().saturating_sub(1);
        let mesh = builder.build(&self.field, resolution);
        sink.replace(&mesh);

        self.stats.vertex_count = mesh.vertex_count();
        self.stats.triangle_count = mesh.triangle_count();
        self.stats.update_time = start.elapsed();
        self.dirty = false;

        log::debug!(
            "Updated chunk {:?}: {} vertices, {} triangles in {:.2}ms",
            self.coord,
            self.stats.vertex_count,
            self.stats.triangle_count,
            self.stats.update_time.as_secs_f64() * 1000.0
        );
        Ok(&self.stats)
    }

    /// Debug probe: punch air into the center sample and rebuild
    pub fn carve_center(&mut self, builder: &dyn MeshBuilder) -> Result<()> {
        log::info!(
            "Carving center of chunk {:?} at {:?} (sink attached: {})",
            self.coord,
            self.origin,
            self.sink.is_some()
        );

        let center = (self.field.size() / 2) as i64;
        let index = match self.field.index(center, center, center) {
            Ok(index) => index,
            Err(err) => {
                log::error!("Cannot carve chunk {:?}: {}", self.coord, err);
                return Err(err);
            }
        };
        self.field.get_mut_by_index(index)?.density = -1.0;
        self.dirty = true;

        self.update(builder)?;
        Ok(())
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("coord", &self.coord)
            .field("size", &self.field.size())
            .field("origin", &self.origin)
            .field("dirty", &self.dirty)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}
