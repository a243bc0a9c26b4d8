//! Symmetrical strokes across chunk boundaries
//!
//! A stroke starts in a target chunk. Each face of the target that the brush
//! pokes through (strictly, tangency does not count) makes the neighbor behind
//! it take part, and combinations of faces reach edge and corner neighbors.
//! Every neighbor receives the brush reflected across the planes crossed to
//! reach it, so the edit lands mirrored on the far side of each boundary.
//!
//! All brush locations here are in world voxel units.

use std::collections::HashMap;

use glam::Vec3;

use crate::core::config::{NeighborCoverage, WorldConfig};
use crate::core::types::Result;
use crate::math::Aabb;
use super::brush::Brush;
use super::chunk::ChunkCoord;
use super::voxel::MaterialId;
use super::world::World;

/// What a stroke does to the voxels under the brush
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeOp {
    /// Add weighted strength to density
    Sculpt,
    /// Overwrite material, keep density
    Paint(MaterialId),
}

/// Outcome of one stroke
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeReport {
    /// Chunk the stroke started in
    pub target: ChunkCoord,
    /// Chunks edited and rebuilt, sorted
    pub touched: Vec<ChunkCoord>,
    /// Neighbors that could not be created and were left alone
    pub skipped: Vec<ChunkCoord>,
    /// Chunks edited whose mesh could not be rebuilt
    pub unmeshed: Vec<ChunkCoord>,
    /// Neighbor offsets that fall past the edge of the `i32` chunk grid
    pub out_of_grid: Vec<[i32; 3]>,
}

impl StrokeReport {
    fn new(target: ChunkCoord) -> Self {
        Self { target, ..Self::default() }
    }
}

/// Which faces of a chunk a brush pokes through
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overflow {
    /// Per axis: crosses the minimum face
    pub below: [bool; 3],
    /// Per axis: crosses the maximum face
    pub above: [bool; 3],
}

impl Overflow {
    /// Compare a sphere of `radius` at `center` against `bounds`
    pub fn of(center: Vec3, radius: f32, bounds: &Aabb) -> Self {
        let mut overflow = Overflow::default();
        for axis in 0..3 {
            overflow.below[axis] = center[axis] - radius < bounds.min[axis];
            overflow.above[axis] = center[axis] + radius > bounds.max[axis];
        }
        overflow
    }

    pub fn is_empty(&self) -> bool {
        !self.below.iter().chain(self.above.iter()).any(|&b| b)
    }

    /// Every neighbor offset reachable by combining crossed faces, each
    /// component in `{-1, 0, 1}`, excluding the target itself
    pub fn offsets(&self, coverage: NeighborCoverage) -> Vec<[i32; 3]> {
        let choices: Vec<Vec<i32>> = (0..3)
            .map(|axis| {
                let mut steps = vec![0];
                if self.below[axis] {
                    steps.push(-1);
                }
                if self.above[axis] {
                    steps.push(1);
                }
                steps
            })
            .collect();

        let mut offsets = Vec::new();
        for &dx in &choices[0] {
            for &dy in &choices[1] {
                for &dz in &choices[2] {
                    let offset = [dx, dy, dz];
                    if offset != [0, 0, 0] && coverage.includes(offset) {
                        offsets.push(offset);
                    }
                }
            }
        }
        offsets
    }
}

impl NeighborCoverage {
    /// Whether a neighbor offset is visited under this coverage
    pub fn includes(self, offset: [i32; 3]) -> bool {
        match self {
            NeighborCoverage::Full => true,
            NeighborCoverage::Legacy => {
                let crossed = offset.iter().filter(|&&d| d != 0).count();
                crossed == 1 || (crossed == 2 && offset[1] != 0)
            }
        }
    }
}

/// Bounds of a chunk in world voxel units: `[coord * cvs, (coord + 1) * cvs]`
pub fn chunk_voxel_bounds(coord: ChunkCoord, chunk_voxel_size: f32) -> Aabb {
    let min = Vec3::new(coord.x as f32, coord.y as f32, coord.z as f32) * chunk_voxel_size;
    Aabb::new(min, min + Vec3::splat(chunk_voxel_size))
}

/// Reflect `location` across the crossed faces of `bounds`
pub fn mirror_location(location: Vec3, offset: [i32; 3], bounds: &Aabb) -> Vec3 {
    let mut mirrored = location;
    for axis in 0..3 {
        let boundary = match offset[axis] {
            -1 => bounds.min[axis],
            1 => bounds.max[axis],
            _ => continue,
        };
        mirrored[axis] = 2.0 * boundary - location[axis];
    }
    mirrored
}

/// Chunks a stroke applies to and the brush each receives
#[derive(Clone, Debug, Default)]
pub struct StrokePlan {
    /// Target included. Later entries for the same chunk replace earlier ones.
    pub brushes: HashMap<ChunkCoord, Brush>,
    /// Offsets whose neighbor coordinate does not fit in `i32`
    pub out_of_grid: Vec<[i32; 3]>,
}

pub fn plan_stroke(config: &WorldConfig, target: ChunkCoord, brush: &Brush) -> StrokePlan {
    let bounds = chunk_voxel_bounds(target, config.chunk_voxel_size());
    let overflow = Overflow::of(brush.location, brush.reach(), &bounds);

    let mut plan = StrokePlan::default();
    plan.brushes.insert(target, *brush);
    for offset in overflow.offsets(config.neighbor_coverage) {
        let Some(neighbor) = target.offset(offset[0], offset[1], offset[2]) else {
            plan.out_of_grid.push(offset);
            continue;
        };
        let mirrored = brush.with_location(mirror_location(brush.location, offset, &bounds));
        plan.brushes.insert(neighbor, mirrored);
    }
    plan
}

impl World {
    /// Sculpt `brush` into `target` and into every neighbor it overflows into
    pub fn sculpt_symmetrical(&mut self, target: ChunkCoord, brush: &Brush) -> Result<StrokeReport> {
        self.stroke(target, brush, StrokeOp::Sculpt)
    }

    /// Paint `material` into `target` and into every neighbor it overflows into
    pub fn paint_symmetrical(&mut self, target: ChunkCoord, brush: &Brush, material: MaterialId) -> Result<StrokeReport> {
        self.stroke(target, brush, StrokeOp::Paint(material))
    }

    /// Sculpt starting from the chunk containing the brush
    pub fn sculpt_at(&mut self, brush: &Brush) -> Result<StrokeReport> {
        let target = self.chunk_containing_brush(brush)?;
        self.sculpt_symmetrical(target, brush)
    }

    /// Paint starting from the chunk containing the brush
    pub fn paint_at(&mut self, brush: &Brush, material: MaterialId) -> Result<StrokeReport> {
        let target = self.chunk_containing_brush(brush)?;
        self.paint_symmetrical(target, brush, material)
    }

    fn chunk_containing_brush(&self, brush: &Brush) -> Result<ChunkCoord> {
        self.world_position_to_chunk_coord(brush.location * self.config().voxel_world_size)
    }

    /// Apply one stroke to the target and its affected neighbors, then
    /// rebuild each of them.
    ///
    /// Fails only if the target itself cannot be created. Neighbors that
    /// cannot be created or addressed are skipped and listed in the report.
    pub fn stroke(&mut self, target: ChunkCoord, brush: &Brush, op: StrokeOp) -> Result<StrokeReport> {
        self.get_or_create_chunk(target)?;

        let plan = plan_stroke(self.config(), target, brush);
        let mut report = StrokeReport::new(target);
        for offset in &plan.out_of_grid {
            log::warn!("Neighbor {:?} of chunk {:?} is outside the chunk grid", offset, target);
        }
        report.out_of_grid = plan.out_of_grid;

        let mut brushes: Vec<(ChunkCoord, Brush)> = plan.brushes.into_iter().collect();
        brushes.sort_by_key(|(coord, _)| *coord);

        for (coord, world_brush) in brushes {
            let (chunk, builder) = match self.get_or_create_with_builder(coord) {
                Ok(pair) => pair,
                Err(err) => {
                    log::warn!("Skipping chunk {:?} in stroke from {:?}: {}", coord, target, err);
                    report.skipped.push(coord);
                    continue;
                }
            };

            let local = chunk.local_brush(&world_brush);
            let changed = match op {
                StrokeOp::Sculpt => chunk.sculpt(&local),
                StrokeOp::Paint(material) => chunk.paint(&local, material),
            };

            match chunk.update(builder) {
                Ok(_) => report.touched.push(coord),
                Err(err) => {
                    log::warn!("Edited chunk {:?} but could not rebuild it: {}", coord, err);
                    report.unmeshed.push(coord);
                }
            }
            log::trace!("Stroke {:?} changed {} samples in chunk {:?}", op, changed, coord);
        }

        log::debug!(
            "Stroke from {:?}: {} touched, {} skipped",
            target,
            report.touched.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::voxel::brush::Axis;
    use crate::voxel::chunk::Chunk;
    use crate::voxel::factory::{ChunkFactory, DefaultChunkFactory};
    use crate::voxel::voxel::Voxel;
    use crate::mesh::{MeshBuffer, MeshBuilder, MeshData};
    use crate::voxel::field::VoxelField;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 8 voxels per chunk, 9 samples per side
    fn small_config() -> WorldConfig {
        WorldConfig {
            chunk_world_size: 800.0,
            voxel_world_size: 100.0,
            chunk_size: 9,
            ..WorldConfig::default()
        }
    }

    fn legacy_config() -> WorldConfig {
        WorldConfig {
            neighbor_coverage: NeighborCoverage::Legacy,
            ..small_config()
        }
    }

    /// Refuses every chunk except the origin
    struct OriginOnlyFactory(DefaultChunkFactory);

    impl ChunkFactory for OriginOnlyFactory {
        fn spawn(&self, coord: ChunkCoord, origin: Vec3) -> Result<Chunk> {
            if coord != ChunkCoord::default() {
                return Err(Error::Spawn { coord, reason: "outside editable area".into() });
            }
            self.0.spawn(coord, origin)
        }
    }

    #[test]
    fn test_inside_brush_has_no_neighbors() {
        let brush = Brush::sphere(Vec3::new(4.0, 4.0, 4.0), 2.0, 1.0);
        let plan = plan_stroke(&small_config(), ChunkCoord::default(), &brush);
        assert_eq!(plan.brushes.len(), 1);
        assert_eq!(plan.brushes[&ChunkCoord::default()], brush);
    }

    #[test]
    fn test_tangent_brush_does_not_cross() {
        // Touches the +X face and the -Y face exactly
        let brush = Brush::sphere(Vec3::new(6.0, 2.0, 4.0), 2.0, 1.0);
        let plan = plan_stroke(&small_config(), ChunkCoord::default(), &brush);
        assert_eq!(plan.brushes.len(), 1);
    }

    #[test]
    fn test_one_face_mirrors_across_boundary() {
        let target = ChunkCoord::new(1, 0, 0);
        // Target spans x in [8, 16]; brush pokes through x = 16
        let brush = Brush::sphere(Vec3::new(15.0, 4.0, 4.0), 2.0, 1.0);
        let plan = plan_stroke(&small_config(), target, &brush);

        assert_eq!(plan.brushes.len(), 2);
        let mirrored = plan.brushes[&ChunkCoord::new(2, 0, 0)];
        assert_eq!(mirrored.location.x + brush.location.x, 2.0 * 16.0);
        assert_eq!(mirrored.location.y, brush.location.y);
        assert_eq!(mirrored.location.z, brush.location.z);
        assert_eq!(mirrored.shape, brush.shape);
        assert_eq!(mirrored.strength, brush.strength);
    }

    #[test]
    fn test_negative_face_mirrors_across_minimum() {
        let target = ChunkCoord::new(-1, 0, 0);
        // Target spans x in [-8, 0]; brush pokes through x = -8
        let brush = Brush::sphere(Vec3::new(-7.5, 4.0, 4.0), 1.0, 1.0);
        let plan = plan_stroke(&small_config(), target, &brush);

        let mirrored = plan.brushes[&ChunkCoord::new(-2, 0, 0)];
        assert_eq!(mirrored.location.x + brush.location.x, 2.0 * -8.0);
    }

    #[test]
    fn test_two_faces_reach_edge_neighbor() {
        let brush = Brush::sphere(Vec3::new(7.0, 1.0, 4.0), 2.0, 1.0);
        let plan = plan_stroke(&small_config(), ChunkCoord::default(), &brush);

        let mut coords: Vec<_> = plan.brushes.keys().copied().collect();
        coords.sort();
        assert_eq!(
            coords,
            vec![
                ChunkCoord::new(0, -1, 0),
                ChunkCoord::new(0, 0, 0),
                ChunkCoord::new(1, -1, 0),
                ChunkCoord::new(1, 0, 0),
            ]
        );
        let diagonal = plan.brushes[&ChunkCoord::new(1, -1, 0)];
        assert_eq!(diagonal.location, Vec3::new(9.0, -1.0, 4.0));
        assert_eq!(plan.brushes[&ChunkCoord::new(1, 0, 0)].location, Vec3::new(9.0, 1.0, 4.0));
        assert_eq!(plan.brushes[&ChunkCoord::new(0, -1, 0)].location, Vec3::new(7.0, -1.0, 4.0));
    }

    #[test]
    fn test_corner_reaches_seven_neighbors() {
        let brush = Brush::sphere(Vec3::new(1.0, 1.0, 1.0), 2.0, 1.0);
        let plan = plan_stroke(&small_config(), ChunkCoord::default(), &brush);
        assert_eq!(plan.brushes.len(), 8);
        assert_eq!(plan.brushes[&ChunkCoord::new(-1, -1, -1)].location, Vec3::splat(-1.0));
    }

    #[test]
    fn test_legacy_coverage_skips_xz_edges_and_corners() {
        let brush = Brush::sphere(Vec3::new(1.0, 1.0, 1.0), 2.0, 1.0);
        let plan = plan_stroke(&legacy_config(), ChunkCoord::default(), &brush);

        // Target, three faces, the XY and YZ edges
        assert_eq!(plan.brushes.len(), 6);
        assert!(plan.brushes.contains_key(&ChunkCoord::new(-1, -1, 0)));
        assert!(plan.brushes.contains_key(&ChunkCoord::new(0, -1, -1)));
        assert!(!plan.brushes.contains_key(&ChunkCoord::new(-1, 0, -1)));
        assert!(!plan.brushes.contains_key(&ChunkCoord::new(-1, -1, -1)));
    }

    #[test]
    fn test_oversized_brush_reaches_both_sides() {
        let brush = Brush::sphere(Vec3::new(4.0, 4.0, 4.0), 5.0, 1.0);
        let plan = plan_stroke(&small_config(), ChunkCoord::default(), &brush);
        assert_eq!(plan.brushes.len(), 27);
        assert_eq!(plan.brushes[&ChunkCoord::new(1, 0, 0)].location.x, 12.0);
        assert_eq!(plan.brushes[&ChunkCoord::new(-1, 0, 0)].location.x, -4.0);
    }

    #[test]
    fn test_shape_without_radius_stays_in_target() {
        let brush = Brush::capsule(Vec3::new(7.5, 4.0, 4.0), Axis::X, 3.0, 2.0, 1.0);
        let plan = plan_stroke(&small_config(), ChunkCoord::default(), &brush);
        assert_eq!(plan.brushes.len(), 1);
    }

    #[test]
    fn test_stroke_creates_and_rebuilds_neighbors() {
        let (mut world, buffers) = World::with_default_buffers(small_config());
        let brush = Brush::sphere(Vec3::new(7.0, 4.0, 4.0), 2.5, -3.0);

        let report = world.sculpt_symmetrical(ChunkCoord::default(), &brush).unwrap();
        assert_eq!(report.touched, vec![ChunkCoord::new(0, 0, 0), ChunkCoord::new(1, 0, 0)]);
        assert!(report.skipped.is_empty());
        assert_eq!(world.chunk_count(), 2);

        for coord in &report.touched {
            let chunk = world.get_chunk(*coord).unwrap();
            assert!(!chunk.is_dirty());
            assert!(chunk.stats().triangle_count > 0);
            let buffer = buffers.buffer(*coord).unwrap();
            assert_eq!(buffer.lock().unwrap().replacements(), 1);
        }

        // Mirrored brush sits one voxel inside the neighbor's minimum face
        let neighbor = world.get_chunk(ChunkCoord::new(1, 0, 0)).unwrap();
        assert!(neighbor.field().get(1, 4, 4).unwrap().density < 0.0);
        assert_eq!(neighbor.field().get(7, 4, 4).unwrap(), Voxel::SOLID);
    }

    #[test]
    fn test_sign_flip_changes_triangle_count() {
        let mut world = World::new(small_config());
        let coord = ChunkCoord::default();
        world.get_or_create_chunk(coord).unwrap();
        world.update_chunk(coord).unwrap().unwrap();
        assert_eq!(world.get_chunk(coord).unwrap().stats().triangle_count, 0);

        let brush = Brush::sphere(Vec3::new(4.0, 4.0, 4.0), 2.0, -2.0);
        world.sculpt_symmetrical(coord, &brush).unwrap();
        let carved = world.get_chunk(coord).unwrap().stats().triangle_count;
        assert!(carved > 0);

        // Filling it back restores the solid block
        let fill = Brush { strength: 2.0, ..brush };
        world.sculpt_symmetrical(coord, &fill).unwrap();
        assert_eq!(world.get_chunk(coord).unwrap().stats().triangle_count, 0);
    }

    #[test]
    fn test_paint_changes_material_only() {
        let mut world = World::new(small_config());
        let coord = ChunkCoord::default();
        world.sculpt_symmetrical(coord, &Brush::sphere(Vec3::new(4.0, 4.0, 4.0), 3.0, -2.0)).unwrap();
        let before: Vec<f32> = world.get_chunk(coord).unwrap().field().voxels().iter().map(|v| v.density).collect();

        world.paint_symmetrical(coord, &Brush::sphere(Vec3::new(4.0, 4.0, 4.0), 2.0, 1.0), 3).unwrap();
        let chunk = world.get_chunk(coord).unwrap();
        let after: Vec<f32> = chunk.field().voxels().iter().map(|v| v.density).collect();
        assert_eq!(before, after);
        assert_eq!(chunk.field().get(4, 4, 4).unwrap().material, 3);
        assert_eq!(chunk.field().get(0, 0, 0).unwrap().material, 0);
    }

    #[test]
    fn test_sculpt_at_picks_target_from_location() {
        let mut world = World::new(small_config());
        let brush = Brush::sphere(Vec3::new(-4.0, 12.0, 4.0), 1.0, -1.0);
        let report = world.sculpt_at(&brush).unwrap();
        assert_eq!(report.target, ChunkCoord::new(-1, 1, 0));
        assert_eq!(report.touched, vec![ChunkCoord::new(-1, 1, 0)]);

        let report = world.paint_at(&brush, 2).unwrap();
        assert_eq!(report.target, ChunkCoord::new(-1, 1, 0));
    }

    #[test]
    fn test_failed_neighbor_is_skipped() {
        let factory = OriginOnlyFactory(DefaultChunkFactory::from_config(&small_config()));
        let mut world = World::with_factory(small_config(), Box::new(factory));
        let brush = Brush::sphere(Vec3::new(7.0, 7.0, 4.0), 2.0, -2.0);

        let report = world.sculpt_symmetrical(ChunkCoord::default(), &brush).unwrap();
        assert_eq!(report.touched, vec![ChunkCoord::default()]);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(world.chunk_count(), 1);
        assert!(world.get_chunk(ChunkCoord::default()).unwrap().field().get(7, 7, 4).unwrap().density < 0.0);
    }

    #[test]
    fn test_failed_target_aborts_stroke() {
        let mut world = World::without_factory(small_config());
        let brush = Brush::sphere(Vec3::new(4.0, 4.0, 4.0), 1.0, -1.0);
        assert!(matches!(
            world.sculpt_symmetrical(ChunkCoord::default(), &brush),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_sink_is_reported_unmeshed() {
        let mut world = World::new(small_config());
        world.get_or_create_chunk(ChunkCoord::default()).unwrap().detach_sink();
        let brush = Brush::sphere(Vec3::new(4.0, 4.0, 4.0), 2.0, -2.0);

        let report = world.sculpt_symmetrical(ChunkCoord::default(), &brush).unwrap();
        assert!(report.touched.is_empty());
        assert_eq!(report.unmeshed, vec![ChunkCoord::default()]);
        assert!(world.get_chunk(ChunkCoord::default()).unwrap().is_dirty());
    }

    #[test]
    fn test_far_brush_is_rejected() {
        let mut world = World::new(small_config());
        let brush = Brush::sphere(Vec3::new(1.0e12, 10.0, 10.0), 4.0, -1.0);

        let err = world.sculpt_at(&brush).unwrap_err();
        assert!(matches!(err, Error::PositionOutOfRange { .. }));
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_stroke_at_grid_edge_reports_missing_neighbor() {
        let mut world = World::new(small_config());
        let target = ChunkCoord::new(i32::MAX, 0, 0);
        let bounds = chunk_voxel_bounds(target, 8.0);
        let brush = Brush::sphere(Vec3::new(bounds.max.x + 1.0e4, 4.0, 4.0), 2.0, -1.0);

        let plan = plan_stroke(world.config(), target, &brush);
        assert_eq!(plan.brushes.len(), 1);
        assert_eq!(plan.out_of_grid, vec![[1, 0, 0]]);

        let report = world.sculpt_symmetrical(target, &brush).unwrap();
        assert_eq!(report.touched, vec![target]);
        assert_eq!(report.out_of_grid, vec![[1, 0, 0]]);
        assert!(report.skipped.is_empty());
        assert_eq!(world.chunk_count(), 1);
    }

    /// Counts builds and produces nothing
    struct CountingBuilder(Arc<AtomicUsize>);

    impl MeshBuilder for CountingBuilder {
        fn build(&self, _field: &VoxelField, _resolution: usize) -> MeshData {
            self.0.fetch_add(1, Ordering::SeqCst);
            MeshData::new()
        }
    }

    #[test]
    fn test_stroke_uses_replacement_builder() {
        let builds = Arc::new(AtomicUsize::new(0));
        let mut world = World::new(small_config());
        world.set_mesh_builder(Box::new(CountingBuilder(builds.clone())));

        // Crosses +X only
        let brush = Brush::sphere(Vec3::new(7.0, 4.0, 4.0), 2.0, -1.0);
        let report = world.sculpt_symmetrical(ChunkCoord::default(), &brush).unwrap();

        assert_eq!(report.touched.len(), 2);
        assert_eq!(builds.load(Ordering::SeqCst), 2);
        let stats = world.get_chunk(ChunkCoord::default()).unwrap().stats();
        assert_eq!(stats.triangle_count, 0);
    }

    #[test]
    fn test_attached_sink_clears_unmeshed() {
        let mut world = World::new(small_config());
        let origin = ChunkCoord::default();
        world.get_or_create_chunk(origin).unwrap().detach_sink();
        let brush = Brush::sphere(Vec3::new(4.0, 4.0, 4.0), 2.0, -2.0);

        let report = world.sculpt_symmetrical(origin, &brush).unwrap();
        assert_eq!(report.unmeshed, vec![origin]);

        world.get_chunk_mut(origin).unwrap().attach_sink(Box::new(MeshBuffer::new()));
        let report = world.sculpt_symmetrical(origin, &brush).unwrap();
        assert_eq!(report.touched, vec![origin]);
        assert!(report.unmeshed.is_empty());
        assert!(!world.get_chunk(origin).unwrap().is_dirty());
    }
}
