//! Voxsculpt - headless sculpting demo
//!
//! Usage: voxsculpt [config.json]

use glam::Vec3;

use voxsculpt::core::{logging, Result, WorldConfig};
use voxsculpt::generation::{NoiseTerrainGenerator, TerrainParams};
use voxsculpt::voxel::{Brush, ChunkCoord, World};

fn parse_config_arg(args: &[String]) -> Result<WorldConfig> {
    match args.get(1) {
        Some(path) => {
            log::info!("Loading config from: {}", path);
            WorldConfig::load_sync(path)
        }
        None => Ok(WorldConfig::default()),
    }
}

fn run(config: WorldConfig) -> Result<()> {
    log::info!(
        "Chunk: {} world units, {} per voxel, {} samples, {:?} coverage",
        config.chunk_world_size,
        config.voxel_world_size,
        config.chunk_size,
        config.neighbor_coverage
    );

    let generator = NoiseTerrainGenerator::new(TerrainParams {
        voxel_world_size: config.voxel_world_size,
        base_height: config.chunk_world_size * 0.5,
        ..TerrainParams::default()
    });
    let cvs = config.chunk_voxel_size();
    let mut world = World::new(config);

    for x in -1..=1 {
        for y in -1..=1 {
            world.generate_chunk(ChunkCoord::new(x, y, 0), &generator)?;
        }
    }
    let rebuilt = world.rebuild_dirty();
    log::info!("Generated {} chunks, rebuilt {}", world.chunk_count(), rebuilt);

    // Dig into the corner shared by four chunks
    let brush = Brush::sphere(Vec3::new(cvs - 2.0, cvs - 2.0, cvs * 0.5), 6.0, -2.0);
    let report = world.sculpt_at(&brush)?;
    log::info!(
        "Sculpt from {:?} touched {:?}, skipped {:?}",
        report.target,
        report.touched,
        report.skipped
    );

    let report = world.paint_at(&brush.with_location(brush.location + Vec3::Z * 2.0), 5)?;
    log::info!("Paint touched {} chunks", report.touched.len());

    let mut coords: Vec<ChunkCoord> = world.loaded_coords().copied().collect();
    coords.sort();
    for coord in coords {
        if let Some(chunk) = world.get_chunk(coord) {
            let stats = chunk.stats();
            log::info!(
                "Chunk {:?}: {} vertices, {} triangles (generate {:.2}ms, update {:.2}ms)",
                coord,
                stats.vertex_count,
                stats.triangle_count,
                stats.generate_time.as_secs_f64() * 1000.0,
                stats.update_time.as_secs_f64() * 1000.0
            );
        }
    }
    Ok(())
}

fn main() {
    logging::init();
    log::info!("Voxsculpt starting...");

    let args: Vec<String> = std::env::args().collect();
    let result = parse_config_arg(&args).and_then(run);
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
