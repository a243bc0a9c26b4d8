use criterion::{criterion_group, criterion_main, Criterion, black_box};

use voxsculpt::core::WorldConfig;
use voxsculpt::generation::FlatGenerator;
use voxsculpt::mesh::{MeshBuilder, SurfaceNetsBuilder};
use voxsculpt::voxel::{Brush, Chunk, ChunkCoord, World};

use glam::Vec3;

fn carved_chunk(size: usize) -> Chunk {
    let mut chunk = Chunk::new(ChunkCoord::default(), size, Vec3::ZERO, 100.0);
    let c = (size / 2) as f32;
    chunk.sculpt(&Brush::sphere(Vec3::splat(c), c * 0.6, -2.0));
    chunk
}

fn bench_chunk_sculpt_65(c: &mut Criterion) {
    let brush = Brush::sphere(Vec3::splat(32.0), 8.0, -0.5);

    c.bench_function("chunk_sculpt_65_r8", |b| {
        let mut chunk = Chunk::new(ChunkCoord::default(), 65, Vec3::ZERO, 100.0);
        b.iter(|| chunk.sculpt(black_box(&brush)));
    });
}

fn bench_surface_nets_33(c: &mut Criterion) {
    let chunk = carved_chunk(33);
    let builder = SurfaceNetsBuilder::default();

    c.bench_function("surface_nets_33", |b| {
        b.iter(|| builder.build(black_box(chunk.field()), 32));
    });
}

fn bench_surface_nets_65(c: &mut Criterion) {
    let chunk = carved_chunk(65);
    let builder = SurfaceNetsBuilder::default();

    c.bench_function("surface_nets_65", |b| {
        b.iter(|| builder.build(black_box(chunk.field()), 64));
    });
}

fn bench_symmetrical_stroke(c: &mut Criterion) {
    let config = WorldConfig::default();
    let cvs = config.chunk_voxel_size();
    let mut world = World::new(config);
    let generator = FlatGenerator::new(3200.0, 100.0, 0);
    for x in 0..2 {
        for y in 0..2 {
            if let Err(e) = world.generate_chunk(ChunkCoord::new(x, y, 0), &generator) {
                panic!("failed to generate chunk: {e}");
            }
        }
    }

    // Corner stroke touching four chunks
    let brush = Brush::sphere(Vec3::new(cvs - 2.0, cvs - 2.0, 32.0), 4.0, -0.1);

    c.bench_function("symmetrical_stroke_corner", |b| {
        b.iter(|| world.sculpt_symmetrical(ChunkCoord::default(), black_box(&brush)));
    });
}

criterion_group!(
    benches,
    bench_chunk_sculpt_65,
    bench_surface_nets_33,
    bench_surface_nets_65,
    bench_symmetrical_stroke,
);
criterion_main!(benches);
