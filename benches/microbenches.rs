//! Criterion microbenches for kvadrat conversion stages.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Full conversion of a generated grid (serial and with workers)
//! - Region building for a diagonal staircase (corner-touching merge)
//! - Path data normalization

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::collections::BTreeSet;
use std::hint::black_box;

use kvadrat::geometry::ClipperKernel;
use kvadrat::path::normalize_path;
use kvadrat::region::RegionBuilder;
use kvadrat::{convert, Color, ConvertOptions, Coordinate, PixelGrid};

const GRID_SIZE: u32 = 32;

/// A grid with a handful of colors laid out in stripes, blocks and
/// diagonals, so every encoding and the corner-touching merge show up.
fn sample_grid() -> PixelGrid {
    let palette = [
        Color::opaque(255, 0, 0),
        Color::opaque(0, 0, 128),
        Color::opaque(255, 255, 255),
        Color::new(0, 0, 0, 0),
    ];
    let rows: Vec<Vec<Color>> = (0..GRID_SIZE)
        .map(|y| {
            (0..GRID_SIZE)
                .map(|x| {
                    let index = if x == y || x + y == GRID_SIZE - 1 {
                        0
                    } else if (x / 8 + y / 8) % 2 == 0 {
                        1
                    } else if (x + y) % 5 == 0 {
                        2
                    } else {
                        3
                    };
                    palette[index]
                })
                .collect()
        })
        .collect();
    PixelGrid::from_rows(&rows).unwrap()
}

/// Benchmark full conversion on the calling thread and on a pool.
fn bench_convert(c: &mut Criterion) {
    let grid = sample_grid();
    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Elements(grid.len() as u64));

    group.bench_function("serial", |b| {
        let options = ConvertOptions::default();
        b.iter(|| {
            let doc = convert(black_box(&grid), &options).unwrap();
            black_box(doc)
        })
    });

    group.bench_function("workers_4", |b| {
        let options = ConvertOptions::default().workers(4);
        b.iter(|| {
            let doc = convert(black_box(&grid), &options).unwrap();
            black_box(doc)
        })
    });

    group.finish();
}

/// Benchmark region building where every pixel touches the next only at
/// a corner.
fn bench_region_staircase(c: &mut Criterion) {
    let kernel = ClipperKernel::default();
    let builder = RegionBuilder::new(&kernel, 1e-6);
    let pixels: BTreeSet<Coordinate> = (0..GRID_SIZE).map(|i| Coordinate::new(i, i)).collect();

    let mut group = c.benchmark_group("region");
    group.throughput(Throughput::Elements(pixels.len() as u64));
    group.bench_function("staircase", |b| {
        b.iter(|| {
            let regions = builder.build(black_box(&pixels)).unwrap();
            black_box(regions)
        })
    });
    group.finish();
}

/// Benchmark path data normalization.
fn bench_path_normalize(c: &mut Criterion) {
    let data: String = (0..64)
        .map(|i| format!("M{0}.0,{0}.0 L{1}.0,{0}.0 L{1}.0,{1}.0 L{0}.0,{1}.0 z ", i, i + 1))
        .collect();

    let mut group = c.benchmark_group("path");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("normalize", |b| {
        b.iter(|| {
            let normalized = normalize_path(black_box(&data)).unwrap();
            black_box(normalized)
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_convert,
    bench_region_staircase,
    bench_path_normalize
);
criterion_main!(benches);
