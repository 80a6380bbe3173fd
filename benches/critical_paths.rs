//! Criterion benchmarks for Hexel critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Structure: payload text parsing
//! - Palette: color token normalization
//! - Grid: expansion and deflation
//! - Codec: full decode and encode pipelines

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hexel::grid::{deflate, expand};
use hexel::palette::normalize;
use hexel::structure::{parse, serialize};
use hexel::{decode, encode, Color, GridSize, PixelGrid};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a square grid cycling through `colors` distinct colors
fn make_grid(side: u32, colors: usize) -> PixelGrid {
    (0..(side * side) as usize)
        .map(|i| {
            let c = i % colors;
            Color::new((c * 7) as u8, (c * 13) as u8, (c * 31) as u8)
        })
        .collect()
}

/// Generate palette tokens in mixed case and shorthand
fn make_palette_tokens(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| if i % 2 == 0 { format!("#{:06X}", i * 997) } else { format!("#{:03x}", i % 4096) })
        .collect()
}

// =============================================================================
// Structure Benchmarks
// =============================================================================

fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure");

    for side in [16u32, 64, 256].iter() {
        let grid = make_grid(*side, 64);
        let (palette, indices) = deflate(&grid);
        let text = serialize(&palette.to_hex_strings(), indices.as_slice()).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", side), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }

    group.finish();
}

// =============================================================================
// Palette Benchmarks
// =============================================================================

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");

    for n in [16usize, 256, 4096].iter() {
        let tokens = make_palette_tokens(*n);
        group.throughput(Throughput::Elements(*n as u64));
        group.bench_with_input(BenchmarkId::new("normalize", n), &tokens, |b, tokens| {
            b.iter(|| normalize(black_box(tokens)))
        });
    }

    group.finish();
}

// =============================================================================
// Grid Benchmarks
// =============================================================================

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");

    for side in [16u32, 64, 256].iter() {
        let grid = make_grid(*side, 64);
        let (palette, indices) = deflate(&grid);
        let tokens: Vec<String> = indices.as_slice().iter().map(ToString::to_string).collect();
        group.throughput(Throughput::Elements(grid.len() as u64));

        group.bench_with_input(BenchmarkId::new("expand", side), &tokens, |b, tokens| {
            b.iter(|| expand(black_box(&palette), black_box(tokens)))
        });
        group.bench_with_input(BenchmarkId::new("deflate", side), &grid, |b, grid| {
            b.iter(|| deflate(black_box(grid)))
        });
    }

    group.finish();
}

// =============================================================================
// Codec Benchmarks
// =============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for side in [16u32, 64, 256].iter() {
        let size = GridSize::new(*side, *side);
        let grid = make_grid(*side, 41);
        let payload = encode(&grid, size).unwrap();
        group.throughput(Throughput::Elements(grid.len() as u64));

        group.bench_with_input(BenchmarkId::new("decode", side), &payload, |b, payload| {
            b.iter(|| decode(black_box(payload.as_str()), size))
        });
        group.bench_with_input(BenchmarkId::new("encode", side), &grid, |b, grid| {
            b.iter(|| encode(black_box(grid), size))
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_structure, bench_palette, bench_grid, bench_codec);

criterion_main!(benches);
