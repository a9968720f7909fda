//! Benchmarks for visioncraft operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use visioncraft_core::{to_native, ExternalArray, Image, Rect};
use visioncraft_ops::{api, color, edge, filter, transform, BlurParams, CannyParams, RotateParams};

/// Deterministic B, G, R test pattern.
fn test_image(rows: usize, cols: usize) -> Image<'static> {
    Image::from_fn(rows, cols, 3, |x, y, px| {
        px[0] = (x * 3 + y) as u8;
        px[1] = (x ^ y) as u8;
        px[2] = ((x / 8 + y / 8) % 2 * 200) as u8;
    })
    .expect("valid benchmark image")
}

const SIZES: [(usize, usize); 3] = [(240, 320), (480, 640), (1080, 1920)];

/// Benchmark the per-pixel and neighborhood filters.
fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    for &(rows, cols) in &SIZES {
        let img = test_image(rows, cols);
        let label = format!("{cols}x{rows}");
        group.throughput(Throughput::Elements((rows * cols) as u64));

        group.bench_with_input(BenchmarkId::new("grayscale", &label), &img, |b, img| {
            b.iter(|| color::grayscale(black_box(img)))
        });

        group.bench_with_input(BenchmarkId::new("gaussian_15", &label), &img, |b, img| {
            b.iter(|| filter::gaussian_blur(black_box(img), &BlurParams::default()))
        });

        group.bench_with_input(BenchmarkId::new("sharpen", &label), &img, |b, img| {
            b.iter(|| filter::sharpen(black_box(img)))
        });

        group.bench_with_input(BenchmarkId::new("canny", &label), &img, |b, img| {
            b.iter(|| edge::canny(black_box(img), &CannyParams::default()))
        });
    }

    group.finish();
}

/// Benchmark geometric transforms.
fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");

    for &(rows, cols) in &SIZES {
        let img = test_image(rows, cols);
        let label = format!("{cols}x{rows}");
        group.throughput(Throughput::Elements((rows * cols) as u64));

        group.bench_with_input(BenchmarkId::new("rotate_30", &label), &img, |b, img| {
            b.iter(|| transform::rotate(black_box(img), &RotateParams::degrees(30.0)))
        });

        let region = Rect::new(cols as i32 / 4, rows as i32 / 4, cols as i32 / 2, rows as i32 / 2);
        group.bench_with_input(BenchmarkId::new("crop_half", &label), &img, |b, img| {
            b.iter(|| transform::crop(black_box(img), region))
        });
    }

    group.finish();
}

/// Benchmark the array call surface, including marshaling.
fn bench_marshal(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal");

    let (rows, cols) = (480, 640);
    let bytes = test_image(rows, cols).as_contiguous_slice().map(<[u8]>::to_vec).unwrap_or_default();
    let arr = ExternalArray::from_vec(vec![rows, cols, 3], bytes).expect("valid benchmark array");
    group.throughput(Throughput::Bytes((rows * cols * 3) as u64));

    group.bench_function("to_native", |b| b.iter(|| to_native(black_box(&arr)).map(|img| img.rows())));

    group.bench_function("crop_image", |b| {
        b.iter(|| api::crop_image(black_box(&arr), 100, 100, 320, 240))
    });

    group.bench_function("to_grayscale", |b| b.iter(|| api::to_grayscale(black_box(&arr))));

    group.finish();
}

criterion_group!(benches, bench_filters, bench_geometry, bench_marshal);
criterion_main!(benches);
