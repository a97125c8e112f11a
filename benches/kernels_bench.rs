// In smoothpack-core/benches/kernels_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use smoothpack::kernels::{bump, decode_series, encode_series, fletcher32_halfwords, transition};
use smoothpack::kernels::transition_to_constant_trapezoid;
use smoothpack::{pack_series, unpack_series, PackConfig};

// --- Mock Data Generation ---

/// A slowly drifting multi-channel signal, typical of sensor output.
fn generate_smooth_series(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(t, c)| {
        100.0 + (t as f64 * 0.001 * (c as f64 + 1.0)).sin()
    })
}

fn generate_random_halfwords(size: usize) -> Vec<u16> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..size).map(|_| rng.random()).collect()
}

// --- Benchmark Suite ---

const BENCH_GRID_SIZE: usize = 65_536;

fn bench_window_kernels(c: &mut Criterion) {
    let x = Array1::linspace(0.0f64, 1.0, BENCH_GRID_SIZE);
    let f = x.mapv(|v| (v * 10.0).sin());

    let mut group = c.benchmark_group("Window Kernels");
    group.bench_function("transition", |b| {
        b.iter(|| transition(black_box(x.view()), 0.25, 0.75, 0.0, 1.0).unwrap())
    });
    group.bench_function("bump", |b| {
        b.iter(|| bump(black_box(x.view()), 0.1, 0.3, 0.7, 0.9, 0.0, 1.0, 0.0).unwrap())
    });
    group.bench_function("transition_to_constant", |b| {
        b.iter(|| {
            transition_to_constant_trapezoid(black_box(f.view()), black_box(x.view()), 0.4, 0.6)
                .unwrap()
        })
    });
    group.finish();
}

fn bench_pretreatment_kernels(c: &mut Criterion) {
    let series = generate_smooth_series(BENCH_GRID_SIZE / 4, 4);
    let mut encoded = series.clone();
    encode_series(encoded.view_mut()).unwrap();
    let halfwords = generate_random_halfwords(BENCH_GRID_SIZE);

    let mut group = c.benchmark_group("Pretreatment Kernels");
    group.bench_function("xor_delta_encode", |b| {
        b.iter_batched(
            || series.clone(),
            |mut s| encode_series(s.view_mut()).unwrap(),
            criterion::BatchSize::LargeInput,
        )
    });
    group.bench_function("xor_delta_decode", |b| {
        b.iter_batched(
            || encoded.clone(),
            |mut s| decode_series(s.view_mut()).unwrap(),
            criterion::BatchSize::LargeInput,
        )
    });
    group.bench_function("fletcher32", |b| {
        b.iter(|| fletcher32_halfwords(black_box(&halfwords)))
    });
    group.finish();
}

fn bench_frame_roundtrip(c: &mut Criterion) {
    let series = generate_smooth_series(BENCH_GRID_SIZE / 4, 4);
    let config = PackConfig::default();
    let frame = pack_series(series.view(), &config).unwrap();

    let mut group = c.benchmark_group("Frame");
    group.bench_function("pack_series", |b| {
        b.iter(|| pack_series(black_box(series.view()), &config).unwrap())
    });
    group.bench_function("unpack_series", |b| {
        b.iter(|| unpack_series::<f64>(black_box(&frame)).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_window_kernels,
    bench_pretreatment_kernels,
    bench_frame_roundtrip
);
criterion_main!(benches);
