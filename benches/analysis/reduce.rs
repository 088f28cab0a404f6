//! Benchmarks for band reduction.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_bridge::analysis::reduce;

use crate::{BAND_COUNTS, FFT_SIZES};

pub fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/reduce");

    for &fft_size in FFT_SIZES {
        // Falling ramp, loud lows and quiet highs
        let bins = fft_size / 2;
        let raw: Vec<u8> = (0..bins)
            .map(|i| (255 - i * 255 / bins) as u8)
            .collect();

        for &band_count in BAND_COUNTS {
            let mut bands = vec![0.0f32; band_count];
            let id = BenchmarkId::new(format!("{band_count}_bands"), bins);
            group.bench_with_input(id, &bins, |b, _| {
                b.iter(|| reduce(black_box(&raw), black_box(&mut bands)))
            });
        }
    }

    group.finish();
}
