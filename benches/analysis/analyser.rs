//! Benchmarks for the spectrum analyser.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_bridge::analysis::Analyser;
use saavy_bridge::graph::{GraphNode, RenderCtx, ToneNode};
use saavy_bridge::BridgeConfig;

use crate::FFT_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_analyser(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/analyser");
    let ctx = RenderCtx::new(SAMPLE_RATE);

    for &fft_size in FFT_SIZES {
        let config = BridgeConfig::new().fft_size(fft_size);
        let (mut analyser, mut input) =
            Analyser::new(SAMPLE_RATE, &config).expect("valid analyser config");

        // Fill the history once so the transform sees a real signal
        let mut signal = vec![0.0f32; fft_size];
        ToneNode::sine(1_000.0).render_block(&mut signal, &ctx);
        input.render_block(&mut signal, &ctx);

        // Byte spectrum (what the bridge reads every frame)
        let mut bytes = vec![0u8; analyser.frequency_bin_count()];
        group.bench_with_input(BenchmarkId::new("byte_spectrum", fft_size), &fft_size, |b, _| {
            b.iter(|| analyser.get_byte_frequency_data(black_box(&mut bytes)))
        });

        // Decibel spectrum
        let mut decibels = vec![0.0f32; analyser.frequency_bin_count()];
        group.bench_with_input(BenchmarkId::new("float_spectrum", fft_size), &fft_size, |b, _| {
            b.iter(|| analyser.get_float_frequency_data(black_box(&mut decibels)))
        });

        // Render-side insert: copying one block into the ring
        let mut block = vec![0.0f32; 128];
        ToneNode::sine(1_000.0).render_block(&mut block, &ctx);
        group.bench_with_input(BenchmarkId::new("input_block", fft_size), &fft_size, |b, _| {
            b.iter(|| {
                input.render_block(black_box(&mut block), black_box(&ctx));
                // Keep the ring from filling up
                analyser.get_float_time_domain_data(&mut signal);
            })
        });
    }

    group.finish();
}
