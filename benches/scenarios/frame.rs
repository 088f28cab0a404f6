//! Benchmarks for a full frame through the bridge.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_bridge::graph::{AudioContext, GraphNode, RenderCtx, ToneNode};
use saavy_bridge::{BandObserver, BridgeConfig, BridgeRegistry, FrameLoop};

use crate::BAND_COUNTS;

const SAMPLE_RATE: f32 = 48_000.0;
/// Samples rendered per 60 fps frame at 48kHz, rounded to whole blocks
const BLOCKS_PER_FRAME: usize = 6;
const BLOCK_SIZE: usize = 128;

pub fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/frame");

    for &band_count in BAND_COUNTS {
        let (context, mut destination) =
            AudioContext::new(SAMPLE_RATE, ToneNode::sweep(40.0, 8_000.0, 2.0));
        let config = BridgeConfig::new().band_count(band_count);
        let registry = BridgeRegistry::with_config(FrameLoop::new(), config);
        registry.init(Some(&context));

        let observer = BandObserver::new(registry.clone());
        let _subscription = observer.subscribe(|| {});

        let mut block = vec![0.0f32; BLOCK_SIZE];
        let mut ctx = RenderCtx::new(SAMPLE_RATE);
        let mut now_ms = 0.0;

        group.bench_with_input(
            BenchmarkId::new("pump_and_observe", band_count),
            &band_count,
            |b, _| {
                b.iter(|| {
                    for _ in 0..BLOCKS_PER_FRAME {
                        destination.render_block(&mut block, &ctx);
                        ctx.advance(BLOCK_SIZE);
                    }
                    now_ms += 16.7;
                    registry.frames().tick(black_box(now_ms));
                    black_box(registry.primary_band())
                })
            },
        );
    }

    group.finish();
}
