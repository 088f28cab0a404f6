use std::cell::Cell;
use std::rc::Rc;

use saavy_bridge::{
    analysis::SpectrumSource,
    graph::{AudioContext, Destination, GraphNode, RenderCtx, ToneNode},
    Bridge, BridgeConfig, BridgeRegistry, FrameLoop,
};

/// Spectrum source that reports the same byte in every bin.
struct Flat {
    value: u8,
    reads: Rc<Cell<usize>>,
}

impl SpectrumSource for Flat {
    fn frequency_bin_count(&self) -> usize {
        512
    }

    fn get_byte_frequency_data(&mut self, out: &mut [u8]) {
        self.reads.set(self.reads.get() + 1);
        out.fill(self.value);
    }
}

fn flat_bridge(value: u8, band_count: usize) -> (Rc<Bridge>, Rc<Cell<usize>>) {
    let reads = Rc::new(Cell::new(0));
    let source = Flat {
        value,
        reads: reads.clone(),
    };
    (Rc::new(Bridge::new(Box::new(source), band_count)), reads)
}

fn live_context() -> (AudioContext, Destination<ToneNode>) {
    AudioContext::new(48_000.0, ToneNode::sine(440.0))
}

fn render(destination: &mut Destination<ToneNode>, blocks: usize) {
    let mut block = vec![0.0; 1024];
    let mut ctx = RenderCtx::new(48_000.0);
    for _ in 0..blocks {
        destination.render_block(&mut block, &ctx);
        ctx.advance(block.len());
    }
}

#[test]
fn inactive_registry_returns_neutral_values() {
    let registry = BridgeRegistry::new(FrameLoop::new());

    assert!(!registry.is_active());
    assert!(registry.instance().is_none());
    assert_eq!(registry.band(0), 0.0);
    assert_eq!(registry.primary_band(), 0.0);
    assert!(registry.all_bands().is_empty());
    assert_eq!(registry.band_count(), 0);
    assert!(!registry.set_band_count(8));
    assert!(!registry.set_smoothing(0.5));
    assert!(!registry.refresh());
    assert!(!registry.disconnect());
}

#[test]
fn init_without_context_stays_inactive() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    assert!(registry.init(None).is_none());
    assert!(!registry.is_active());
    assert_eq!(registry.frames().pending(), 0);
}

#[test]
fn init_with_invalid_config_stays_inactive() {
    let (context, _destination) = live_context();
    let config = BridgeConfig::new().fft_size(1000);
    let registry = BridgeRegistry::with_config(FrameLoop::new(), config);

    assert!(registry.init(Some(&context)).is_none());
    assert!(!registry.is_active());
    assert_eq!(context.insert_count(), 0);
}

#[test]
fn init_and_disconnect_round_trip() {
    let (context, mut destination) = live_context();
    let registry = BridgeRegistry::new(FrameLoop::new());

    let bridge = registry.init(Some(&context)).expect("bridge");
    assert!(registry.is_active());
    assert_eq!(registry.band_count(), 4);
    assert_eq!(context.insert_count(), 1);
    assert!(Rc::ptr_eq(&bridge, &registry.instance().expect("instance")));

    render(&mut destination, 2);
    assert_eq!(destination.insert_count(), 1);

    assert!(registry.disconnect());
    assert!(!registry.is_active());
    assert!(!bridge.is_alive());
    assert_eq!(context.insert_count(), 0);

    render(&mut destination, 1);
    assert_eq!(destination.insert_count(), 0);
}

#[test]
fn second_disconnect_is_false() {
    let (context, _destination) = live_context();
    let registry = BridgeRegistry::new(FrameLoop::new());
    registry.init(Some(&context));

    assert!(registry.disconnect());
    assert!(!registry.disconnect());
    assert!(registry.instance().is_none());
    assert_eq!(registry.band_count(), 0);
}

#[test]
fn reinit_replaces_previous_tap() {
    let (context, _destination) = live_context();
    let registry = BridgeRegistry::new(FrameLoop::new());

    let first = registry.init(Some(&context)).expect("first bridge");
    let second = registry.init(Some(&context)).expect("second bridge");

    assert!(!first.is_alive());
    assert!(second.is_alive());
    assert_eq!(context.insert_count(), 1);
    assert!(Rc::ptr_eq(&second, &registry.instance().expect("instance")));

    // The first pump drops out on the next frame
    registry.frames().tick(0.0);
    assert_eq!(registry.frames().pending(), 1);
}

#[test]
fn reinit_against_idle_destination_never_leaks_a_tap() {
    let (context, mut destination) = live_context();
    let registry = BridgeRegistry::new(FrameLoop::new());

    // The destination never renders, so no route change is consumed
    let mut published = 0;
    for _ in 0..17 {
        if registry.init(Some(&context)).is_some() {
            published += 1;
        }
        assert_eq!(context.insert_count(), 1);
        assert!(registry.is_active());
    }
    assert!(published > 1);

    // Once the audio side catches up only the latest tap is left running
    render(&mut destination, 1);
    assert_eq!(destination.insert_count(), 1);

    assert!(registry.init(Some(&context)).is_some());
    assert_eq!(context.insert_count(), 1);
    render(&mut destination, 1);
    assert_eq!(destination.insert_count(), 1);

    assert!(registry.disconnect());
    render(&mut destination, 1);
    assert_eq!(destination.insert_count(), 0);
    assert_eq!(context.insert_count(), 0);
}

#[test]
fn pump_stops_on_first_frame_after_disconnect() {
    let (context, _destination) = live_context();
    let registry = BridgeRegistry::new(FrameLoop::new());
    let bridge = registry.init(Some(&context)).expect("bridge");

    registry.frames().tick(0.0);
    registry.frames().tick(16.0);
    assert_eq!(registry.frames().pending(), 1);

    bridge.disconnect();
    registry.frames().tick(32.0);
    assert_eq!(registry.frames().pending(), 0);
}

#[test]
fn uniform_spectrum_reduces_to_half_scale() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let (bridge, reads) = flat_bridge(128, 4);
    registry.install(bridge);

    registry.frames().tick(0.0);
    assert_eq!(reads.get(), 1);

    let bands = registry.all_bands().to_vec();
    assert_eq!(bands.len(), 4);
    for band in bands {
        assert!((band - 0.502).abs() < 0.05, "band {band}");
    }
}

#[test]
fn pump_refreshes_once_per_frame_without_readers() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let (bridge, reads) = flat_bridge(10, 4);
    registry.install(bridge.clone());
    registry.install(bridge);

    for t in 0..5 {
        registry.frames().tick(t as f64 * 16.0);
    }
    assert_eq!(reads.get(), 5);
}

#[test]
fn rebinning_resets_bands_to_zero() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let bridge = registry.install(Rc::new(Bridge::detached(4)));
    bridge.set_test_mode(true);
    assert!(bridge.inject_bands(&[0.9, 0.8, 0.7, 0.6]));

    assert!(registry.set_band_count(8));
    assert_eq!(registry.all_bands().to_vec(), vec![0.0; 8]);
}

#[test]
fn set_band_count_yields_that_many_zeros() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let (bridge, _) = flat_bridge(200, 4);
    registry.install(bridge);
    registry.refresh();

    for count in 1..=32 {
        assert!(registry.set_band_count(count));
        let bands = registry.all_bands();
        assert_eq!(bands.len(), count);
        assert!(bands.values().iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_mode_keeps_injected_values() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let (bridge, reads) = flat_bridge(255, 4);
    registry.install(bridge.clone());

    bridge.set_test_mode(true);
    bridge.inject_bands(&[0.1, 0.2, 0.3, 0.4]);
    assert!(registry.refresh());
    registry.frames().tick(0.0);

    assert_eq!(reads.get(), 0);
    assert_eq!(registry.all_bands().to_vec(), vec![0.1, 0.2, 0.3, 0.4]);
}

#[test]
fn injected_values_are_clamped() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let bridge = registry.install(Rc::new(Bridge::detached(3)));
    bridge.inject_bands(&[-0.5, 1.5, f32::NAN]);
    assert_eq!(registry.all_bands().to_vec(), vec![0.0, 1.0, 0.0]);

    assert!(bridge.inject_band(1, 0.25));
    assert!(!bridge.inject_band(3, 0.25));
    assert_eq!(registry.band(1), 0.25);
}

#[test]
fn out_of_range_band_is_zero_and_primary_is_band_zero() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let bridge = registry.install(Rc::new(Bridge::detached(4)));
    bridge.inject_bands(&[0.9, 0.8, 0.7, 0.6]);

    assert_eq!(registry.band(4), 0.0);
    assert_eq!(registry.band(usize::MAX), 0.0);
    assert_eq!(registry.primary_band(), registry.band(0));
    assert_eq!(registry.primary_band(), 0.9);
}

#[test]
fn band_handle_is_live_until_disconnect() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let (bridge, _) = flat_bridge(255, 4);
    registry.install(bridge);

    let bands = registry.all_bands();
    assert_eq!(bands.to_vec(), vec![0.0; 4]);

    registry.frames().tick(0.0);
    assert_eq!(bands.to_vec(), vec![1.0; 4]);
    assert!(bands.ptr_eq(&registry.all_bands()));

    registry.disconnect();
    assert_eq!(bands.to_vec(), vec![0.0; 4]);
    assert!(registry.all_bands().is_empty());
}

#[test]
fn disconnect_without_capability_still_clears_slot() {
    let registry = BridgeRegistry::new(FrameLoop::new());
    let (bridge, _) = flat_bridge(1, 4);
    registry.install(bridge);

    assert!(!registry.disconnect());
    assert!(!registry.is_active());
    assert!(registry.instance().is_none());
}

#[test]
fn smoothing_reaches_the_analyser() {
    let (context, _destination) = live_context();
    let registry = BridgeRegistry::new(FrameLoop::new());
    registry.init(Some(&context));

    assert!(registry.set_smoothing(0.0));
    assert!(registry.set_smoothing(1.0));
    assert!(!registry.set_smoothing(1.5));
    assert!(!registry.set_smoothing(f32::NAN));
}
