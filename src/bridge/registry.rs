//! The application-owned slot holding the currently active bridge.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info, trace, warn};

use crate::analysis::{Bands, SpectralTap};
use crate::bridge::{pump, state::Bridge};
use crate::config::BridgeConfig;
use crate::frame::FrameLoop;
use crate::graph::AudioContext;

/// Holds at most one active [`Bridge`] and answers for it.
///
/// Every accessor is safe with nothing active and returns a neutral value:
/// `0.0`, an empty [`Bands`], `0` or `false`. Audio starts and stops
/// asynchronously relative to the UI and visuals, so callers never need to
/// check first.
///
/// Cheap to clone; clones share the same slot.
#[derive(Clone)]
pub struct BridgeRegistry {
    inner: Rc<RegistryInner>,
}

struct RegistryInner {
    frames: FrameLoop,
    config: BridgeConfig,
    active: RefCell<Option<Rc<Bridge>>>,
}

impl BridgeRegistry {
    pub fn new(frames: FrameLoop) -> Self {
        Self::with_config(frames, BridgeConfig::default())
    }

    pub fn with_config(frames: FrameLoop, config: BridgeConfig) -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                frames,
                config,
                active: RefCell::new(None),
            }),
        }
    }

    pub fn frames(&self) -> &FrameLoop {
        &self.inner.frames
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.inner.config
    }

    /// Tap `context`, publish the new bridge and start its pump.
    ///
    /// Returns `None` (and logs) when there is no context or the tap cannot
    /// be wired. An already active bridge is disconnected first.
    pub fn init(&self, context: Option<&AudioContext>) -> Option<Rc<Bridge>> {
        let tap = match SpectralTap::create(context, &self.inner.config) {
            Ok(tap) => tap,
            Err(err) => {
                error!(%err, "failed to initialise audio bridge");
                return None;
            }
        };
        let bridge = Rc::new(Bridge::new(Box::new(tap), self.inner.config.band_count));
        info!(
            band_count = bridge.band_count(),
            fft_size = self.inner.config.fft_size,
            "audio bridge initialised"
        );
        Some(self.install(bridge))
    }

    /// Publish a prebuilt bridge and start its pump, replacing (and
    /// disconnecting) any active one.
    pub fn install(&self, bridge: Rc<Bridge>) -> Rc<Bridge> {
        let previous = self.inner.active.replace(Some(bridge.clone()));
        if let Some(previous) = previous {
            if Rc::ptr_eq(&previous, &bridge) {
                return bridge; // already published and pumping
            }
            warn!("replacing active audio bridge, disconnecting the previous one");
            previous.disconnect();
        }
        pump::start(&self.inner.frames, &bridge);
        bridge
    }

    /// The active bridge, if any.
    pub fn instance(&self) -> Option<Rc<Bridge>> {
        self.inner.active.borrow().clone()
    }

    fn with_active<R>(&self, neutral: R, f: impl FnOnce(&Bridge) -> R) -> R {
        match self.inner.active.borrow().as_deref() {
            Some(bridge) if bridge.is_alive() => f(bridge),
            _ => {
                trace!("audio bridge inactive");
                neutral
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.with_active(false, |_| true)
    }

    /// Band at `index`; 0 when inactive or out of range.
    pub fn band(&self, index: usize) -> f32 {
        self.with_active(0.0, |bridge| bridge.band(index))
    }

    /// Same as `band(0)`: the lowest-frequency aggregate.
    pub fn primary_band(&self) -> f32 {
        self.band(0)
    }

    /// The live band handle (shared, not copied), or an empty one.
    pub fn all_bands(&self) -> Bands {
        self.with_active(Bands::empty(), Bridge::bands)
    }

    pub fn band_count(&self) -> usize {
        self.with_active(0, Bridge::band_count)
    }

    pub fn set_band_count(&self, count: usize) -> bool {
        self.with_active(false, |bridge| bridge.set_band_count(count))
    }

    pub fn set_smoothing(&self, smoothing: f32) -> bool {
        self.with_active(false, |bridge| bridge.set_smoothing(smoothing))
    }

    /// Force one reduction pass outside the pump.
    pub fn refresh(&self) -> bool {
        self.with_active(false, Bridge::refresh)
    }

    /// Detach the active bridge and clear the slot.
    ///
    /// Returns `false` when nothing is active. The slot is cleared even if
    /// the source cannot detach itself, in which case the result is `false`.
    pub fn disconnect(&self) -> bool {
        let Some(bridge) = self.inner.active.borrow_mut().take() else {
            return false;
        };
        let detached = bridge.disconnect();
        info!(detached, "audio bridge disconnected");
        detached
    }
}
