//! Change-detecting view of one band for UI code.
//!
//! The pump refreshes every frame whether or not the value moved. UI layers
//! usually only want to re-render when it did, so a [`BandObserver`] polls the
//! band on its own frame callback and calls `notify` only on change.

use std::ops::ControlFlow;

use crate::bridge::registry::BridgeRegistry;
use crate::frame::{FrameId, FrameLoop};

/// Observable snapshot of a single band.
#[derive(Clone)]
pub struct BandObserver {
    registry: BridgeRegistry,
    index: usize,
    enabled: bool,
}

impl BandObserver {
    /// Observe band 0 of whatever bridge `registry` holds.
    pub fn new(registry: BridgeRegistry) -> Self {
        Self {
            registry,
            index: 0,
            enabled: true,
        }
    }

    pub fn band(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// A disabled observer never polls and always snapshots 0.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start polling. `notify` runs once per frame in which the band differs
    /// from the last value it was notified for (initially the value at
    /// subscription time).
    pub fn subscribe<F>(&self, mut notify: F) -> Subscription
    where
        F: FnMut() + 'static,
    {
        let frames = self.registry.frames().clone();
        if !self.enabled {
            return Subscription { frames, id: None };
        }

        let registry = self.registry.clone();
        let index = self.index;
        let mut last = registry.band(index);
        let id = frames.request_frame(move |_, _| {
            let value = registry.band(index);
            if value != last {
                notify();
                last = value;
            }
            ControlFlow::Continue(())
        });
        Subscription {
            frames,
            id: Some(id),
        }
    }

    /// Current value of the observed band.
    pub fn snapshot(&self) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        self.registry.band(self.index)
    }

    /// Value for contexts without live audio (headless rendering, servers).
    pub fn server_snapshot(&self) -> f32 {
        0.0
    }
}

/// Handle to one polling loop. Dropping it stops the loop.
#[must_use = "dropping a Subscription stops polling immediately"]
pub struct Subscription {
    frames: FrameLoop,
    id: Option<FrameId>,
}

impl Subscription {
    pub fn is_polling(&self) -> bool {
        self.id.is_some_and(|id| self.frames.is_scheduled(id))
    }

    /// Stop polling.
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            self.frames.cancel_frame(id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
