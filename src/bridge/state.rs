use std::cell::{Cell, RefCell};

use crate::analysis::{Bands, SpectrumSource};

/// One bridge instance: a spectrum source, the raw byte buffer it fills and
/// the reduced bands.
///
/// Every operation is safe after [`disconnect`](Self::disconnect): reads
/// return 0 or an empty [`Bands`], mutators return `false`.
pub struct Bridge {
    source: RefCell<Option<Box<dyn SpectrumSource>>>,
    /// Reused every refresh; sized to the source's bin count
    raw: RefCell<Vec<u8>>,
    bands: Bands,
    alive: Cell<bool>,
    test_mode: Cell<bool>,
}

impl Bridge {
    pub fn new(source: Box<dyn SpectrumSource>, band_count: usize) -> Self {
        let bins = source.frequency_bin_count();
        Self {
            source: RefCell::new(Some(source)),
            raw: RefCell::new(vec![0; bins]),
            bands: Bands::new(band_count.max(1)),
            alive: Cell::new(true),
            test_mode: Cell::new(false),
        }
    }

    /// A bridge with no spectrum source. Refreshing it fails; bands only
    /// change through injection.
    pub fn detached(band_count: usize) -> Self {
        Self {
            source: RefCell::new(None),
            raw: RefCell::new(Vec::new()),
            bands: Bands::new(band_count.max(1)),
            alive: Cell::new(true),
            test_mode: Cell::new(false),
        }
    }

    /// True until [`disconnect`](Self::disconnect) runs.
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn band(&self, index: usize) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        self.bands.get(index)
    }

    /// The live band handle, or an empty one once disconnected.
    pub fn bands(&self) -> Bands {
        if self.is_alive() {
            self.bands.clone()
        } else {
            Bands::empty()
        }
    }

    pub fn band_count(&self) -> usize {
        if self.is_alive() {
            self.bands.len()
        } else {
            0
        }
    }

    /// Replace the bands with `count` zeros (at least one).
    pub fn set_band_count(&self, count: usize) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.bands.reset(count.max(1));
        true
    }

    /// Pull the latest spectrum and recompute the bands.
    ///
    /// In test mode this succeeds without touching the source, leaving
    /// injected values in place.
    pub fn refresh(&self) -> bool {
        if !self.is_alive() {
            return false;
        }
        if self.test_mode.get() {
            return true;
        }
        let mut source = self.source.borrow_mut();
        let Some(source) = source.as_mut() else {
            return false;
        };
        let mut raw = self.raw.borrow_mut();
        source.get_byte_frequency_data(&mut raw);
        self.bands.refresh_from(&raw);
        true
    }

    /// Detach the source and mark the bridge dead. Shared band handles read
    /// zeros from here on.
    ///
    /// Returns `false` when already disconnected or when the source cannot
    /// detach itself.
    pub fn disconnect(&self) -> bool {
        if !self.alive.replace(false) {
            return false;
        }
        self.bands.silence();
        let source = self.source.borrow_mut().take();
        match source {
            Some(mut source) => source.disconnect(),
            None => true,
        }
    }

    pub fn set_smoothing(&self, smoothing: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.source.borrow_mut().as_mut() {
            Some(source) => source.set_smoothing(smoothing),
            None => false,
        }
    }

    /// When set, [`refresh`](Self::refresh) leaves the bands alone so tests
    /// can inject deterministic values.
    pub fn set_test_mode(&self, enabled: bool) {
        self.test_mode.set(enabled);
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode.get()
    }

    /// Overwrite one band, clamped into `[0, 1]`.
    pub fn inject_band(&self, index: usize, value: f32) -> bool {
        self.is_alive() && self.bands.set(index, value)
    }

    /// Replace all bands with `values`, clamped into `[0, 1]`. The band count
    /// follows `values.len()`; an empty slice is rejected.
    pub fn inject_bands(&self, values: &[f32]) -> bool {
        if !self.is_alive() || values.is_empty() {
            return false;
        }
        self.bands.assign(values);
        true
    }

    /// Run `f` over the byte spectrum read by the last refresh.
    pub fn with_raw<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.raw.borrow())
    }

    /// Copy the source's latest time-domain window into `out`.
    pub fn waveform(&self, out: &mut [f32]) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.source.borrow_mut().as_mut() {
            Some(source) => source.get_float_time_domain_data(out),
            None => false,
        }
    }
}
