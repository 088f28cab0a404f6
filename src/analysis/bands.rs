//! Band reduction.
//!
//! Collapses a byte spectrum of hundreds of bins into a few normalized
//! bands by contiguous averaging. Band `i` of `N` covers raw bins
//! `[floor(i * R / N), floor((i + 1) * R / N))`; low bands come first.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

const MAX_RAW: f32 = u8::MAX as f32;

/// Reduce `raw` into `bands.len()` averages normalized to `[0, 1]`.
///
/// A band whose partition is empty (more bands than bins) reads 0.
pub fn reduce(raw: &[u8], bands: &mut [f32]) {
    let raw_len = raw.len();
    let count = bands.len();
    for (i, band) in bands.iter_mut().enumerate() {
        let start = i * raw_len / count;
        let end = (i + 1) * raw_len / count;
        let slice = &raw[start..end];
        *band = if slice.is_empty() {
            0.0
        } else {
            let sum: u32 = slice.iter().map(|&b| b as u32).sum();
            sum as f32 / slice.len() as f32 / MAX_RAW
        };
    }
}

/// Shared handle to a live band vector.
///
/// Clones observe the same storage, so a reader holding a `Bands` sees every
/// refresh and rebinning without fetching it again.
#[derive(Clone, Default)]
pub struct Bands {
    values: Rc<RefCell<Vec<f32>>>,
}

impl Bands {
    /// `count` zeroed bands.
    pub fn new(count: usize) -> Self {
        Self {
            values: Rc::new(RefCell::new(vec![0.0; count])),
        }
    }

    /// A detached handle with no bands.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    /// Band at `index`, or 0 when out of range.
    pub fn get(&self, index: usize) -> f32 {
        self.values.borrow().get(index).copied().unwrap_or(0.0)
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.values.borrow().clone()
    }

    /// Borrow the values. Do not hold the guard across a refresh.
    pub fn values(&self) -> Ref<'_, [f32]> {
        Ref::map(self.values.borrow(), Vec::as_slice)
    }

    /// Whether both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Bands) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }

    /// Replace the contents with `count` zeros.
    pub(crate) fn reset(&self, count: usize) {
        let mut values = self.values.borrow_mut();
        values.clear();
        values.resize(count, 0.0);
    }

    /// Zero every band, keeping the count.
    pub(crate) fn silence(&self) {
        self.values.borrow_mut().fill(0.0);
    }

    pub(crate) fn refresh_from(&self, raw: &[u8]) {
        reduce(raw, &mut self.values.borrow_mut());
    }

    /// Overwrite one band, clamped into `[0, 1]`. Returns `false` when out of range.
    pub(crate) fn set(&self, index: usize, value: f32) -> bool {
        match self.values.borrow_mut().get_mut(index) {
            Some(band) => {
                *band = clamp_unit(value);
                true
            }
            None => false,
        }
    }

    pub(crate) fn assign(&self, values: &[f32]) {
        let mut bands = self.values.borrow_mut();
        bands.clear();
        bands.extend(values.iter().map(|&value| clamp_unit(value)));
    }
}

impl std::fmt::Debug for Bands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values().iter()).finish()
    }
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
