//! Bridge configuration.
//!
//! Defaults match the analysis settings the visual engine was tuned against:
//! a 1024-point transform, 0.8 temporal smoothing and four bands.

use std::cmp::Ordering;

use crate::error::{BridgeError, Result};

pub const DEFAULT_FFT_SIZE: usize = 1024;
pub const DEFAULT_SMOOTHING: f32 = 0.8;
pub const DEFAULT_MIN_DECIBELS: f32 = -100.0;
pub const DEFAULT_MAX_DECIBELS: f32 = -30.0;
pub const DEFAULT_BAND_COUNT: usize = 4;

pub const MIN_FFT_SIZE: usize = 32;
pub const MAX_FFT_SIZE: usize = 32_768;

/// Analysis and reduction settings for a bridge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeConfig {
    /// Transform size in samples (power of two).
    pub fft_size: usize,
    /// Per-bin temporal smoothing in `[0, 1]`; higher is slower.
    pub smoothing: f32,
    /// Level mapped to byte 0.
    pub min_decibels: f32,
    /// Level mapped to byte 255.
    pub max_decibels: f32,
    /// Initial number of reduced bands (clamped to at least 1).
    pub band_count: usize,
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            smoothing: DEFAULT_SMOOTHING,
            min_decibels: DEFAULT_MIN_DECIBELS,
            max_decibels: DEFAULT_MAX_DECIBELS,
            band_count: DEFAULT_BAND_COUNT,
        }
    }

    pub fn fft_size(mut self, fft_size: usize) -> Self {
        self.fft_size = fft_size;
        self
    }

    pub fn smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn decibel_range(mut self, min_decibels: f32, max_decibels: f32) -> Self {
        self.min_decibels = min_decibels;
        self.max_decibels = max_decibels;
        self
    }

    pub fn band_count(mut self, band_count: usize) -> Self {
        self.band_count = band_count.max(1);
        self
    }

    /// Number of frequency bins produced per analysis (half the transform).
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Check every field against the ranges the analyser accepts.
    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two()
            || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&self.fft_size)
        {
            return Err(BridgeError::InvalidFftSize { got: self.fft_size });
        }
        validate_smoothing(self.smoothing)?;
        if self.min_decibels.partial_cmp(&self.max_decibels) != Some(Ordering::Less) {
            return Err(BridgeError::InvalidDecibelRange {
                min: self.min_decibels,
                max: self.max_decibels,
            });
        }
        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_smoothing(smoothing: f32) -> Result<()> {
    if (0.0..=1.0).contains(&smoothing) {
        Ok(())
    } else {
        Err(BridgeError::InvalidSmoothing(smoothing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BridgeConfig::default();
        assert_eq!(config.fft_size, 1024);
        assert_eq!(config.frequency_bin_count(), 512);
        assert_eq!(config.band_count, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_power_of_two_fft() {
        let config = BridgeConfig::new().fft_size(1000);
        assert_eq!(
            config.validate(),
            Err(BridgeError::InvalidFftSize { got: 1000 })
        );
        assert!(BridgeConfig::new().fft_size(16).validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_smoothing() {
        assert!(BridgeConfig::new().smoothing(1.5).validate().is_err());
        assert!(BridgeConfig::new().smoothing(f32::NAN).validate().is_err());
        assert!(BridgeConfig::new().smoothing(0.0).validate().is_ok());
    }

    #[test]
    fn rejects_inverted_decibel_range() {
        let config = BridgeConfig::new().decibel_range(-30.0, -100.0);
        assert!(matches!(
            config.validate(),
            Err(BridgeError::InvalidDecibelRange { .. })
        ));
    }

    #[test]
    fn band_count_clamps_to_one() {
        assert_eq!(BridgeConfig::new().band_count(0).band_count, 1);
    }
}
