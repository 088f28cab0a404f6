//! Error types for the analysis bridge.
//!
//! Only construction and configuration can fail. Steady-state accessors on an
//! inactive bridge return neutral values instead of errors.

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// No audio context was handed to the bridge.
    #[error("no audio context available")]
    NoAudioContext,

    #[error("fft size must be a power of two in [{min}, {max}], got {got}", min = crate::config::MIN_FFT_SIZE, max = crate::config::MAX_FFT_SIZE)]
    InvalidFftSize { got: usize },

    #[error("smoothing must be within [0, 1], got {0}")]
    InvalidSmoothing(f32),

    #[error("decibel range is empty: min {min} dB must be below max {max} dB")]
    InvalidDecibelRange { min: f32, max: f32 },

    /// The audio context cannot accept another insert.
    #[error("audio context has no free insert slot")]
    RoutingFull,
}
