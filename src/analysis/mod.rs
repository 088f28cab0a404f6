//! Spectral analysis: the tap that watches the audio graph and the reducer
//! that turns its spectrum into a few bands.

/// FFT analyser with ring-fed history and temporal smoothing.
pub mod analyser;
/// Contiguous-average band reduction and the shared band handle.
pub mod bands;
/// Analyser wired into an audio context.
pub mod tap;
/// Analysis window coefficients.
pub mod window;

pub use analyser::{Analyser, AnalyserInput};
pub use bands::{reduce, Bands};
pub use tap::SpectralTap;

/// What a bridge needs from whatever produces its spectrum.
///
/// Only the byte spectrum is required. The remaining methods are optional
/// capabilities; the defaults report `false`, meaning "not supported".
pub trait SpectrumSource {
    /// Length of the byte spectrum written by [`get_byte_frequency_data`](Self::get_byte_frequency_data).
    fn frequency_bin_count(&self) -> usize;

    /// Copy the latest byte spectrum into `out`.
    fn get_byte_frequency_data(&mut self, out: &mut [u8]);

    /// Copy the latest time-domain window into `out`.
    fn get_float_time_domain_data(&mut self, _out: &mut [f32]) -> bool {
        false
    }

    fn set_smoothing(&mut self, _smoothing: f32) -> bool {
        false
    }

    /// Detach from the audio graph.
    fn disconnect(&mut self) -> bool {
        false
    }
}
