//! Spectral tap: an analyser wired into a live audio context.

use tracing::debug;

use crate::analysis::analyser::Analyser;
use crate::analysis::SpectrumSource;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::graph::{AudioContext, GainNode, InsertId, NodeExt};

/// Interceptor and analyser inserted serially into a context's destination
/// path: `source → interceptor (unity gain) → analyser → device`.
///
/// The tap detaches itself when dropped.
pub struct SpectralTap {
    analyser: Analyser,
    context: AudioContext,
    insert: Option<InsertId>,
}

impl SpectralTap {
    /// Wire a new tap into `context`.
    ///
    /// Fails with [`BridgeError::NoAudioContext`] when there is no context to
    /// attach to.
    pub fn create(context: Option<&AudioContext>, config: &BridgeConfig) -> Result<Self> {
        let context = context.ok_or(BridgeError::NoAudioContext)?;
        let (analyser, input) = Analyser::new(context.sample_rate(), config)?;
        let insert = context.connect_insert(GainNode::unity().through(input))?;

        debug!(
            fft_size = analyser.fft_size(),
            smoothing = analyser.smoothing(),
            sample_rate = context.sample_rate(),
            "spectral tap connected"
        );

        Ok(Self {
            analyser,
            context: context.clone(),
            insert: Some(insert),
        })
    }

    pub fn analyser(&self) -> &Analyser {
        &self.analyser
    }

    pub fn analyser_mut(&mut self) -> &mut Analyser {
        &mut self.analyser
    }

    pub fn is_connected(&self) -> bool {
        self.insert.is_some()
    }

    /// Remove the insert. On failure the id is kept so a later call (or
    /// `Drop`) can retry, unless the context no longer knows it.
    fn detach(&mut self) -> bool {
        let Some(id) = self.insert else {
            return false;
        };
        let detached = self.context.disconnect_insert(id);
        if detached || !self.context.is_connected(id) {
            self.insert = None;
        }
        debug!(detached, "spectral tap disconnected");
        detached
    }
}

impl SpectrumSource for SpectralTap {
    fn frequency_bin_count(&self) -> usize {
        self.analyser.frequency_bin_count()
    }

    fn get_byte_frequency_data(&mut self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }

    fn get_float_time_domain_data(&mut self, out: &mut [f32]) -> bool {
        self.analyser.get_float_time_domain_data(out);
        true
    }

    fn set_smoothing(&mut self, smoothing: f32) -> bool {
        self.analyser.set_smoothing(smoothing).is_ok()
    }

    fn disconnect(&mut self) -> bool {
        self.detach()
    }
}

impl Drop for SpectralTap {
    fn drop(&mut self) {
        self.detach();
    }
}
