//! Frequency analyser fed from the audio thread.
//!
//! The render side ([`AnalyserInput`]) copies every sample it sees into a
//! wait-free ring and leaves the buffer alone. The control side
//! ([`Analyser`]) drains that ring into a circular history of `fft_size`
//! samples and turns the most recent window into a smoothed magnitude
//! spectrum on request. Every buffer is sized at construction; reading the
//! spectrum never allocates.

use std::sync::Arc;

use rtrb::{Consumer, Producer, PushError, RingBuffer};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::analysis::window::blackman;
use crate::config::{validate_smoothing, BridgeConfig};
use crate::error::Result;
use crate::graph::node::{GraphNode, RenderCtx};

/// Ring capacity in transform windows.
const RING_BLOCKS: usize = 16;

/// Render-side half of the analyser: forwards samples, changes nothing.
pub struct AnalyserInput {
    tx: Producer<f32>,
}

impl GraphNode for AnalyserInput {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        for &sample in out.iter() {
            if let Err(PushError::Full(_)) = self.tx.push(sample) {
                break; // UI fell behind; drop the rest of the block
            }
        }
    }
}

pub struct Analyser {
    fft: Arc<dyn Fft<f32>>,
    rx: Consumer<f32>,
    sample_rate: f32,
    /// Blackman coefficients, one per history sample
    window: Vec<f32>,
    /// Circular time-domain history; `write_pos` is the oldest sample
    history: Vec<f32>,
    write_pos: usize,
    spectrum: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Smoothed linear magnitudes, one per frequency bin
    smoothed: Vec<f32>,
    smoothing: f32,
    min_decibels: f32,
    max_decibels: f32,
}

impl Analyser {
    /// Build a connected analyser pair for a graph running at `sample_rate`.
    pub fn new(sample_rate: f32, config: &BridgeConfig) -> Result<(Self, AnalyserInput)> {
        config.validate()?;
        let fft_size = config.fft_size;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        let (tx, rx) = RingBuffer::<f32>::new(fft_size * RING_BLOCKS);

        let analyser = Self {
            fft,
            rx,
            sample_rate,
            window: blackman(fft_size),
            history: vec![0.0; fft_size],
            write_pos: 0,
            spectrum: vec![Complex::new(0.0, 0.0); fft_size],
            scratch,
            smoothed: vec![0.0; config.frequency_bin_count()],
            smoothing: config.smoothing,
            min_decibels: config.min_decibels,
            max_decibels: config.max_decibels,
        };
        Ok((analyser, AnalyserInput { tx }))
    }

    pub fn fft_size(&self) -> usize {
        self.history.len()
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.smoothed.len()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Centre frequency of `bin` in Hz.
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate / self.fft_size() as f32
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn set_smoothing(&mut self, smoothing: f32) -> Result<()> {
        validate_smoothing(smoothing)?;
        self.smoothing = smoothing;
        Ok(())
    }

    pub fn decibel_range(&self) -> (f32, f32) {
        (self.min_decibels, self.max_decibels)
    }

    /// Move pending samples from the ring into the history.
    fn drain(&mut self) -> usize {
        let len = self.history.len();
        let mut drained = 0;
        while let Ok(sample) = self.rx.pop() {
            self.history[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % len;
            drained += 1;
        }
        drained
    }

    /// Window the latest history, transform it and fold the magnitudes into
    /// the smoothed spectrum.
    fn analyse(&mut self) {
        self.drain();

        let len = self.history.len();
        for (i, bin) in self.spectrum.iter_mut().enumerate() {
            let sample = self.history[(self.write_pos + i) % len];
            *bin = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        let scale = 1.0 / len as f32;
        let tau = self.smoothing;
        for (smoothed, bin) in self.smoothed.iter_mut().zip(&self.spectrum) {
            let value = tau * *smoothed + (1.0 - tau) * bin.norm() * scale;
            *smoothed = if value.is_finite() { value } else { 0.0 };
        }
    }

    /// Smoothed spectrum in decibels, one value per bin.
    pub fn get_float_frequency_data(&mut self, out: &mut [f32]) {
        self.analyse();
        for (o, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            *o = linear_to_decibels(magnitude);
        }
    }

    /// Smoothed spectrum mapped from `[min_decibels, max_decibels]` onto
    /// `[0, 255]`, one byte per bin.
    pub fn get_byte_frequency_data(&mut self, out: &mut [u8]) {
        self.analyse();
        let range_scale = u8::MAX as f32 / (self.max_decibels - self.min_decibels);
        for (o, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            let db = linear_to_decibels(magnitude);
            let scaled = (db - self.min_decibels) * range_scale;
            *o = scaled.clamp(0.0, u8::MAX as f32) as u8;
        }
    }

    /// Latest `fft_size` samples, oldest first.
    pub fn get_float_time_domain_data(&mut self, out: &mut [f32]) {
        self.drain();
        let len = self.history.len();
        for (i, o) in out.iter_mut().take(len).enumerate() {
            *o = self.history[(self.write_pos + i) % len];
        }
    }

    /// Latest `fft_size` samples as bytes centred on 128.
    pub fn get_byte_time_domain_data(&mut self, out: &mut [u8]) {
        self.drain();
        let len = self.history.len();
        for (i, o) in out.iter_mut().take(len).enumerate() {
            let sample = self.history[(self.write_pos + i) % len];
            *o = (128.0 * (sample + 1.0)).clamp(0.0, u8::MAX as f32) as u8;
        }
    }
}

#[inline]
fn linear_to_decibels(magnitude: f32) -> f32 {
    if magnitude > 0.0 {
        20.0 * magnitude.log10()
    } else {
        f32::NEG_INFINITY
    }
}
