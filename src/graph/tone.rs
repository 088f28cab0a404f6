//! Sine test source with an optional exponential sweep.

use std::f32::consts::TAU;

use crate::graph::node::{GraphNode, RenderCtx};

pub struct ToneNode {
    from_hz: f32,
    to_hz: f32,
    sweep_secs: f32,
    amplitude: f32,
    phase: f32,
    elapsed: f32,
}

impl ToneNode {
    /// Fixed-frequency sine at full scale.
    pub fn sine(frequency: f32) -> Self {
        Self {
            from_hz: frequency,
            to_hz: frequency,
            sweep_secs: 0.0,
            amplitude: 1.0,
            phase: 0.0,
            elapsed: 0.0,
        }
    }

    /// Sine that glides from `from_hz` to `to_hz` over `sweep_secs`, then
    /// starts over.
    pub fn sweep(from_hz: f32, to_hz: f32, sweep_secs: f32) -> Self {
        Self {
            from_hz,
            to_hz,
            sweep_secs: sweep_secs.max(0.0),
            ..Self::sine(from_hz)
        }
    }

    pub fn amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Frequency at the current sweep position.
    pub fn frequency(&self) -> f32 {
        if self.sweep_secs <= 0.0 || self.from_hz <= 0.0 || self.to_hz <= 0.0 {
            return self.from_hz;
        }
        let t = (self.elapsed / self.sweep_secs).clamp(0.0, 1.0);
        self.from_hz * (self.to_hz / self.from_hz).powf(t)
    }
}

impl GraphNode for ToneNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if ctx.sample_rate <= 0.0 {
            out.fill(0.0);
            return;
        }
        let dt = 1.0 / ctx.sample_rate;
        for sample in out.iter_mut() {
            *sample = (self.phase * TAU).sin() * self.amplitude;

            self.phase += self.frequency() * dt;
            self.phase -= self.phase.floor();

            if self.sweep_secs > 0.0 {
                self.elapsed += dt;
                if self.elapsed >= self.sweep_secs {
                    self.elapsed -= self.sweep_secs;
                }
            }
        }
    }
}
