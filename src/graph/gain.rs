use crate::graph::node::{GraphNode, RenderCtx};

/// In-place gain stage.
///
/// At unity the node leaves the buffer untouched, which makes it a
/// transparent interception point for analysis inserts.
#[derive(Debug, Clone, Copy)]
pub struct GainNode {
    gain: f32,
}

impl GainNode {
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }

    pub fn unity() -> Self {
        Self::new(1.0)
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        if self.gain == 1.0 {
            return;
        }
        for sample in out.iter_mut() {
            *sample *= self.gain;
        }
    }
}
