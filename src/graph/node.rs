/// Context passed to graph nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - time: Playback time in seconds at the start of the block
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub time: f64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            time: 0.0,
        }
    }

    /// Move the clock forward by one rendered block.
    #[inline]
    pub fn advance(&mut self, frames: usize) {
        if self.sample_rate > 0.0 {
            self.time += frames as f64 / self.sample_rate as f64;
        }
    }
}

/// Core trait for audio processing graph nodes
///
/// Nodes render in place: sources overwrite `out`, processors and inserts
/// transform whatever is already there. `render_block` runs on the audio
/// thread and must not block or allocate.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Check if this node is still producing sound
    fn is_active(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
