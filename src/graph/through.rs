use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series, running the first and then passing the
same buffer to the second. Both stages process in place, so the chain costs no
extra memory.

  Through: [First] ──→ [Second] ──→ output

Analysis Inserts:
-----------------

The analysis tap is a Through of a unity-gain interceptor and the analyser
input:

    GainNode::unity().through(analyser_input)

    destination path:  source ──→ [Gain 1.0] ──→ [Analyser] ──→ output
                                                     │
                                                     └──→ ring → spectrum

The interceptor sits in the audible path, so everything that reaches the
destination also reaches the analyser. The analyser copies samples out and
leaves the buffer untouched, so the chain is transparent to the listener.

Order Matters:
--------------

Put the analyser after any stage whose effect should be measured. An analyser
placed before a gain stage sees the pre-gain level:

    GainNode::new(0.5).through(input)   // analyser sees half level
    input.through(GainNode::new(0.5))   // analyser sees full level
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active() || self.filter.is_active()
    }
}
