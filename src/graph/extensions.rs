use crate::graph::{gain::GainNode, node::GraphNode, through::Through};

pub trait NodeExt: GraphNode + Sized {
    fn through<F: GraphNode>(self, filter: F) -> Through<Self, F> {
        Through::new(self, filter)
    }

    fn gain(self, gain: f32) -> Through<Self, GainNode> {
        Through::new(self, GainNode::new(gain))
    }
}

impl<T: GraphNode> NodeExt for T {}
