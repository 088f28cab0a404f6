//! Continuous pump: refreshes a bridge once per frame for as long as it lives.

use std::ops::ControlFlow;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::bridge::state::Bridge;
use crate::frame::{FrameId, FrameLoop};

/// Schedule a per-frame refresh of `bridge`.
///
/// The loop holds only a weak reference and checks liveness before every
/// refresh, so it unregisters itself on the first tick after the bridge is
/// disconnected or dropped. It does not depend on anyone reading the bands.
pub fn start(frames: &FrameLoop, bridge: &Rc<Bridge>) -> FrameId {
    let bridge: Weak<Bridge> = Rc::downgrade(bridge);
    frames.request_frame(move |_, _| {
        let Some(bridge) = bridge.upgrade().filter(|bridge| bridge.is_alive()) else {
            trace!("bridge gone, stopping pump");
            return ControlFlow::Break(());
        };
        bridge.refresh();
        ControlFlow::Continue(())
    })
}
