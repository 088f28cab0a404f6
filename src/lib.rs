//! Audio analysis bridge for audio-reactive visuals.
//!
//! Taps a live audio graph, reduces its spectrum to a few normalized bands
//! once per frame and hands those bands to visual engines and UI observers.
//!
//! ```
//! use saavy_bridge::{
//!     graph::{AudioContext, GraphNode, RenderCtx, ToneNode},
//!     BridgeRegistry, FrameLoop,
//! };
//!
//! let (context, mut destination) = AudioContext::new(48_000.0, ToneNode::sine(220.0));
//! let registry = BridgeRegistry::new(FrameLoop::new());
//! registry.init(Some(&context));
//!
//! // audio thread
//! let mut block = vec![0.0; 1024];
//! destination.render_block(&mut block, &RenderCtx::new(48_000.0));
//! destination.render_block(&mut block, &RenderCtx::new(48_000.0));
//!
//! // render loop
//! registry.frames().tick(16.0);
//! assert!(registry.band(0) > 0.0);
//! ```

pub mod analysis;
pub mod bridge; // Registry, pump and observer
pub mod config;
pub mod error;
pub mod frame; // Cooperative per-frame scheduler
pub mod graph;

pub use bridge::{BandObserver, Bridge, BridgeRegistry, Subscription};
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use frame::FrameLoop;

pub const MAX_BLOCK_SIZE: usize = 2048;
