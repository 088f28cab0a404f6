//! Minimal audio graph the bridge taps into.
//!
//! An audio engine owns a [`Destination`] on its audio thread and hands the
//! matching [`AudioContext`] to whoever wants to observe the signal. Inserts
//! are ordinary [`GraphNode`]s rendered serially after the source, which is
//! how the analysis tap sees exactly what the listener hears.

/// Audio context (control side) and destination (render side).
pub mod context;
/// Fluent combinators (`.through()`, `.gain()`).
pub mod extensions;
/// In-place gain stage, transparent at unity.
pub mod gain;
/// Core traits shared by all graph nodes.
pub mod node;
/// Serial chaining of two nodes.
pub mod through;
/// Sine and sweep test source.
pub mod tone;

pub use context::{AudioContext, Destination, InsertId, MAX_INSERTS};
pub use extensions::NodeExt;
pub use gain::GainNode;
pub use node::{GraphNode, RenderCtx};
pub use through::Through;
pub use tone::ToneNode;
