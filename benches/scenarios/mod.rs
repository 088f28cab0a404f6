//! Real-world scenario benchmarks.
//!
//! These model one displayed frame of a live session: the audio thread
//! renders a frame's worth of blocks, then the frame loop runs the pump and
//! an observer.

mod frame;

pub use frame::bench_frame;
