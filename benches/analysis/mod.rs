//! Benchmarks for analysis primitives.

mod analyser;
mod reduce;

pub use analyser::bench_analyser;
pub use reduce::bench_reduce;
