//! Benchmarks for DSP primitives.

mod delay;

pub use delay::bench_delay;
