//! Benchmarks for MIDI ingestion.

mod decoder;

pub use decoder::bench_decoder;
