//! Full-pipeline scenario benchmarks.
//!
//! These model the per-tick workload as the scheduler actually runs it,
//! minus the clock wait.

mod cycle;

pub use cycle::bench_cycle;
