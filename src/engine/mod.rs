//! Tick scheduling and the per-block pipeline.

/// Fixed-rate tick source with overrun accounting.
pub mod clock;
/// The per-tick drain/render/delay/emit loop.
pub mod scheduler;

pub use clock::{SampleClock, Tick};
pub use scheduler::{BlockScheduler, PipelineStats};
