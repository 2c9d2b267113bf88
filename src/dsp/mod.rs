//! Low-level DSP primitives used by the block pipeline.
//!
//! These components are allocation-free and realtime-safe. They stay focused
//! on the signal-processing math so the scheduler can layer on timing and
//! event handling.

/// Recirculating feedback delay over 16-bit samples.
pub mod delay;

pub use delay::DelayLine;
