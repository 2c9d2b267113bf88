//! Error types surfaced by engine construction and parameter changes.
//!
//! Hot-path conditions (deadline overruns, queue overflow, framing noise)
//! are counters, not errors: the pipeline keeps running through them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration cannot produce a runnable engine.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(&'static str),

    /// A delay offset request outside the usable range of the buffer.
    /// The previous offset stays in effect.
    #[error("delay offset {requested} outside valid range 1..={max}")]
    DelayOffsetOutOfRange { requested: usize, max: usize },
}
