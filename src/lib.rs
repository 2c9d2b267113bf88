pub mod block;
pub mod config;
pub mod dsp;
pub mod engine; // Tick scheduling and the per-block pipeline
pub mod error;
pub mod io;
pub mod midi; // Byte-stream framing and the bounded event queue
pub mod synth; // Voice rendering seam and the built-in test voice

pub use block::AudioBlock;
pub use config::EngineConfig;
pub use engine::{BlockScheduler, PipelineStats, SampleClock};
pub use error::EngineError;
pub use midi::MidiEvent;

/// Engine sample format: signed 16-bit PCM.
pub type Sample = i16;

/// Upper bound on configurable block sizes.
pub const MAX_BLOCK_SIZE: usize = 2048;
