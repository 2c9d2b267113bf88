//! Engine configuration.
//!
//! All timing and buffer sizing derives from one [`EngineConfig`] captured
//! at startup. The defaults match the original hardware build: 48 kHz,
//! 48-sample blocks (one millisecond per block, a thousand blocks per
//! second) and a 12 000-sample delay buffer.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::EngineError, MAX_BLOCK_SIZE};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Samples per audio block. Exactly one block is rendered per tick.
    pub block_size: usize,
    /// Line speed of the serial MIDI transport. The core never opens the
    /// port itself; whatever feeds bytes into the decoder reads this.
    pub serial_baud: u32,
    /// Delay line capacity in samples. Bounds the longest echo offset.
    pub max_delay_samples: usize,
    /// Depth of the bounded event queue between MIDI ingest and the
    /// scheduler. Overflow drops the oldest queued event.
    pub midi_queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            block_size: 48,
            serial_baud: 115_200,
            max_delay_samples: 12_000,
            midi_queue_capacity: 64,
        }
    }
}

impl EngineConfig {
    /// Check for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sample_rate == 0 {
            return Err(EngineError::InvalidConfig("sample_rate must be nonzero"));
        }
        if self.block_size == 0 {
            return Err(EngineError::InvalidConfig("block_size must be nonzero"));
        }
        if self.block_size > MAX_BLOCK_SIZE {
            return Err(EngineError::InvalidConfig(
                "block_size exceeds MAX_BLOCK_SIZE",
            ));
        }
        if self.block_period().is_zero() {
            return Err(EngineError::InvalidConfig(
                "block period rounds to zero nanoseconds",
            ));
        }
        if self.max_delay_samples < 2 {
            return Err(EngineError::InvalidConfig(
                "max_delay_samples leaves no usable delay offset",
            ));
        }
        if self.midi_queue_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "midi_queue_capacity must be nonzero",
            ));
        }
        Ok(())
    }

    /// Wall-clock duration of one block: `block_size / sample_rate`.
    pub fn block_period(&self) -> Duration {
        let nanos = self.block_size as u64 * 1_000_000_000 / self.sample_rate as u64;
        Duration::from_nanos(nanos)
    }

    /// Block cadence in blocks per second.
    pub fn blocks_per_second(&self) -> f32 {
        self.sample_rate as f32 / self.block_size as f32
    }
}
