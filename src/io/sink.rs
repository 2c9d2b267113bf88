//! Non-blocking handoff of finished blocks to the output side.

use crate::block::AudioBlock;

/// Receives each finished block, once per tick.
///
/// `submit` runs inside the tick cycle: it must copy or discard and
/// return. Blocking on a device, a lock or the consumer side of a ring
/// here would stall the clock for every later block.
pub trait OutputSink: Send {
    fn submit(&mut self, block: &AudioBlock);
}

/// Discards blocks, counting them. Headless runs and tests.
#[derive(Debug, Default)]
pub struct NullSink {
    submitted: u64,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> u64 {
        self.submitted
    }
}

impl OutputSink for NullSink {
    fn submit(&mut self, _block: &AudioBlock) {
        self.submitted += 1;
    }
}

/// Pushes samples into an SPSC ring consumed by an audio device callback.
///
/// The device side pops what it needs and zero-fills when the ring runs
/// dry, so a starved device plays silence rather than stale data. Samples
/// that do not fit because the consumer stalled are dropped and counted.
#[cfg(feature = "rtrb")]
pub struct RingSink {
    producer: rtrb::Producer<crate::Sample>,
    dropped_samples: u64,
}

#[cfg(feature = "rtrb")]
impl RingSink {
    /// Wrap the producer half of an `rtrb` ring. Size the ring with a few
    /// blocks of slack; four times the block size rides out normal device
    /// callback jitter.
    pub fn new(producer: rtrb::Producer<crate::Sample>) -> Self {
        Self {
            producer,
            dropped_samples: 0,
        }
    }

    /// Samples that never reached the device side.
    pub fn dropped_samples(&self) -> u64 {
        self.dropped_samples
    }
}

#[cfg(feature = "rtrb")]
impl OutputSink for RingSink {
    fn submit(&mut self, block: &AudioBlock) {
        for &sample in block.samples() {
            if self.producer.push(sample).is_err() {
                self.dropped_samples += 1;
            }
        }
    }
}
