//! Fixed-length audio block.

use crate::Sample;

/// One block of signed 16-bit samples.
///
/// Blocks are allocated once at the configured block size and reused for
/// the lifetime of the engine. The length never changes, so a block handed
/// to a sink always carries exactly one tick's worth of audio.
#[derive(Debug, Clone)]
pub struct AudioBlock {
    samples: Box<[Sample]>,
}

impl AudioBlock {
    /// A silent block of `len` samples.
    pub fn zeroed(len: usize) -> Self {
        Self {
            samples: vec![0; len].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    /// Overwrite the block with silence.
    pub fn fill_silence(&mut self) {
        self.samples.fill(0);
    }
}
