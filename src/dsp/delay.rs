use crate::{error::EngineError, Sample};

/*
Feedback Delay
==============

A recirculating echo over a fixed ring of 16-bit samples:

    tap               = buffer[write + i - offset]        (mod capacity)
    out[i]            = in[i] + feedback * tap
    buffer[write + i] = in[i] + feedback * out[i]         (mod capacity)

Each processed block advances `write` by the block length, so the tap always
reads `offset` samples into the past regardless of block size. Feedback is
capped just below unity, which keeps the loop energy bounded: with zero
input the stored signal shrinks by the gain factor on every round trip, and
the truncating f32 -> i32 conversion finishes the job at the bottom end.

Intermediate math runs in i32 and saturates back to i16 on both the output
and the write-back path, so a hot mix clips instead of wrapping.

The buffer is allocated once at construction. `process_block` does no
allocation, so it is safe inside the tick deadline.
*/

/// Maximum feedback gain, kept below unity so recirculation always decays.
pub const MAX_FEEDBACK: f32 = 0.98;

pub struct DelayLine {
    buffer: Box<[Sample]>,
    write_pos: usize,
    delay_offset: usize,
    feedback: f32,
}

impl DelayLine {
    /// A delay line holding `capacity` samples of history.
    ///
    /// Valid offsets are `1..capacity`. The line starts at half capacity
    /// with zero feedback, which makes it a passthrough until configured.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 2, "capacity leaves no usable offset");
        Self {
            buffer: vec![0; capacity].into_boxed_slice(),
            write_pos: 0,
            delay_offset: (capacity / 2).max(1),
            feedback: 0.0,
        }
    }

    /// Request a new echo distance in samples.
    ///
    /// Offsets outside `1..capacity` are rejected and the previous offset
    /// stays in effect. Silently clamping would change the echo time the
    /// caller asked for, which is worse than refusing.
    pub fn set_delay_samples(&mut self, offset: usize) -> Result<(), EngineError> {
        if offset == 0 || offset >= self.buffer.len() {
            return Err(EngineError::DelayOffsetOutOfRange {
                requested: offset,
                max: self.buffer.len() - 1,
            });
        }
        self.delay_offset = offset;
        Ok(())
    }

    /// Set the feedback gain, clamped into `0.0..=MAX_FEEDBACK`.
    pub fn set_feedback(&mut self, gain: f32) {
        self.feedback = gain.clamp(0.0, MAX_FEEDBACK);
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_offset
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Run one block through the echo in place.
    pub fn process_block(&mut self, block: &mut [Sample]) {
        let capacity = self.buffer.len();
        for (i, sample) in block.iter_mut().enumerate() {
            let input = *sample as i32;
            let read_pos = (self.write_pos + i + capacity - self.delay_offset) % capacity;
            let tap = self.buffer[read_pos] as i32;
            let out = saturate16(input + scale(tap, self.feedback));
            let write_back = saturate16(input + scale(out as i32, self.feedback));
            self.buffer[(self.write_pos + i) % capacity] = write_back;
            *sample = out;
        }
        self.write_pos = (self.write_pos + block.len()) % capacity;
    }

    /// Clear stored history and rewind the write cursor.
    pub fn reset(&mut self) {
        self.buffer.fill(0);
        self.write_pos = 0;
    }
}

#[inline]
fn scale(value: i32, gain: f32) -> i32 {
    (value as f32 * gain) as i32
}

/// Clamp an i32 intermediate into the 16-bit sample range.
#[inline]
fn saturate16(value: i32) -> Sample {
    value.clamp(Sample::MIN as i32, Sample::MAX as i32) as Sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_feedback_passes_input_through() {
        let mut delay = DelayLine::new(64);
        delay.set_delay_samples(16).unwrap();
        let mut block: Vec<Sample> = (0..16).map(|i| (i * 100) as Sample).collect();
        let expected = block.clone();
        delay.process_block(&mut block);
        assert_eq!(block, expected);
    }

    #[test]
    fn tap_returns_input_from_offset_samples_ago() {
        let mut delay = DelayLine::new(64);
        delay.set_delay_samples(8).unwrap();

        // First block writes history with zero feedback.
        let mut first: Vec<Sample> = vec![1000; 8];
        delay.process_block(&mut first);

        // Second block of silence picks the first block up off the tap.
        delay.set_feedback(0.5);
        let mut second: Vec<Sample> = vec![0; 8];
        delay.process_block(&mut second);
        assert!(second.iter().all(|&s| s == 500));
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        let mut delay = DelayLine::new(64);
        delay.set_delay_samples(20).unwrap();

        assert!(matches!(
            delay.set_delay_samples(0),
            Err(EngineError::DelayOffsetOutOfRange { requested: 0, max: 63 })
        ));
        assert!(delay.set_delay_samples(64).is_err());
        assert!(delay.set_delay_samples(65).is_err());
        assert!(delay.set_delay_samples(500).is_err());

        // Failed requests leave the previous offset in effect.
        assert_eq!(delay.delay_samples(), 20);
        assert!(delay.set_delay_samples(63).is_ok());
        assert_eq!(delay.delay_samples(), 63);
    }

    #[test]
    fn feedback_is_clamped_below_unity() {
        let mut delay = DelayLine::new(16);
        delay.set_feedback(1.5);
        assert_eq!(delay.feedback(), MAX_FEEDBACK);
        delay.set_feedback(-0.25);
        assert_eq!(delay.feedback(), 0.0);
    }

    #[test]
    fn mix_saturates_instead_of_wrapping() {
        let mut delay = DelayLine::new(8);
        delay.set_delay_samples(4).unwrap();

        let mut first: Vec<Sample> = vec![30_000; 4];
        delay.process_block(&mut first);

        delay.set_feedback(MAX_FEEDBACK);
        let mut second: Vec<Sample> = vec![20_000; 4];
        delay.process_block(&mut second);
        // 20_000 + 0.98 * 30_000 is well past i16::MAX.
        assert!(second.iter().all(|&s| s == Sample::MAX));
    }

    #[test]
    fn recirculation_decays_to_silence_without_input() {
        let mut delay = DelayLine::new(32);
        delay.set_delay_samples(16).unwrap();
        delay.set_feedback(0.9);

        let mut seed: Vec<Sample> = vec![20_000; 16];
        delay.process_block(&mut seed);

        let mut peak_history = Vec::new();
        for _ in 0..400 {
            let mut block: Vec<Sample> = vec![0; 16];
            delay.process_block(&mut block);
            let peak = block.iter().map(|s| s.unsigned_abs()).max().unwrap();
            peak_history.push(peak);
            if peak == 0 {
                break;
            }
        }

        assert_eq!(*peak_history.last().unwrap(), 0, "echo never died out");
        // One round trip per block here, so the peak must never grow.
        assert!(peak_history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn reset_clears_history() {
        let mut delay = DelayLine::new(32);
        delay.set_delay_samples(8).unwrap();
        let mut block: Vec<Sample> = vec![12_000; 8];
        delay.process_block(&mut block);

        delay.reset();
        delay.set_feedback(MAX_FEEDBACK);
        let mut silent: Vec<Sample> = vec![0; 8];
        delay.process_block(&mut silent);
        assert!(silent.iter().all(|&s| s == 0));
    }

    #[test]
    fn write_cursor_wraps_across_blocks() {
        let mut delay = DelayLine::new(24);
        delay.set_delay_samples(12).unwrap();
        delay.set_feedback(0.5);

        // Push enough blocks to wrap the ring several times.
        let mut injected = vec![8_000 as Sample; 12];
        delay.process_block(&mut injected);
        for _ in 0..9 {
            let mut block: Vec<Sample> = vec![0; 12];
            delay.process_block(&mut block);
            // Every sample stays inside the legal range while wrapping.
            assert!(block.iter().all(|&s| s > Sample::MIN));
        }
    }
}
