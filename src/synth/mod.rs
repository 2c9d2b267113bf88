// Purpose: the synthesis seam of the engine
// The scheduler drives whatever sits behind VoiceRenderer; the saw test
// voice is the built-in stand-in for a real instrument


pub use saw_test::SawTestVoice;

use crate::{midi::MidiEvent, Sample};

/// The synthesis side of the pipeline: consumes decoded MIDI, fills
/// blocks with samples.
///
/// Implementations run inside the tick cycle and must not block or
/// allocate. `render_block` must overwrite the whole buffer; the
/// scheduler reuses blocks, so stale samples from an earlier tick are
/// still in there.
pub trait VoiceRenderer: Send {
    /// React to one decoded event (note gates, controller moves).
    fn handle_event(&mut self, event: MidiEvent);

    /// Fill `out` with the next `out.len()` samples.
    fn render_block(&mut self, out: &mut [Sample]);
}
