//! MIDI ingestion: byte-stream framing and the bounded event queue.
//!
//! The transport hands the decoder one raw byte at a time, in arrival
//! order. Complete messages become [`MidiEvent`]s and cross into the
//! scheduler through a lock-free queue; partial messages never escape the
//! decoder.

/// Incremental byte-stream decoder with running-status support.
pub mod decoder;
/// Bounded lock-free queue between ingest and the scheduler.
pub mod queue;

pub use decoder::{DecoderState, MidiDecoder};
pub use queue::{midi_queue, MidiReceiver, MidiSender};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A decoded MIDI message. Payloads stay integer end to end.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Bend relative to center: -8192..=8191, 0 at rest.
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// The channel (0-15) the event addresses.
    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::PitchBend { channel, .. }
            | MidiEvent::ProgramChange { channel, .. } => channel,
        }
    }
}
