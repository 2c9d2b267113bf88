use super::MidiEvent;

/*
MIDI Byte Framing
=================

Serial MIDI is a stream of 8-bit bytes with no packet boundaries. Framing
relies on the top bit: status bytes (0x80..=0xFF) start a message, data
bytes (0x00..=0x7F) fill in its payload. Three complications:

Running status
    A sender may omit the status byte when it matches the previous message.
    `90 3C 40 3E 40` is two note-ons. The decoder keeps the last
    channel-voice status and reuses it whenever a data byte arrives with no
    message in flight.

System Real-Time (0xF8..=0xFF)
    Clock and transport bytes are allowed to appear in the middle of
    another message. They carry no data bytes and must not disturb the
    framing state. This decoder has no use for them, so they pass through
    invisibly.

System Common (0xF0..=0xF7)
    SysEx and friends. Unsupported here: the byte is dropped, any message
    in flight is abandoned, and running status is cancelled (per the MIDI
    spec, system common clears it).

State machine, one byte per step:

                     status 0x80..=0xEF
        +-------+ ----------------------> +---------------+
        | Idle  |                         | AwaitingData1 |
        +-------+ <---------------------- +---------------+
          ^   |      1-byte msg complete      | data byte
          |   | data byte                     v (2-byte msgs)
          |   | (running status:          +---------------+
          |   |  same transitions         | AwaitingData2 |
          |   v  as AwaitingData1)        +---------------+
          +---<---------------------------------+
                       msg complete, event emitted

A new status byte in any state abandons the partial message and restarts
framing. Partial payloads are never emitted; resynchronization losses are
counted, not errored.
*/

/// Where the decoder stands inside the current message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// No message in flight. Data bytes here use running status.
    Idle,
    /// Status seen, first data byte pending.
    AwaitingData1,
    /// Two-byte message with the first data byte banked.
    AwaitingData2 { data1: u8 },
}

/// Channel-voice message families, keyed by the status high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    NoteOff,
    NoteOn,
    PolyPressure,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
}

impl MessageKind {
    fn from_status(byte: u8) -> Option<Self> {
        match byte >> 4 {
            0x8 => Some(MessageKind::NoteOff),
            0x9 => Some(MessageKind::NoteOn),
            0xA => Some(MessageKind::PolyPressure),
            0xB => Some(MessageKind::ControlChange),
            0xC => Some(MessageKind::ProgramChange),
            0xD => Some(MessageKind::ChannelPressure),
            0xE => Some(MessageKind::PitchBend),
            _ => None,
        }
    }

    fn data_bytes(self) -> u8 {
        match self {
            MessageKind::ProgramChange | MessageKind::ChannelPressure => 1,
            _ => 2,
        }
    }
}

/// Incremental MIDI decoder. Feed it bytes as they arrive; it hands back a
/// complete event exactly when the final byte of a message lands.
#[derive(Debug)]
pub struct MidiDecoder {
    state: DecoderState,
    /// Running status: kind and channel of the last channel-voice status.
    status: Option<(MessageKind, u8)>,
    framing_errors: u64,
}

impl Default for MidiDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiDecoder {
    pub fn new() -> Self {
        Self {
            state: DecoderState::Idle,
            status: None,
            framing_errors: 0,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Bytes that interrupted or never belonged to a message. Dropped
    /// input, not a fault the caller needs to handle.
    pub fn framing_errors(&self) -> u64 {
        self.framing_errors
    }

    /// Forget any partial message and the running status.
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
        self.status = None;
    }

    /// Consume one byte. Returns a complete event if this byte finished a
    /// message, `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<MidiEvent> {
        // Real-time bytes are transparent wherever they land.
        if byte >= 0xF8 {
            return None;
        }
        if byte & 0x80 != 0 {
            self.feed_status(byte);
            return None;
        }
        self.feed_data(byte)
    }

    fn feed_status(&mut self, byte: u8) {
        if self.state != DecoderState::Idle {
            // The message in flight lost its tail.
            self.framing_errors += 1;
        }
        match MessageKind::from_status(byte) {
            Some(kind) => {
                self.status = Some((kind, byte & 0x0F));
                self.state = DecoderState::AwaitingData1;
            }
            None => {
                // System common. Drop it, cancel running status, resync.
                self.status = None;
                self.state = DecoderState::Idle;
            }
        }
    }

    fn feed_data(&mut self, byte: u8) -> Option<MidiEvent> {
        let (kind, channel) = match self.status {
            Some(status) => status,
            None => {
                // Data byte with nothing to attach to.
                self.framing_errors += 1;
                return None;
            }
        };
        match self.state {
            // Idle with a held status is the running-status path.
            DecoderState::Idle | DecoderState::AwaitingData1 => {
                if kind.data_bytes() == 2 {
                    self.state = DecoderState::AwaitingData2 { data1: byte };
                    None
                } else {
                    self.state = DecoderState::Idle;
                    assemble(kind, channel, byte, 0)
                }
            }
            DecoderState::AwaitingData2 { data1 } => {
                self.state = DecoderState::Idle;
                assemble(kind, channel, data1, byte)
            }
        }
    }
}

fn assemble(kind: MessageKind, channel: u8, data1: u8, data2: u8) -> Option<MidiEvent> {
    match kind {
        MessageKind::NoteOn => {
            // Velocity zero is the wire encoding for note-off under
            // running status.
            if data2 == 0 {
                Some(MidiEvent::NoteOff {
                    channel,
                    key: data1,
                    velocity: 0,
                })
            } else {
                Some(MidiEvent::NoteOn {
                    channel,
                    key: data1,
                    velocity: data2,
                })
            }
        }
        MessageKind::NoteOff => Some(MidiEvent::NoteOff {
            channel,
            key: data1,
            velocity: data2,
        }),
        MessageKind::ControlChange => Some(MidiEvent::ControlChange {
            channel,
            controller: data1,
            value: data2,
        }),
        MessageKind::PitchBend => Some(MidiEvent::PitchBend {
            channel,
            value: (((data2 as i16) << 7) | data1 as i16) - 0x2000,
        }),
        MessageKind::ProgramChange => Some(MidiEvent::ProgramChange {
            channel,
            program: data1,
        }),
        // Framed so the stream stays in sync, but the engine has no use
        // for pressure data.
        MessageKind::PolyPressure | MessageKind::ChannelPressure => None,
    }
}
