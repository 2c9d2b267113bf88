//! Bounded event queue between MIDI ingest and the scheduler.
//!
//! The ingest side may run in an interrupt-like context (serial callback,
//! reader thread), so the producer never blocks and never allocates. When
//! the queue is full the oldest queued event is displaced: a stale note-on
//! is worth less than the newest input.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crossbeam::queue::ArrayQueue;

use super::MidiEvent;

/// A connected sender/receiver pair over a queue of `capacity` events.
pub fn midi_queue(capacity: usize) -> (MidiSender, MidiReceiver) {
    let shared = Arc::new(Shared {
        queue: ArrayQueue::new(capacity),
        overflow: AtomicU64::new(0),
    });
    (
        MidiSender {
            shared: Arc::clone(&shared),
        },
        MidiReceiver { shared },
    )
}

struct Shared {
    queue: ArrayQueue<MidiEvent>,
    overflow: AtomicU64,
}

/// Producer half, owned by the byte-ingest context.
pub struct MidiSender {
    shared: Arc<Shared>,
}

impl MidiSender {
    /// Queue an event without blocking. A full queue drops its oldest
    /// entry to make room.
    pub fn send(&self, event: MidiEvent) {
        if self.shared.queue.force_push(event).is_some() {
            self.shared.overflow.fetch_add(1, Ordering::Relaxed);
            log::warn!("midi queue full, dropped oldest event");
        }
    }

    pub fn overflow_count(&self) -> u64 {
        self.shared.overflow.load(Ordering::Relaxed)
    }
}

/// Consumer half, drained once per tick by the scheduler.
pub struct MidiReceiver {
    shared: Arc<Shared>,
}

impl MidiReceiver {
    /// Pop the oldest queued event.
    pub fn pop(&self) -> Option<MidiEvent> {
        self.shared.queue.pop()
    }

    pub fn len(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.shared.queue.capacity()
    }

    /// Events lost to overflow since the queue was created.
    pub fn overflow_count(&self) -> u64 {
        self.shared.overflow.load(Ordering::Relaxed)
    }
}
