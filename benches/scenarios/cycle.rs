//! Full pipeline cycle benchmarks.
//!
//! One cycle must comfortably beat its block period. At the default
//! 48-sample block that period is 1.00 ms; the drain/render/delay/emit
//! pass is measured here without the clock.

use criterion::{BenchmarkId, Criterion};
use ostinato::{
    io::NullSink,
    midi::{midi_queue, MidiEvent},
    synth::SawTestVoice,
    BlockScheduler, EngineConfig,
};

use crate::BLOCK_SIZES;

pub fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/tick_cycle");

    for &size in BLOCK_SIZES {
        let config = EngineConfig {
            block_size: size,
            ..EngineConfig::default()
        };

        // Steady state: a sounding voice through an active echo, no
        // fresh events.
        let (tx, rx) = midi_queue(config.midi_queue_capacity);
        let mut scheduler = BlockScheduler::new(
            &config,
            rx,
            SawTestVoice::new(config.sample_rate),
            NullSink::new(),
        )
        .unwrap();
        scheduler.delay_mut().set_delay_samples(4_800).unwrap();
        scheduler.delay_mut().set_feedback(0.6);
        tx.send(MidiEvent::NoteOn {
            channel: 0,
            key: 57,
            velocity: 100,
        });
        scheduler.run_cycle();

        group.bench_with_input(BenchmarkId::new("sounding_voice", size), &size, |b, _| {
            b.iter(|| scheduler.run_cycle())
        });

        // Worst case per tick: a burst of events lands on every cycle.
        let (tx, rx) = midi_queue(config.midi_queue_capacity);
        let mut scheduler = BlockScheduler::new(
            &config,
            rx,
            SawTestVoice::new(config.sample_rate),
            NullSink::new(),
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::new("event_burst", size), &size, |b, _| {
            b.iter(|| {
                for key in 0..8 {
                    tx.send(MidiEvent::NoteOn {
                        channel: 0,
                        key: 48 + key,
                        velocity: 100,
                    });
                }
                scheduler.run_cycle();
            })
        });
    }

    group.finish();
}
