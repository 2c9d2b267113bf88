//! Demo wiring: byte source -> decoder -> queue -> engine thread -> device.

use std::fs::File;
use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use ostinato::{
    io::RingSink,
    midi::{midi_queue, MidiDecoder, MidiSender},
    synth::SawTestVoice,
    BlockScheduler, EngineConfig, MidiEvent,
};

/// What feeds the decoder.
pub enum Input {
    /// Raw MIDI bytes from standard input.
    Stdin,
    /// Raw MIDI bytes from a capture file.
    File(String),
    /// No bytes at all: inject a note-on and hold it for a few seconds.
    TestTone,
}

pub fn run(input: Input) -> EyreResult<()> {
    let config = EngineConfig::default();

    // Audio device first, so a missing device fails before any threads.
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let device_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let channels = device_config.channels() as usize;

    let stream_config = cpal::StreamConfig {
        channels: device_config.channels(),
        sample_rate: cpal::SampleRate(config.sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    // Finished samples cross to the device callback through an SPSC ring
    // with a few blocks of slack.
    let (producer, mut consumer) = rtrb::RingBuffer::new(config.block_size * 4);
    let (tx, rx) = midi_queue(config.midi_queue_capacity);

    let mut scheduler = BlockScheduler::new(
        &config,
        rx,
        SawTestVoice::new(config.sample_rate),
        RingSink::new(producer),
    )?;
    // A modest slapback echo so the delay path is audible: 125 ms.
    scheduler.delay_mut().set_delay_samples(6_000)?;
    scheduler.delay_mut().set_feedback(0.4);

    let stream = device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _| {
                for frame in data.chunks_mut(channels) {
                    // A starved ring plays silence, never stale data.
                    let sample = consumer
                        .pop()
                        .map(|s| f32::from(s) / 32_768.0)
                        .unwrap_or(0.0);
                    for slot in frame.iter_mut() {
                        *slot = sample;
                    }
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to open an output stream at the engine sample rate")?;
    stream.play()?;

    println!("=== ostinato ===");
    println!("Sample rate: {} Hz", config.sample_rate);
    println!(
        "Block size:  {} samples ({} blocks/s)",
        config.block_size,
        config.blocks_per_second()
    );
    println!();

    let stop = Arc::new(AtomicBool::new(false));
    let engine_stop = Arc::clone(&stop);
    let engine = thread::spawn(move || {
        scheduler.run(&engine_stop);
        scheduler
    });

    let mut decoder = MidiDecoder::new();
    match input {
        Input::TestTone => {
            println!("Playing test tone for 3 seconds...");
            tx.send(MidiEvent::NoteOn {
                channel: 0,
                key: 57,
                velocity: 100,
            });
            thread::sleep(Duration::from_secs(3));
            tx.send(MidiEvent::NoteOff {
                channel: 0,
                key: 57,
                velocity: 0,
            });
        }
        Input::Stdin => {
            println!("Reading MIDI bytes from stdin (Ctrl+D to finish)...");
            feed_bytes(io::stdin().lock(), &mut decoder, &tx)?;
        }
        Input::File(path) => {
            println!("Reading MIDI bytes from {path}...");
            let file = File::open(&path).wrap_err_with(|| format!("cannot open {path}"))?;
            feed_bytes(file, &mut decoder, &tx)?;
        }
    }

    // Let the echo tail ring out before tearing the engine down.
    thread::sleep(Duration::from_secs(1));
    stop.store(true, Ordering::Relaxed);
    let scheduler = engine.join().map_err(|_| eyre!("engine thread panicked"))?;

    let stats = scheduler.stats();
    println!();
    println!("Blocks emitted:    {}", stats.blocks_emitted);
    println!("Underruns:         {}", stats.underruns);
    println!("Events dispatched: {}", stats.events_dispatched);
    println!("Queue overflows:   {}", stats.midi_overflows);
    println!("Framing errors:    {}", decoder.framing_errors());
    println!("Dropped samples:   {}", scheduler.sink().dropped_samples());
    Ok(())
}

fn feed_bytes(
    mut reader: impl Read,
    decoder: &mut MidiDecoder,
    tx: &MidiSender,
) -> EyreResult<()> {
    let mut buf = [0u8; 512];
    loop {
        let read = reader
            .read(&mut buf)
            .wrap_err("read from MIDI byte source failed")?;
        if read == 0 {
            return Ok(());
        }
        for &byte in &buf[..read] {
            if let Some(event) = decoder.feed(byte) {
                tx.send(event);
            }
        }
    }
}
