//! Benchmarks for MIDI byte-stream decoding.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use ostinato::midi::MidiDecoder;

pub fn bench_decoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("midi/decoder");

    // A dense stream: note-on/off pairs under running status, sprinkled
    // with real-time clock bytes, the way a busy keyboard looks on the
    // wire.
    let mut stream = vec![0x90u8];
    for key in 0..64u8 {
        stream.extend_from_slice(&[48 + (key % 24), 100]);
        stream.push(0xF8);
        stream.extend_from_slice(&[48 + (key % 24), 0]);
    }

    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("running_status_stream", stream.len()),
        &stream,
        |b, bytes| {
            b.iter(|| {
                let mut decoder = MidiDecoder::new();
                let mut events = 0usize;
                for &byte in bytes {
                    if decoder.feed(black_box(byte)).is_some() {
                        events += 1;
                    }
                }
                events
            })
        },
    );

    group.finish();
}
