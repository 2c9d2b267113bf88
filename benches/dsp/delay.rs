//! Benchmarks for the feedback delay line.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use ostinato::{dsp::DelayLine, Sample};

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Echo distances in samples at 48 kHz.
    let offsets: &[usize] = &[
        480,    // 10 ms
        4_800,  // 100 ms
        12_000, // 250 ms, the full default buffer
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<Sample> = (0..size)
            .map(|i| ((i as f32 * 0.1).sin() * 12_000.0) as Sample)
            .collect();

        for &offset in offsets {
            let mut delay = DelayLine::new(12_001);
            delay.set_delay_samples(offset).unwrap();
            delay.set_feedback(0.5);
            let mut buffer = input.clone();

            group.bench_with_input(
                BenchmarkId::new(format!("process_{}ms", offset / 48), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        delay.process_block(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
