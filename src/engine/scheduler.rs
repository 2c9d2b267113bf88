//! The per-tick pipeline: drain MIDI, render, delay, emit.
//!
//! Every tick runs the same fixed cycle:
//!
//!   1. forward queued MIDI events to the voice renderer
//!   2. render one block of samples
//!   3. run the block through the feedback delay in place
//!   4. hand the finished block to the output sink
//!
//! Nothing in the cycle blocks or allocates; the only wait is the clock
//! itself. A cycle that overruns its deadline costs missed blocks, which
//! are counted and skipped, never rendered late. Backfilling would push
//! every later block off its slot, so the gap is left to the output side
//! (a starved device ring plays silence).

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    block::AudioBlock,
    config::EngineConfig,
    dsp::delay::DelayLine,
    engine::clock::SampleClock,
    error::EngineError,
    io::sink::OutputSink,
    midi::queue::MidiReceiver,
    synth::VoiceRenderer,
};

/// Blocks in the reuse ring. A block handed to the sink last tick is not
/// rewritten until one full period later.
const BLOCK_RING: usize = 2;

/// Snapshot of the pipeline's non-fatal condition counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Blocks handed to the sink.
    pub blocks_emitted: u64,
    /// Periods missed because a cycle overran its deadline.
    pub underruns: u64,
    /// MIDI events forwarded to the renderer.
    pub events_dispatched: u64,
    /// Events the ingest side lost to queue overflow.
    pub midi_overflows: u64,
}

/// Owns the realtime loop: clock, event queue consumer, renderer, delay
/// and sink. Generic over the renderer and sink so tests can substitute
/// instrumented stand-ins.
pub struct BlockScheduler<R, S> {
    clock: SampleClock,
    events: MidiReceiver,
    renderer: R,
    delay: DelayLine,
    sink: S,
    blocks: Vec<AudioBlock>,
    cursor: usize,
    /// Most pops allowed in one tick, fixed at the queue capacity so a
    /// producer racing the drain cannot stretch the cycle.
    max_drain: usize,
    blocks_emitted: u64,
    underruns: u64,
    events_dispatched: u64,
}

impl<R: VoiceRenderer, S: OutputSink> BlockScheduler<R, S> {
    /// Build a scheduler from a validated configuration. All buffers are
    /// sized here; the running pipeline never allocates.
    pub fn new(
        config: &EngineConfig,
        events: MidiReceiver,
        renderer: R,
        sink: S,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            clock: SampleClock::new(config.block_period()),
            max_drain: events.capacity(),
            events,
            renderer,
            delay: DelayLine::new(config.max_delay_samples),
            sink,
            blocks: vec![AudioBlock::zeroed(config.block_size); BLOCK_RING],
            cursor: 0,
            blocks_emitted: 0,
            underruns: 0,
            events_dispatched: 0,
        })
    }

    /// Wait for the next tick, then run one full cycle.
    pub fn step(&mut self) {
        let tick = self.clock.wait_for_tick();
        if tick.missed_periods > 0 {
            self.underruns += u64::from(tick.missed_periods);
            log::warn!("underrun: {} period(s) missed", tick.missed_periods);
        }
        self.run_cycle();
    }

    /// One drain/render/delay/emit pass, immediately and without the
    /// clock. Offline rendering and benchmarks.
    pub fn run_cycle(&mut self) {
        self.drain_events();

        let cursor = self.cursor;
        self.cursor = (self.cursor + 1) % self.blocks.len();
        let block = &mut self.blocks[cursor];

        self.renderer.render_block(block.samples_mut());
        self.delay.process_block(block.samples_mut());
        self.sink.submit(block);
        self.blocks_emitted += 1;
    }

    fn drain_events(&mut self) {
        for _ in 0..self.max_drain {
            match self.events.pop() {
                Some(event) => {
                    self.renderer.handle_event(event);
                    self.events_dispatched += 1;
                }
                None => break,
            }
        }
    }

    /// Run `count` consecutive ticks at the configured cadence.
    pub fn run_blocks(&mut self, count: usize) {
        for _ in 0..count {
            self.step();
        }
    }

    /// Run until `stop` is raised. The flag is checked once per tick.
    pub fn run(&mut self, stop: &AtomicBool) {
        while !stop.load(Ordering::Relaxed) {
            self.step();
        }
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            blocks_emitted: self.blocks_emitted,
            underruns: self.underruns,
            events_dispatched: self.events_dispatched,
            midi_overflows: self.events.overflow_count(),
        }
    }

    pub fn delay(&self) -> &DelayLine {
        &self.delay
    }

    /// Echo parameters are adjusted through here, typically between runs
    /// or from the thread that steps the scheduler.
    pub fn delay_mut(&mut self) -> &mut DelayLine {
        &mut self.delay
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
