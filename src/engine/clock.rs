//! Fixed-rate tick source.
//!
//! One tick per block period, paced by absolute deadlines. Each deadline
//! is exactly one period after the previous one, so finishing a cycle
//! early never shortens the next period and finishing late never
//! stretches it. Timing debt shows up as missed periods on the next tick
//! instead of silently shifting the grid.

use std::time::{Duration, Instant};

/// Outcome of waiting for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Whole periods that had already elapsed when the wait was entered.
    /// Zero under nominal timing; anything else means the previous cycle
    /// overran its deadline and those blocks are gone.
    pub missed_periods: u32,
}

pub struct SampleClock {
    period: Duration,
    next_deadline: Instant,
}

impl SampleClock {
    /// A clock ticking once per `period`, anchored at the moment of
    /// construction.
    pub fn new(period: Duration) -> Self {
        debug_assert!(period > Duration::ZERO);
        Self {
            period,
            next_deadline: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block the calling thread until the next period boundary.
    pub fn wait_for_tick(&mut self) -> Tick {
        let now = Instant::now();
        if now < self.next_deadline {
            std::thread::sleep(self.next_deadline - now);
        }
        self.advance(Instant::now())
    }

    /// Deadline bookkeeping, separated from the sleep so overrun
    /// accounting is testable with synthetic instants.
    fn advance(&mut self, now: Instant) -> Tick {
        let missed = if now > self.next_deadline {
            let behind = (now - self.next_deadline).as_nanos() / self.period.as_nanos();
            behind.min(u32::MAX as u128) as u32
        } else {
            0
        };
        // Skip past every boundary already behind us; never re-anchor to
        // `now`, the grid stays absolute.
        self.next_deadline += self.period * missed.saturating_add(1);
        Tick {
            missed_periods: missed,
        }
    }
}
