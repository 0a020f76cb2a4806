//! Time management utilities

use std::time::{Duration, Instant};

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: Duration,
    total_time: Duration,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: Duration::ZERO,
            total_time: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame), returning the frame time
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame);
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Time since the previous frame
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    /// Total elapsed time since timer creation
    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Fixed-period tick source
///
/// Converts a running simulation clock into discrete ticks. The first tick is
/// due one period after the clock starts; every consumed tick moves the
/// deadline forward by exactly one period so no time is lost to rounding.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    period: Duration,
    next_deadline: Duration,
    ticks: u64,
}

impl FixedTimestep {
    /// Create a tick source with the given period (zero is raised to 1ns)
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_nanos(1));
        Self {
            period,
            next_deadline: period,
            ticks: 0,
        }
    }

    /// Create a tick source from a period in milliseconds
    pub fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    /// Tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Clock time at which the next tick is due
    pub fn next_deadline(&self) -> Duration {
        self.next_deadline
    }

    /// Whether a tick is due at clock time `now`
    pub fn is_due(&self, now: Duration) -> bool {
        self.next_deadline <= now
    }

    /// Mark the pending tick as executed
    pub fn consume(&mut self) {
        self.next_deadline += self.period;
        self.ticks += 1;
    }

    /// Discard every tick due at or before `now`, returning how many were dropped
    pub fn skip_to(&mut self, now: Duration) -> u64 {
        let mut dropped = 0;
        while self.is_due(now) {
            self.next_deadline += self.period;
            dropped += 1;
        }
        dropped
    }

    /// Number of ticks executed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
