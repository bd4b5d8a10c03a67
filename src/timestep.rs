/// Fixed-timestep accumulator: wall-clock time in, whole simulation ticks out.

use std::time::Duration;

/// Most ticks a single `accumulate` call will hand out.
pub const MAX_CATCH_UP_TICKS: u32 = 10;

#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: Duration,
    pending: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        Self {
            step: step.max(Duration::from_millis(1)),
            pending: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Bank `elapsed` and return how many ticks to run now. A partial step
    /// carries over; a backlog beyond the cap is dropped.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        let mut ticks = 0;
        while self.pending >= self.step && ticks < MAX_CATCH_UP_TICKS {
            self.pending -= self.step;
            ticks += 1;
        }
        if ticks == MAX_CATCH_UP_TICKS && self.pending >= self.step {
            self.pending = Duration::ZERO;
        }
        ticks
    }

    /// Time until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.pending)
    }
}
