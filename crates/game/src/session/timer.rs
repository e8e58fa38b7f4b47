use std::time::Duration;

const MAX_CATCH_UP: Duration = Duration::from_millis(250);
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Single-owner fixed-period stepper. Arming always restarts the period.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    accumulator: Duration,
    armed: bool,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            accumulator: Duration::ZERO,
            armed: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn arm(&mut self) {
        self.accumulator = Duration::ZERO;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.accumulator = Duration::ZERO;
        self.armed = false;
    }

    pub fn accumulate(&mut self, delta: Duration) {
        if self.armed {
            self.accumulator += delta.min(MAX_CATCH_UP);
        }
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.armed && self.accumulator >= self.period {
            self.accumulator -= self.period;
            true
        } else {
            false
        }
    }
}
