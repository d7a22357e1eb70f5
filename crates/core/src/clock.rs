//! Stage clock - countdown baseline with suspended spans excluded
//!
//! The host feeds wall time through [`SessionClock::advance`] on every tick, paused or
//! not. Time spent suspended (paused, or frozen during a stage clear) is accumulated
//! separately and subtracted, so it never counts against the countdown.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionClock {
    now_ms: u64,
    baseline_ms: u64,
    suspended_total_ms: u64,
    suspended_since: Option<u64>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed elapsed wall time
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms as u64);
    }

    /// Start a new countdown from the current instant
    pub fn reset_baseline(&mut self) {
        self.baseline_ms = self.now_ms;
        self.suspended_total_ms = 0;
        self.suspended_since = self.suspended_since.map(|_| self.now_ms);
    }

    /// Stop counting; calling again while suspended is a no-op
    pub fn suspend(&mut self) {
        if self.suspended_since.is_none() {
            self.suspended_since = Some(self.now_ms);
        }
    }

    /// Resume counting and fold the suspended span into the offset
    pub fn resume(&mut self) {
        if let Some(since) = self.suspended_since.take() {
            self.suspended_total_ms += self.now_ms - since;
        }
    }

    /// Counted time since the baseline
    pub fn elapsed_ms(&self) -> u64 {
        let current_span = self.suspended_since.map_or(0, |since| self.now_ms - since);
        (self.now_ms - self.baseline_ms)
            .saturating_sub(self.suspended_total_ms)
            .saturating_sub(current_span)
    }

    /// Countdown value for a limit, floored at zero
    pub fn remaining_ms(&self, limit_ms: u64) -> u64 {
        limit_ms.saturating_sub(self.elapsed_ms())
    }
}
