//! Millisecond-tick timing helpers
//!
//! The controller is polled with a monotonic millisecond counter; all
//! arithmetic wraps so the counter may roll over freely.

/// Fixed-period timer that compensates poll-loop jitter
///
/// After each firing the next interval is shortened by the overshoot
/// (clamped at zero), so the average cadence holds the period even when the
/// host loop arrives late.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicTimer {
    period_ms: u32,
    last_ms: u32,
    duration_ms: u32,
}

impl PeriodicTimer {
    /// Create a timer that fires on the first poll and then every `period_ms`
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: 0,
            duration_ms: 0,
        }
    }

    /// Check the deadline, re-arming when it has elapsed
    ///
    /// Returns true exactly once per elapsed period.
    pub fn fire(&mut self, now_ms: u32) -> bool {
        let elapsed = now_ms.wrapping_sub(self.last_ms);
        if elapsed < self.duration_ms {
            return false;
        }

        let overshoot = elapsed - self.duration_ms;
        self.last_ms = now_ms;
        self.duration_ms = self.period_ms - self.period_ms.min(overshoot);
        true
    }
}
