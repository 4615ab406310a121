//! The scheduled callback behind the focus timer.
//!
//! A [`Ticker`] does not own a thread. The caller's event loop asks it how many
//! periods have elapsed and fires that many ticks; dropping the ticker is the
//! cancellation.

use std::time::{Duration, Instant};

/// Default tick period for the focus timer.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A fixed-period schedule anchored at the moment it was created.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    /// Create a ticker whose first tick is due one period after `now`.
    #[must_use]
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of whole periods that have come due by `now`.
    ///
    /// Advances the schedule past every period it reports, so each period is
    /// reported exactly once even if the caller polls late.
    pub fn due(&mut self, now: Instant) -> u32 {
        let mut count = 0;
        while self.next_due <= now {
            count += 1;
            self.next_due += self.period;
        }
        count
    }

    /// Time left until the next tick, zero if one is already due.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// The configured period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_first_period() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK_PERIOD, start);

        assert_eq!(ticker.due(start), 0);
        assert_eq!(ticker.due(start + Duration::from_millis(999)), 0);
    }

    #[test]
    fn test_one_tick_per_period() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK_PERIOD, start);

        assert_eq!(ticker.due(start + Duration::from_secs(1)), 1);
        assert_eq!(ticker.due(start + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.due(start + Duration::from_secs(2)), 1);
    }

    #[test]
    fn test_catches_up_after_late_poll() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK_PERIOD, start);

        assert_eq!(ticker.due(start + Duration::from_millis(5200)), 5);
        assert_eq!(ticker.due(start + Duration::from_millis(5900)), 0);
        assert_eq!(ticker.due(start + Duration::from_secs(6)), 1);
    }

    #[test]
    fn test_until_next() {
        let start = Instant::now();
        let ticker = Ticker::new(TICK_PERIOD, start);

        assert_eq!(ticker.until_next(start), TICK_PERIOD);
        assert_eq!(ticker.until_next(start + Duration::from_secs(3)), Duration::ZERO);
        assert_eq!(ticker.period(), TICK_PERIOD);
    }
}
