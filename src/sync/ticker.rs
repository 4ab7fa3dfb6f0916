use std::time::{Duration, Instant};

use crate::shared::constants;

/// Periodic display tick, armed only while the game clock runs.
///
/// The board's event loop asks how long it may block on input and fires a
/// tick whenever the deadline has passed.
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
    ticks_fired: u64,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            ticks_fired: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }

    /// Arm the ticker. Re-arming an active ticker keeps its schedule.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Disarm the ticker. Stopping a stopped ticker does nothing.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// How long the caller may wait for input before the next tick is due.
    /// `idle` is returned while the ticker is stopped.
    pub fn poll_timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => idle,
        }
    }

    /// Returns true (and schedules the next deadline) when a tick is due.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };

        if now < due {
            return false;
        }

        // Far behind (e.g. the loop was blocked), skip the backlog
        if now > due + self.interval * constants::TICK_RESYNC_INTERVALS {
            self.next_due = Some(now + self.interval);
        } else {
            self.next_due = Some(due + self.interval);
        }

        self.ticks_fired += 1;
        true
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_millis(constants::DEFAULT_TICK_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: Duration = Duration::from_millis(50);

    #[test]
    fn stopped_ticker_never_fires() {
        let mut ticker = Ticker::default();
        let now = Instant::now();

        assert!(!ticker.is_active());
        assert!(!ticker.fire_if_due(now + Duration::from_secs(10)));
        assert_eq!(ticker.poll_timeout(now, IDLE), IDLE);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(500));
        let t0 = Instant::now();
        ticker.start(t0);

        assert!(!ticker.fire_if_due(t0 + Duration::from_millis(499)));
        assert!(ticker.fire_if_due(t0 + Duration::from_millis(500)));
        assert!(!ticker.fire_if_due(t0 + Duration::from_millis(700)));
        assert!(ticker.fire_if_due(t0 + Duration::from_millis(1_000)));
        assert_eq!(ticker.ticks_fired(), 2);
    }

    #[test]
    fn poll_timeout_counts_down_to_deadline() {
        let mut ticker = Ticker::new(Duration::from_millis(500));
        let t0 = Instant::now();
        ticker.start(t0);

        assert_eq!(
            ticker.poll_timeout(t0 + Duration::from_millis(200), IDLE),
            Duration::from_millis(300)
        );
        assert_eq!(
            ticker.poll_timeout(t0 + Duration::from_millis(900), IDLE),
            Duration::ZERO
        );
    }

    #[test]
    fn resyncs_after_long_stall() {
        let mut ticker = Ticker::new(Duration::from_millis(500));
        let t0 = Instant::now();
        ticker.start(t0);

        let late = t0 + Duration::from_millis(5_000);
        assert!(ticker.fire_if_due(late));
        // Backlog is dropped instead of firing ten ticks in a row
        assert!(!ticker.fire_if_due(late + Duration::from_millis(10)));
    }

    #[test]
    fn stop_is_idempotent_and_restart_reschedules() {
        let mut ticker = Ticker::new(Duration::from_millis(500));
        let t0 = Instant::now();
        ticker.start(t0);
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_active());

        let t1 = t0 + Duration::from_millis(2_000);
        ticker.start(t1);
        assert!(!ticker.fire_if_due(t1 + Duration::from_millis(100)));
        assert!(ticker.fire_if_due(t1 + Duration::from_millis(500)));
    }
}
