use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Milliseconds on the time source's own timeline.
pub type Millis = u64;

/// Source of "now" for the ledger.
///
/// Every ledger operation samples this exactly once, so a whole event is
/// accounted against a single instant.
pub trait TimeSource {
    fn now(&self) -> Millis;
}

/// Monotonic wall clock, counting from the moment it was created
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock for replays and tests.
///
/// Clones share the same reading, so the caller can keep one handle and move
/// another into the ledger.
#[derive(Clone, Default)]
pub struct ManualClock {
    current: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            current: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, at: Millis) {
        self.current.set(at);
    }

    pub fn advance(&self, by: Millis) {
        self.current.set(self.current.get().saturating_add(by));
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Millis {
        self.current.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_handles_share_reading() {
        let clock = ManualClock::new(100);
        let handle = clock.clone();

        handle.advance(250);
        assert_eq!(clock.now(), 350);

        clock.set(1_000);
        assert_eq!(handle.now(), 1_000);
    }

    #[test]
    fn system_clock_never_goes_backwards() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
