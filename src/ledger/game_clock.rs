use crate::sync::Millis;

/// Master game clock.
///
/// `elapsed` is authoritative only while paused. While running, the true
/// reading is `now - start_epoch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameClock {
    running: bool,
    start_epoch: Millis,
    elapsed: Millis,
}

impl GameClock {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_epoch(&self) -> Millis {
        self.start_epoch
    }

    pub fn elapsed(&self, now: Millis) -> Millis {
        if self.running {
            now.saturating_sub(self.start_epoch)
        } else {
            self.elapsed
        }
    }

    /// Backdates the epoch by the time already played so the reading resumes
    /// where it stopped. Returns false if already running.
    pub fn start(&mut self, now: Millis) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.start_epoch = now.saturating_sub(self.elapsed);
        true
    }

    /// Returns false if already paused.
    pub fn pause(&mut self, now: Millis) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.elapsed = now.saturating_sub(self.start_epoch);
        true
    }

    /// Refresh the cached reading while running (display only).
    pub fn sync(&mut self, now: Millis) {
        if self.running {
            self.elapsed = now.saturating_sub(self.start_epoch);
        }
    }
}
