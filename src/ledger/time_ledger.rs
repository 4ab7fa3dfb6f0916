use anyhow::{bail, Result};

use super::game_clock::GameClock;
use super::player::{Player, PlayerId};
use super::segment::Segment;
use crate::renderer::{PlayerView, Presenter, SegmentView, Snapshot};
use crate::shared::constants;
use crate::sync::{Millis, TimeSource};
use crate::utils::logger;
use crate::utils::time_utils::format_time;

/// Owns the game clock and every player's accumulators.
///
/// State changes only through the event handlers below. Each handler samples
/// the time source once, applies the event, then hands a fresh snapshot to the
/// presenter.
pub struct Ledger<C: TimeSource, P: Presenter> {
    clock: C,
    presenter: P,
    game: GameClock,
    segment: Segment,
    players: Vec<Player>,
}

impl<C: TimeSource, P: Presenter> Ledger<C, P> {
    /// Full roster (players `1..=9`), clock paused at zero, segment `Q1-A`.
    pub fn new(clock: C, presenter: P) -> Self {
        Self {
            clock,
            presenter,
            game: GameClock::default(),
            segment: Segment::default(),
            players: (1..=constants::ROSTER_SIZE).map(Player::new).collect(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    pub fn elapsed(&self) -> Millis {
        self.game.elapsed(self.clock.now())
    }

    pub fn game_clock(&self) -> &GameClock {
        &self.game
    }

    pub fn current_segment(&self) -> Segment {
        self.segment
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn start_clock(&mut self) -> Result<()> {
        let now = self.clock.now();
        if !self.game.start(now) {
            return Ok(());
        }

        let mut opened = 0;
        for player in self.players.iter_mut().filter(|p| p.is_in) {
            player.open(now);
            opened += 1;
        }

        logger::debug(&format!(
            "clock started at {} (game {}), {} interval(s) opened",
            now,
            format_time(self.game.elapsed(now)),
            opened
        ));

        self.notify(now)
    }

    pub fn pause_clock(&mut self) -> Result<()> {
        let now = self.clock.now();
        if !self.game.pause(now) {
            return Ok(());
        }

        let segment = self.segment;
        for player in self.players.iter_mut().filter(|p| p.has_open_interval()) {
            let credited = player.close(now, segment);
            logger::debug(&format!(
                "player {} credited {}ms to {} on pause",
                player.id, credited, segment
            ));
        }

        logger::debug(&format!(
            "clock paused at {} (game {})",
            now,
            format_time(self.game.elapsed(now))
        ));

        self.notify(now)
    }

    pub fn toggle_clock(&mut self) -> Result<()> {
        if self.game.is_running() {
            self.pause_clock()
        } else {
            self.start_clock()
        }
    }

    /// Flip a player between in and out. An unknown id is rejected and
    /// leaves the ledger untouched.
    pub fn toggle_player(&mut self, id: PlayerId) -> Result<()> {
        let now = self.clock.now();
        let running = self.game.is_running();
        let segment = self.segment;

        let Some(player) = self.players.iter_mut().find(|p| p.id == id) else {
            bail!("unknown player id {}", id);
        };

        if player.is_in {
            player.is_in = false;
            let credited = player.close(now, segment);
            logger::debug(&format!(
                "player {} out, credited {}ms to {}",
                id, credited, segment
            ));
        } else {
            player.is_in = true;
            // While paused the interval opens on the next clock start
            if running {
                player.open(now);
            }
            logger::debug(&format!(
                "player {} in ({})",
                id,
                if running { "interval open" } else { "pending clock start" }
            ));
        }

        self.notify(now)
    }

    pub fn switch_segment(&mut self, next: Segment) -> Result<()> {
        if next == self.segment {
            return Ok(());
        }

        let now = self.clock.now();
        let previous = self.segment;

        // Every open interval is credited to the outgoing segment first
        for player in self.players.iter_mut().filter(|p| p.has_open_interval()) {
            player.roll_forward(now, previous);
        }
        self.segment = next;

        logger::debug(&format!("segment {} -> {} at {}", previous, next, now));

        self.notify(now)
    }

    /// Periodic display refresh. Player accumulators are left alone.
    pub fn tick(&mut self) -> Result<()> {
        if !self.game.is_running() {
            return Ok(());
        }

        let now = self.clock.now();
        self.game.sync(now);
        self.notify(now)
    }

    /// Redraw without changing anything.
    pub fn refresh(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.notify(now)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(self.clock.now())
    }

    fn snapshot_at(&self, now: Millis) -> Snapshot {
        let elapsed = self.game.elapsed(now);

        Snapshot {
            clock: format_time(elapsed),
            running: self.game.is_running(),
            elapsed_ms: elapsed,
            segment: self.segment,
            players: self
                .players
                .iter()
                .map(|player| {
                    let total = player.live_total(now);
                    PlayerView {
                        id: player.id,
                        is_in: player.is_in,
                        interval_open: player.has_open_interval(),
                        total_ms: total,
                        formatted_total: format_time(total),
                        segments: player
                            .segment_times()
                            .map(|(segment, ms)| SegmentView::new(segment, ms))
                            .collect(),
                    }
                })
                .collect(),
        }
    }

    fn notify(&mut self, now: Millis) -> Result<()> {
        let snapshot = self.snapshot_at(now);
        self.presenter.render(&snapshot)
    }
}
