use anyhow::Result;

use crate::ledger::{Ledger, PlayerId, Segment};
use crate::renderer::Presenter;
use crate::sync::TimeSource;

/// One input event, as a front end delivers it to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleClock,
    Start,
    Pause,
    Player(PlayerId),
    Segment(Segment),
    Tick,
}

impl Action {
    pub fn apply<C: TimeSource, P: Presenter>(self, ledger: &mut Ledger<C, P>) -> Result<()> {
        match self {
            Action::ToggleClock => ledger.toggle_clock(),
            Action::Start => ledger.start_clock(),
            Action::Pause => ledger.pause_clock(),
            Action::Player(id) => ledger.toggle_player(id),
            Action::Segment(segment) => ledger.switch_segment(segment),
            Action::Tick => ledger.tick(),
        }
    }
}
