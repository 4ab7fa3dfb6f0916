use serde::Serialize;

use crate::ledger::{PlayerId, Segment};
use crate::sync::Millis;
use crate::utils::time_utils::format_time;

/// Plain copy of everything a presenter needs to draw one frame.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Snapshot {
    pub clock: String,
    pub running: bool,
    pub elapsed_ms: Millis,
    pub segment: Segment,
    pub players: Vec<PlayerView>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub is_in: bool,
    pub interval_open: bool,
    /// Includes the in-progress interval.
    pub total_ms: Millis,
    pub formatted_total: String,
    /// Committed values only.
    pub segments: Vec<SegmentView>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SegmentView {
    pub segment: Segment,
    pub ms: Millis,
    pub formatted: String,
}

impl SegmentView {
    pub fn new(segment: Segment, ms: Millis) -> Self {
        Self {
            segment,
            ms,
            formatted: format_time(ms),
        }
    }
}

impl Snapshot {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }
}
