use super::segment::Segment;
use crate::sync::Millis;

pub type PlayerId = u8;

/// Per-player accumulators.
///
/// `open_since` is set only while the player is in and the game clock runs.
/// Outside an open interval, `total_time` equals the sum of `segment_times`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub is_in: bool,
    pub total_time: Millis,
    pub open_since: Option<Millis>,
    segment_times: [Millis; Segment::COUNT],
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            is_in: false,
            total_time: 0,
            open_since: None,
            segment_times: [0; Segment::COUNT],
        }
    }

    pub fn segment_time(&self, segment: Segment) -> Millis {
        self.segment_times[segment.index()]
    }

    /// Committed time per segment, in game order.
    pub fn segment_times(&self) -> impl Iterator<Item = (Segment, Millis)> + '_ {
        Segment::ALL
            .iter()
            .map(move |seg| (*seg, self.segment_times[seg.index()]))
    }

    pub fn segment_sum(&self) -> Millis {
        self.segment_times.iter().sum()
    }

    pub fn has_open_interval(&self) -> bool {
        self.open_since.is_some()
    }

    /// Committed time plus whatever the open interval has accrued so far.
    /// Nothing is written back.
    pub fn live_total(&self, now: Millis) -> Millis {
        match self.open_since {
            Some(since) => self.total_time + now.saturating_sub(since),
            None => self.total_time,
        }
    }

    pub(super) fn open(&mut self, now: Millis) {
        self.open_since = Some(now);
    }

    /// Credit the open interval to `segment` and close it.
    pub(super) fn close(&mut self, now: Millis, segment: Segment) -> Millis {
        let credited = self.credit(now, segment);
        self.open_since = None;
        credited
    }

    /// Credit the open interval to `segment` and keep accruing from `now`.
    pub(super) fn roll_forward(&mut self, now: Millis, segment: Segment) -> Millis {
        let credited = self.credit(now, segment);
        if self.open_since.is_some() {
            self.open_since = Some(now);
        }
        credited
    }

    fn credit(&mut self, now: Millis, segment: Segment) -> Millis {
        let Some(since) = self.open_since else {
            return 0;
        };

        let elapsed = now.saturating_sub(since);
        self.total_time += elapsed;
        self.segment_times[segment.index()] += elapsed;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_out_and_empty() {
        let player = Player::new(4);
        assert_eq!(player.id, 4);
        assert!(!player.is_in);
        assert_eq!(player.total_time, 0);
        assert_eq!(player.segment_sum(), 0);
        assert_eq!(player.segment_times().count(), 8);
    }

    #[test]
    fn close_credits_total_and_segment() {
        let mut player = Player::new(1);
        player.open(1_000);

        assert_eq!(player.close(4_500, Segment::Q2A), 3_500);
        assert_eq!(player.total_time, 3_500);
        assert_eq!(player.segment_time(Segment::Q2A), 3_500);
        assert!(!player.has_open_interval());
    }

    #[test]
    fn roll_forward_keeps_interval_open() {
        let mut player = Player::new(1);
        player.open(0);

        player.roll_forward(2_000, Segment::Q1A);
        assert_eq!(player.open_since, Some(2_000));
        assert_eq!(player.live_total(3_000), 3_000);
        assert_eq!(player.total_time, 2_000);
    }

    #[test]
    fn closing_without_interval_credits_nothing() {
        let mut player = Player::new(2);
        assert_eq!(player.close(9_000, Segment::Q1A), 0);
        assert_eq!(player.roll_forward(9_000, Segment::Q1A), 0);
        assert_eq!(player.open_since, None);
        assert_eq!(player.total_time, 0);
    }
}
