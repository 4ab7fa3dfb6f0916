pub mod game_clock;
pub mod player;
pub mod segment;
pub mod time_ledger;

pub use game_clock::GameClock;
pub use player::{Player, PlayerId};
pub use segment::Segment;
pub use time_ledger::Ledger;
