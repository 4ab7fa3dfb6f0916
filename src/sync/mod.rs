pub mod clock;
pub mod ticker;

pub use clock::{ManualClock, Millis, SystemClock, TimeSource};
pub use ticker::Ticker;
