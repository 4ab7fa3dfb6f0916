//! Sideline playing-time tracker.
//!
//! [`ledger::Ledger`] turns clock, substitution and segment events into
//! per-player, per-segment playing time. Anything implementing
//! [`renderer::Presenter`] can display it: the terminal board in [`ui`], the
//! text presenter in [`renderer::console`], or nothing at all.

pub mod core;
pub mod ledger;
pub mod renderer;
pub mod shared;
pub mod sync;
pub mod ui;
pub mod utils;
