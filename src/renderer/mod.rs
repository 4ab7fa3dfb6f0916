pub mod console;
pub mod snapshot;

use anyhow::Result;

use crate::ledger::PlayerId;

pub use console::ConsolePresenter;
pub use snapshot::{PlayerView, SegmentView, Snapshot};

/// Display collaborator notified by the ledger after every change.
pub trait Presenter {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()>;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        (**self).render(snapshot)
    }
}

/// Presenter that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Presenter for Silent {
    fn render(&mut self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }
}

/// Display names for player ids.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: Vec<(PlayerId, String)>,
}

impl Roster {
    pub fn new(names: Vec<(PlayerId, String)>) -> Self {
        Self { names }
    }

    pub fn name(&self, id: PlayerId) -> String {
        self.names
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| format!("Player {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_falls_back_to_numbered_name() {
        let roster = Roster::new(vec![(3, "Sam".to_string())]);
        assert_eq!(roster.name(3), "Sam");
        assert_eq!(roster.name(7), "Player 7");
    }
}
