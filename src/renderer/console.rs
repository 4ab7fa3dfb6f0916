use anyhow::{Context, Result};
use std::io::Write;

use super::{Presenter, Roster, Snapshot};

/// Writes one text block per display update.
pub struct ConsolePresenter<W: Write> {
    out: W,
    roster: Roster,
    frames: u64,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, roster: Roster) -> Self {
        Self {
            out,
            roster,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.frames += 1;
        write_summary(&mut self.out, snapshot, &self.roster)
            .context("failed to write display update")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Human-readable dump of a snapshot: clock line, then one line per player.
pub fn write_summary<W: Write>(out: &mut W, snapshot: &Snapshot, roster: &Roster) -> Result<()> {
    writeln!(
        out,
        "[{}] {} {}",
        snapshot.segment,
        snapshot.clock,
        if snapshot.running { "running" } else { "paused" }
    )?;

    for player in &snapshot.players {
        let breakdown = player
            .segments
            .iter()
            .map(|seg| format!("{} {}", seg.segment, seg.formatted))
            .collect::<Vec<_>>()
            .join("  ");

        writeln!(
            out,
            "{:<12} {:>3} {:>7} | {}",
            roster.name(player.id),
            if player.is_in { "IN" } else { "OUT" },
            player.formatted_total,
            breakdown
        )?;
    }

    Ok(())
}
