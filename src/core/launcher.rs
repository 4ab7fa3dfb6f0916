use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

use crate::core::config::Config;
use crate::core::replay;
use crate::renderer::console::write_summary;
use crate::renderer::{ConsolePresenter, Roster, Silent, Snapshot};

/// Interactive session: board, then the final table on stdout.
pub fn run(config: &Config, export: Option<&Path>) -> Result<()> {
    crate::utils::logger::info(&format!(
        "launch board: tick={}ms export={}",
        config.tick_ms,
        export
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".to_string())
    ));

    let snapshot = crate::ui::board::run_board(config)?;

    println!("\nFinal playing time");
    write_summary(&mut io::stdout().lock(), &snapshot, &config.roster())?;

    if let Some(path) = export {
        export_snapshot(&snapshot, path)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}

/// Headless replay of a scripted game.
pub fn run_replay(config: &Config, script: &Path, trace: bool, json: bool) -> Result<()> {
    let events = replay::load_script(script)?;
    let roster = config.roster();

    let snapshot = if trace {
        let presenter = ConsolePresenter::new(io::stdout(), roster.clone());
        replay::replay(&events, presenter)?.snapshot()
    } else {
        replay::replay(&events, Silent)?.snapshot()
    };

    print_final(&snapshot, &roster, json)
}

fn print_final(snapshot: &Snapshot, roster: &Roster, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        write_summary(&mut io::stdout().lock(), snapshot, roster)?;
    }
    Ok(())
}

pub fn export_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to encode snapshot")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Ledger, Segment};
    use crate::sync::ManualClock;

    #[test]
    fn exported_snapshot_is_readable_json() {
        let clock = ManualClock::new(0);
        let mut ledger = Ledger::new(clock.clone(), Silent);
        ledger.toggle_player(6).unwrap();
        ledger.start_clock().unwrap();
        clock.set(90_000);
        ledger.switch_segment(Segment::Q1B).unwrap();
        ledger.pause_clock().unwrap();

        let dir = std::env::temp_dir().join("playtime_export_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("final.json");
        export_snapshot(&ledger.snapshot(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["clock"], "1:30");
        assert_eq!(value["segment"], "Q1-B");
        assert_eq!(value["players"][5]["id"], 6);
        assert_eq!(value["players"][5]["formatted_total"], "1:30");
        assert_eq!(value["players"][5]["segments"][0]["segment"], "Q1-A");
        assert_eq!(value["players"][5]["segments"][0]["ms"], 90_000);
    }
}
