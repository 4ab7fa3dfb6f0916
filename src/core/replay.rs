use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use super::action::Action;
use crate::ledger::{Ledger, PlayerId, Segment};
use crate::renderer::Presenter;
use crate::sync::{ManualClock, Millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptEvent {
    pub line: usize,
    pub at: Millis,
    pub action: Action,
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&content).with_context(|| format!("invalid script {}", path.display()))
}

/// `<ms> <action> [arg]` per line; `#` starts a comment.
pub fn parse_script(content: &str) -> Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    let mut last_at: Millis = 0;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let mut words = text.split_whitespace();
        let (Some(at), Some(verb)) = (words.next(), words.next()) else {
            bail!("line {}: expected '<ms> <action>'", line);
        };

        let at: Millis = at
            .parse()
            .with_context(|| format!("line {}: '{}' is not a timestamp", line, at))?;
        if at < last_at {
            bail!("line {}: timestamp {} goes backwards (previous {})", line, at, last_at);
        }
        last_at = at;

        let arg = words.next();
        let action = match (verb.to_ascii_lowercase().as_str(), arg) {
            ("clock", None) => Action::ToggleClock,
            ("start", None) => Action::Start,
            ("pause", None) => Action::Pause,
            ("tick", None) => Action::Tick,
            ("player", Some(id)) => Action::Player(
                id.parse::<PlayerId>()
                    .with_context(|| format!("line {}: '{}' is not a player id", line, id))?,
            ),
            ("segment", Some(label)) => Action::Segment(
                label
                    .parse::<Segment>()
                    .with_context(|| format!("line {}: bad segment", line))?,
            ),
            _ => bail!("line {}: cannot understand '{}'", line, text),
        };

        if words.next().is_some() {
            bail!("line {}: trailing input in '{}'", line, text);
        }

        events.push(ScriptEvent { line, at, action });
    }

    Ok(events)
}

/// Feed the events through a fresh ledger on a hand-driven clock.
pub fn replay<P: Presenter>(events: &[ScriptEvent], presenter: P) -> Result<Ledger<ManualClock, P>> {
    let clock = ManualClock::new(0);
    let mut ledger = Ledger::new(clock.clone(), presenter);

    for event in events {
        clock.set(event.at);
        event
            .action
            .apply(&mut ledger)
            .with_context(|| format!("line {}: {:?} failed", event.line, event.action))?;
    }

    crate::utils::logger::info(&format!(
        "replayed {} event(s), game clock {}ms",
        events.len(),
        ledger.elapsed()
    ));
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{ConsolePresenter, Roster, Silent};

    const GAME: &str = "\
# two players, one segment change
0 start
0 player 3
0 player 1
5000 segment q1-b
8000 pause   # break
8000 player 1
12000 clock
15000 tick
16000 clock
";

    #[test]
    fn parses_actions_and_skips_comments() {
        let events = parse_script(GAME).unwrap();
        assert_eq!(events.len(), 9);
        assert_eq!(events[0].action, Action::Start);
        assert_eq!(events[3].action, Action::Segment(Segment::Q1B));
        assert_eq!(events[3].line, 5);
        assert_eq!(events[4].action, Action::Pause);
        assert_eq!(events[7].action, Action::Tick);
    }

    #[test]
    fn replays_a_short_game() {
        let events = parse_script(GAME).unwrap();
        let ledger = replay(&events, Silent).unwrap();

        let three = ledger.player(3).unwrap();
        assert_eq!(three.segment_time(Segment::Q1A), 5_000);
        assert_eq!(three.segment_time(Segment::Q1B), 3_000 + 4_000);
        assert_eq!(three.total_time, 12_000);

        // Player 1 went out during the break
        let one = ledger.player(1).unwrap();
        assert!(!one.is_in);
        assert_eq!(one.total_time, 8_000);

        assert!(!ledger.is_running());
        assert_eq!(ledger.elapsed(), 12_000);
    }

    #[test]
    fn trace_prints_every_update() {
        let events = parse_script("0 start\n0 player 2\n61000 pause\n").unwrap();
        let presenter = ConsolePresenter::new(Vec::new(), Roster::default());
        let ledger = replay(&events, presenter).unwrap();

        assert_eq!(ledger.presenter().frames(), 3);
        let out = String::from_utf8(ledger.into_presenter().into_inner()).unwrap();
        assert!(out.contains("[Q1-A] 1:01 paused"));
        assert!(out.contains("Player 2"));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_script("start").is_err());
        assert!(parse_script("abc start").is_err());
        assert!(parse_script("10 jump").is_err());
        assert!(parse_script("10 player").is_err());
        assert!(parse_script("10 player x").is_err());
        assert!(parse_script("10 segment Q9-Z").is_err());
        assert!(parse_script("10 start now").is_err());
        assert!(parse_script("10 start\n5 pause").is_err());
    }

    #[test]
    fn unknown_player_fails_with_line_number() {
        let events = parse_script("0 start\n100 player 12\n").unwrap();
        let Err(err) = replay(&events, Silent) else {
            panic!("expected an error for unknown player");
        };
        assert!(format!("{:#}", err).contains("line 2"));
    }
}
