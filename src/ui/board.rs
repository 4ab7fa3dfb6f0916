use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};

use crate::core::action::Action;
use crate::core::config::Config;
use crate::ledger::{Ledger, Segment};
use crate::renderer::{PlayerView, Presenter, Roster, Snapshot};
use crate::shared::constants;
use crate::sync::{SystemClock, Ticker};

type UiTerminal = Terminal<CrosstermBackend<io::Stderr>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Apply(Action),
}

/// Key binding table. `current` decides what the arrow keys mean.
pub fn map_key(key: KeyCode, current: Segment) -> Option<Command> {
    match key {
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Apply(Action::ToggleClock)),
        KeyCode::Char(c @ '1'..='9') => {
            let id = c as u8 - b'0';
            (id <= constants::ROSTER_SIZE).then_some(Command::Apply(Action::Player(id)))
        }
        KeyCode::Char(c @ 'a'..='h') => Segment::from_index((c as u8 - b'a') as usize)
            .map(|segment| Command::Apply(Action::Segment(segment))),
        KeyCode::Left | KeyCode::Char('[') => {
            Some(Command::Apply(Action::Segment(current.previous())))
        }
        KeyCode::Right | KeyCode::Char(']') => Some(Command::Apply(Action::Segment(current.next()))),
        _ => None,
    }
}

/// Draws the ledger onto the alternate screen.
pub struct BoardPresenter {
    terminal: UiTerminal,
    roster: Roster,
}

impl BoardPresenter {
    fn new(terminal: UiTerminal, roster: Roster) -> Self {
        Self { terminal, roster }
    }
}

impl Presenter for BoardPresenter {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        let roster = &self.roster;
        self.terminal
            .draw(|frame| draw_board(frame, snapshot, roster))
            .context("failed to draw board")?;
        Ok(())
    }
}

/// Run the interactive board until the user quits; returns the final state.
pub fn run_board(config: &Config) -> Result<Snapshot> {
    let terminal = setup_terminal()?;
    let presenter = BoardPresenter::new(terminal, config.roster());
    let mut ledger = Ledger::new(SystemClock::new(), presenter);
    let mut ticker = Ticker::new(config.tick_interval());

    let run_result = run_app(&mut ledger, &mut ticker);
    let snapshot = ledger.snapshot();
    let restore_result = restore_terminal(&mut ledger.presenter_mut().terminal);

    if let Err(err) = restore_result {
        crate::utils::logger::error(&format!("Failed to restore terminal from board: {}", err));
    }

    run_result?;

    crate::utils::logger::info(&format!(
        "board closed at {} ({} ticks)",
        snapshot.clock,
        ticker.ticks_fired()
    ));
    Ok(snapshot)
}

fn setup_terminal() -> Result<UiTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen, Hide).context("failed to switch to alternate screen")?;

    let backend = CrosstermBackend::new(stderr);
    let terminal = Terminal::new(backend).context("failed to initialize terminal backend")?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut UiTerminal) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

fn run_app(ledger: &mut Ledger<SystemClock, BoardPresenter>, ticker: &mut Ticker) -> Result<()> {
    let idle = Duration::from_millis(constants::IDLE_POLL_MS);
    ledger.refresh()?;

    loop {
        let timeout = ticker.poll_timeout(Instant::now(), idle);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match map_key(key.code, ledger.current_segment()) {
                        Some(Command::Quit) => break,
                        Some(Command::Apply(action)) => action.apply(ledger)?,
                        None => {}
                    }
                }
                Event::Resize(_, _) => ledger.refresh()?,
                _ => {}
            }
        }

        // The tick runs only while the game clock does
        let now = Instant::now();
        if ledger.is_running() {
            ticker.start(now);
        } else {
            ticker.stop();
        }

        if ticker.fire_if_due(now) {
            ledger.tick()?;
        }
    }

    Ok(())
}

fn draw_board(frame: &mut Frame<'_>, snapshot: &Snapshot, roster: &Roster) {
    let area = frame.size();

    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!(" {} ", constants::APP_NAME),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_clock(frame, layout[0], snapshot);
    draw_segments(frame, layout[1], snapshot.segment);
    draw_players(frame, layout[2], snapshot, roster);
    draw_footer(frame, layout[3]);
}

fn draw_clock(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let (state, color) = if snapshot.running {
        ("RUNNING", Color::Green)
    } else {
        ("PAUSED", Color::Yellow)
    };

    let clock = Paragraph::new(Line::from(vec![
        Span::styled(
            snapshot.clock.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(state, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Game clock"));

    frame.render_widget(clock, area);
}

fn draw_segments(frame: &mut Frame<'_>, area: Rect, current: Segment) {
    let titles: Vec<Line<'_>> = Segment::ALL
        .iter()
        .enumerate()
        .map(|(i, seg)| Line::from(format!("{} {}", (b'a' + i as u8) as char, seg)))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Segment"))
        .select(current.index())
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn draw_players(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, roster: &Roster) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (row_index, chunk) in snapshot.players.chunks(3).enumerate() {
        let Some(row) = rows.get(row_index) else {
            break;
        };

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(*row);

        for (player, cell) in chunk.iter().zip(cells.iter()) {
            draw_player_card(frame, *cell, player, roster, snapshot.segment);
        }
    }
}

fn draw_player_card(
    frame: &mut Frame<'_>,
    area: Rect,
    player: &PlayerView,
    roster: &Roster,
    current: Segment,
) {
    let border = if player.is_in {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let badge = match (player.is_in, player.interval_open) {
        (true, true) => "IN",
        (true, false) => "IN (waiting)",
        (false, _) => "OUT",
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            player.formatted_total.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(badge, border),
    ])];

    // Two segments per line keeps a card at four rows of breakdown
    for pair in player.segments.chunks(2) {
        let spans = pair
            .iter()
            .flat_map(|seg| {
                let style = if seg.segment == current {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                [
                    Span::styled(format!("{} {:>6}", seg.segment, seg.formatted), style),
                    Span::raw("  "),
                ]
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} {} ", player.id, roster.name(player.id))),
    );

    frame.render_widget(card, area);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        constants::BOARD_HELP,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Left);

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_clock_and_quit_keys() {
        assert_eq!(map_key(KeyCode::Char('q'), Segment::Q1A), Some(Command::Quit));
        assert_eq!(map_key(KeyCode::Esc, Segment::Q1A), Some(Command::Quit));
        assert_eq!(
            map_key(KeyCode::Char(' '), Segment::Q1A),
            Some(Command::Apply(Action::ToggleClock))
        );
        assert_eq!(
            map_key(KeyCode::Enter, Segment::Q1A),
            Some(Command::Apply(Action::ToggleClock))
        );
    }

    #[test]
    fn digits_toggle_players() {
        assert_eq!(
            map_key(KeyCode::Char('1'), Segment::Q1A),
            Some(Command::Apply(Action::Player(1)))
        );
        assert_eq!(
            map_key(KeyCode::Char('9'), Segment::Q1A),
            Some(Command::Apply(Action::Player(9)))
        );
        assert_eq!(map_key(KeyCode::Char('0'), Segment::Q1A), None);
    }

    #[test]
    fn letters_and_arrows_pick_segments() {
        assert_eq!(
            map_key(KeyCode::Char('a'), Segment::Q3A),
            Some(Command::Apply(Action::Segment(Segment::Q1A)))
        );
        assert_eq!(
            map_key(KeyCode::Char('h'), Segment::Q1A),
            Some(Command::Apply(Action::Segment(Segment::Q4B)))
        );
        assert_eq!(
            map_key(KeyCode::Right, Segment::Q2A),
            Some(Command::Apply(Action::Segment(Segment::Q2B)))
        );
        assert_eq!(
            map_key(KeyCode::Char('['), Segment::Q2A),
            Some(Command::Apply(Action::Segment(Segment::Q1B)))
        );
        assert_eq!(map_key(KeyCode::Char('i'), Segment::Q1A), None);
    }
}
