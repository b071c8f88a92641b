use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{debug, info};
use ratatui::{
    layout::{Constraint, Direction as Axis, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

use crate::core::columns::FEEDBACK_WIDTH;
use crate::core::{Cursor, Direction, HackingGame, SelectOutcome, COLS, COL_WIDTH, ROWS};
use crate::status::render_status_bar;
use crate::ui::{
    dim_style, normal_style, render_centered, render_header, sel_style, text_row, Term,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HackOutcome {
    Granted,
    Locked,
    Cancelled,
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn attempts_line(game: &HackingGame) -> String {
    let left = game.attempts();
    let boxes = "■ ".repeat(left) + &"□ ".repeat(game.max_tries().saturating_sub(left));
    if left <= 1 {
        format!("!!! WARNING: LOCKOUT IMMINENT !!!  {}", boxes.trim())
    } else {
        format!("{left} ATTEMPT(S) LEFT:  {}", boxes.trim())
    }
}

/// One screen row: both address/active column pairs, then the feedback line.
/// The word (or single cell) under the cursor is highlighted.
fn row_line(game: &HackingGame, row: usize, cursor: &Cursor) -> Line<'static> {
    let at = cursor.location();
    let highlight = game.target_span(at);
    let mut spans = Vec::with_capacity(COLS * (COL_WIDTH + 2) + 1);

    for column in 0..COLS {
        spans.push(Span::styled(game.hex().label(column, row).to_string(), dim_style()));
        spans.push(Span::raw(" "));
        let Some(grid_row) = game.grid().row(column, row) else {
            continue;
        };
        let here = column == at.column && row == at.row;
        for (pos, cell) in grid_row.cells().iter().enumerate() {
            let lit = here
                && match highlight {
                    Some(span) => span.contains(pos),
                    None => pos == at.position,
                };
            let style = if lit { sel_style() } else { normal_style() };
            spans.push(Span::styled(cell.ch.to_string(), style));
        }
        spans.push(Span::raw(" "));
    }
    let feedback = game.feedback().line(row).unwrap_or_default();
    spans.push(Span::styled(format!("{feedback:<FEEDBACK_WIDTH$}"), normal_style()));
    Line::from(spans)
}

fn draw_grid_frame(f: &mut Frame, game: &HackingGame, cursor: &Cursor, label: &str) {
    let chunks = Layout::default()
        .direction(Axis::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(ROWS as u16),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    f.render_widget(
        Paragraph::new(attempts_line(game)).style(normal_style()),
        text_row(chunks[2], 0),
    );

    let lines: Vec<Line> = (0..ROWS).map(|r| row_line(game, r, cursor)).collect();
    let grid_area = text_row(chunks[4], 0);
    f.render_widget(
        Paragraph::new(lines),
        Rect {
            height: chunks[4].height,
            ..grid_area
        },
    );

    f.render_widget(
        Paragraph::new("ARROWS/WASD=Move  TAB=Next Column  ENTER=Select  q=cancel")
            .style(dim_style()),
        text_row(chunks[6], 0),
    );
    render_status_bar(f, chunks[7], label);
}

fn draw_notice(terminal: &mut Term, lines: &[(&str, Style)]) -> Result<()> {
    terminal.draw(|f| {
        let area = f.area();
        render_centered(f, area, lines);
        render_status_bar(
            f,
            Rect {
                y: area.height.saturating_sub(1),
                height: 1,
                ..area
            },
            "",
        );
    })?;
    Ok(())
}

// ── Overlay screens ───────────────────────────────────────────────────────────

fn draw_security_override(terminal: &mut Term) -> Result<()> {
    draw_notice(terminal, &[("SECURITY OVERRIDE", normal_style())])?;
    std::thread::sleep(Duration::from_millis(1200));
    Ok(())
}

fn wait_for_enter() -> Result<()> {
    loop {
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc) {
                    return Ok(());
                }
            }
        }
    }
}

/// "TERMINAL LOCKED" screen. Waits for Enter.
pub fn draw_terminal_locked(terminal: &mut Term) -> Result<()> {
    draw_notice(
        terminal,
        &[
            ("TERMINAL LOCKED", normal_style()),
            ("PLEASE CONTACT AN ADMINISTRATOR", normal_style()),
            ("[ Press ENTER to Exit ]", dim_style()),
        ],
    )?;
    wait_for_enter()
}

pub fn draw_access_granted(terminal: &mut Term) -> Result<()> {
    draw_notice(
        terminal,
        &[
            ("ACCESS GRANTED", normal_style()),
            ("WELCOME TO ROBCO INDUSTRIES (TM) TERMLINK", normal_style()),
            ("[ Press ENTER to Exit ]", dim_style()),
        ],
    )?;
    wait_for_enter()
}

// ── Minigame entry point ──────────────────────────────────────────────────────

fn movement(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

/// Play `game` until the password is found, the terminal locks, or the player
/// quits. `label` goes in the status bar.
pub fn run_hacking(terminal: &mut Term, mut game: HackingGame, label: &str) -> Result<HackOutcome> {
    draw_security_override(terminal)?;
    let mut cursor = Cursor::new();

    loop {
        if !game.is_solved() && !game.is_locked_out() {
            game.hover(cursor.location())?;
        }
        terminal.draw(|f| draw_grid_frame(f, &game, &cursor, label))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(direction) = movement(key.code) {
            cursor.step(direction);
            continue;
        }
        match key.code {
            KeyCode::Tab => cursor.jump_column(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let outcome = game.select(cursor.location())?;
                debug!("outcome {}", outcome.code());
                match outcome {
                    SelectOutcome::Success => {
                        terminal.draw(|f| draw_grid_frame(f, &game, &cursor, label))?;
                        std::thread::sleep(Duration::from_millis(900));
                        draw_access_granted(terminal)?;
                        return Ok(HackOutcome::Granted);
                    }
                    SelectOutcome::LockedOut => {
                        terminal.draw(|f| draw_grid_frame(f, &game, &cursor, label))?;
                        std::thread::sleep(Duration::from_millis(900));
                        draw_terminal_locked(terminal)?;
                        return Ok(HackOutcome::Locked);
                    }
                    _ => {}
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("hacking cancelled with {} attempts left", game.attempts());
                return Ok(HackOutcome::Cancelled);
            }
            _ => {}
        }
    }
}
