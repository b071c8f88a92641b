use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::stdout;

use crate::config::current_theme_color;

pub type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

// ── Terminal setup / teardown ─────────────────────────────────────────────────

pub fn init_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// ── Padding ───────────────────────────────────────────────────────────────────
// Horizontal padding applied to every screen so text never touches the edges.
pub const H_PAD: u16 = 3;

/// Shrink a rect by H_PAD columns on each side.
pub fn pad_horizontal(area: Rect) -> Rect {
    let pad = H_PAD.min(area.width / 2);
    Rect {
        x: area.x + pad,
        y: area.y,
        width: area.width.saturating_sub(pad * 2),
        height: area.height,
    }
}

/// One padded line of `area`, `dy` rows down.
pub fn text_row(area: Rect, dy: u16) -> Rect {
    let inner = pad_horizontal(area);
    Rect {
        y: area.y + dy.min(area.height.saturating_sub(1)),
        height: 1,
        ..inner
    }
}

// ── Color helpers ─────────────────────────────────────────────────────────────

pub fn normal_style() -> Style {
    Style::default().fg(current_theme_color())
}
pub fn sel_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(current_theme_color())
        .add_modifier(Modifier::BOLD)
}
pub fn title_style() -> Style {
    Style::default()
        .fg(current_theme_color())
        .add_modifier(Modifier::BOLD)
}
pub fn dim_style() -> Style {
    Style::default()
        .fg(current_theme_color())
        .add_modifier(Modifier::DIM)
}

// ── Header ────────────────────────────────────────────────────────────────────

pub const HEADER_LINES: &[&str] = &[
    "ROBCO INDUSTRIES (TM) TERMLINK PROTOCOL",
    "ENTER PASSWORD NOW",
];

pub fn render_header(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = HEADER_LINES
        .iter()
        .map(|l| Line::from(Span::styled(*l, title_style())))
        .collect();
    let p = Paragraph::new(lines).alignment(Alignment::Left);
    f.render_widget(p, pad_horizontal(area));
}

/// Centered lines in the middle of the screen, e.g. the lockout notice.
pub fn render_centered(f: &mut Frame, area: Rect, lines: &[(&str, Style)]) {
    let mid = area.y + area.height / 2;
    let top = mid.saturating_sub(lines.len() as u16);
    for (i, (text, style)) in lines.iter().enumerate() {
        let y = top + (i as u16) * 2;
        if y >= area.y + area.height {
            break;
        }
        let row = Rect {
            y,
            height: 1,
            ..pad_horizontal(area)
        };
        f.render_widget(
            Paragraph::new(*text).alignment(Alignment::Center).style(*style),
            row,
        );
    }
}
