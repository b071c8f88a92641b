use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::sel_style;

// ── Status bar ────────────────────────────────────────────────────────────────

fn status_text(now: &str, right: &str, width: usize) -> (String, String, String) {
    let left = format!(" {now}");
    let right = if right.is_empty() {
        String::new()
    } else {
        format!("{right} ")
    };
    let used = left.chars().count() + right.chars().count();
    let pad = " ".repeat(width.saturating_sub(used));
    (left, pad, right)
}

/// Clock on the left, `right` (difficulty, tries) on the right.
pub fn render_status_bar(f: &mut Frame, area: Rect, right: &str) {
    if area.height == 0 {
        return;
    }
    let now = Local::now().format("%A, %d. %B - %I:%M%p").to_string();
    let (left, pad, right) = status_text(&now, right, area.width as usize);
    let line = Line::from(vec![
        Span::styled(left, sel_style()),
        Span::styled(pad, sel_style()),
        Span::styled(right, sel_style()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
