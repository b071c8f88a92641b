//! The non-selectable columns: memory addresses beside each active column
//! and the feedback log on the right.

use rand::Rng;
use std::collections::VecDeque;

use super::error::FeedbackError;
use super::{COLS, COL_WIDTH, ROWS};

pub const FEEDBACK_WIDTH: usize = 14;
/// Longest text a feedback line can hold after its `>` prefix.
pub const FEEDBACK_TEXT_MAX: usize = FEEDBACK_WIDTH - 1;
pub const HEX_WIDTH: usize = 6;

const ADDR_MIN: u16 = 0x1000;
const ADDR_MAX: u16 = 0xEFF6;

fn blank_line() -> String {
    " ".repeat(FEEDBACK_WIDTH)
}

fn blank_hover() -> String {
    format!(">{}", " ".repeat(FEEDBACK_TEXT_MAX))
}

fn format_line(text: &str) -> Result<String, FeedbackError> {
    let len = text.chars().count();
    if len > FEEDBACK_TEXT_MAX {
        return Err(FeedbackError::TooLong {
            text: text.to_string(),
            len,
            limit: FEEDBACK_TEXT_MAX,
        });
    }
    if text.is_empty() || text.starts_with(&['>', ' '][..]) {
        return Err(FeedbackError::Malformed(text.to_string()));
    }
    Ok(format!(">{text:<width$}", width = FEEDBACK_TEXT_MAX))
}

/// Scrolling log of [`ROWS`] lines; the last one is the hover line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackLog {
    lines: VecDeque<String>,
}

impl Default for FeedbackLog {
    fn default() -> Self {
        let mut lines: VecDeque<String> = (0..ROWS - 1).map(|_| blank_line()).collect();
        lines.push_back(blank_hover());
        Self { lines }
    }
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn hover_line(&self) -> &str {
        self.lines.back().map(String::as_str).unwrap_or_default()
    }

    /// Write `text` to the hover line.
    pub fn hover(&mut self, text: &str) -> Result<(), FeedbackError> {
        let line = format_line(text)?;
        if let Some(hover) = self.lines.back_mut() {
            *hover = line;
        }
        Ok(())
    }

    /// Scroll `items` in above the hover line, dropping the oldest lines, and
    /// blank the hover line. Nothing is written unless every item is valid.
    pub fn push(&mut self, items: &[&str]) -> Result<(), FeedbackError> {
        let formatted = items
            .iter()
            .map(|text| format_line(text))
            .collect::<Result<Vec<_>, _>>()?;
        self.lines.pop_back();
        for line in formatted {
            self.lines.pop_front();
            self.lines.push_back(line);
        }
        self.lines.push_back(blank_hover());
        Ok(())
    }
}

/// Address labels for the two active columns, one per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColumns {
    columns: [Vec<String>; COLS],
    base: u16,
}

impl HexColumns {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut base = rng.gen_range(ADDR_MIN..=ADDR_MAX);
        base += base % 2;
        let labels = |col: usize| -> Vec<String> {
            (0..ROWS)
                .map(|row| {
                    let addr = base as usize + (col * ROWS + row) * COL_WIDTH;
                    format!("0x{addr:04X}")
                })
                .collect()
        };
        Self {
            columns: [labels(0), labels(1)],
            base,
        }
    }

    pub fn base(&self) -> u16 {
        self.base
    }

    pub fn column(&self, column: usize) -> &[String] {
        self.columns.get(column).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn label(&self, column: usize, row: usize) -> &str {
        self.column(column)
            .get(row)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
