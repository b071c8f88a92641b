//! Terminal hacking engine: word pools, grid layout and the selection state
//! machine. Nothing in here touches the terminal.

use rand::Rng;

pub mod columns;
pub mod cursor;
pub mod entry;
pub mod error;
pub mod grid;
pub mod hacking;
pub mod pool;
pub mod selector;
pub mod similarity;

#[cfg(test)]
mod test_words;

pub use columns::{FeedbackLog, HexColumns};
pub use cursor::{Cursor, Direction};
pub use entry::{CellRef, Entry, EntryId, EntryKind};
pub use error::{ConfigError, FeedbackError, GenerationError, HackError, HackResult, UsageError};
pub use grid::{Grid, Resolved, Span};
pub use hacking::{GameSetup, GameState, HackingGame, SelectOutcome};
pub use pool::{WordLengthRange, WordPool};

pub const COLS: usize = 2;
pub const ROWS: usize = 16;
pub const COL_WIDTH: usize = 12;

/// Padding around words. No brackets, so secrets stand out; no `>`, so any
/// single char is valid feedback.
pub const FILLER: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '+', '=', '-', '|', ':', ';', ',', '.', '?', '~', '`',
];

pub fn filler_char(rng: &mut impl Rng) -> char {
    FILLER[rng.gen_range(0..FILLER.len())]
}
