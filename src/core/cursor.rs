use super::entry::CellRef;
use super::{COLS, COL_WIDTH, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Player position over the two active columns. Movement stops at the grid
/// edges; left/right walk across the gap between the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    column: usize,
    row: usize,
    position: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> CellRef {
        CellRef::new(self.column, self.row, self.position)
    }

    /// Returns whether the cursor moved.
    pub fn step(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Up if self.row > 0 => self.row -= 1,
            Direction::Down if self.row + 1 < ROWS => self.row += 1,
            Direction::Left if self.position > 0 => self.position -= 1,
            Direction::Left if self.column > 0 => {
                self.column -= 1;
                self.position = COL_WIDTH - 1;
            }
            Direction::Right if self.position + 1 < COL_WIDTH => self.position += 1,
            Direction::Right if self.column + 1 < COLS => {
                self.column += 1;
                self.position = 0;
            }
            _ => return false,
        }
        true
    }

    /// Same row and position in the other column.
    pub fn jump_column(&mut self) {
        self.column = (self.column + 1) % COLS;
    }
}
