use std::fmt;

/// Identity shared by every cell of one placed word. The password is always
/// id 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub usize);

impl EntryId {
    pub const PASSWORD: EntryId = EntryId(0);
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Password,
    Secret,
    Dud { likeness: usize },
}

/// A selectable string placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub text: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_dud(&self) -> bool {
        matches!(self.kind, EntryKind::Dud { .. })
    }
}

/// Where a cell lives: active column (0 left, 1 right), row, char position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub column: usize,
    pub row: usize,
    pub position: usize,
}

impl CellRef {
    pub const fn new(column: usize, row: usize, position: usize) -> Self {
        Self {
            column,
            row,
            position,
        }
    }
}
