use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::entry::{CellRef, Entry, EntryId};
use super::error::{GenerationError, UsageError};
use super::{filler_char, COLS, COL_WIDTH, ROWS};

/// Shown in place of a removed dud.
pub const REMOVED_CHAR: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub owner: Option<EntryId>,
}

impl Cell {
    fn filler(ch: char) -> Self {
        Self { ch, owner: None }
    }
}

/// The selectable stretch of a row, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub id: EntryId,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn contains(&self, position: usize) -> bool {
        (self.start..=self.end).contains(&position)
    }

    pub fn is_front(&self, position: usize) -> bool {
        position == self.start
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
    span: Option<Span>,
}

impl Row {
    fn place(entry: &Entry, rng: &mut impl Rng) -> Self {
        let len = entry.len();
        let start = rng.gen_range(0..=COL_WIDTH - len);
        let mut cells = Vec::with_capacity(COL_WIDTH);
        cells.extend((0..start).map(|_| Cell::filler(filler_char(rng))));
        cells.extend(entry.text.chars().map(|ch| Cell {
            ch,
            owner: Some(entry.id),
        }));
        while cells.len() < COL_WIDTH {
            cells.push(Cell::filler(filler_char(rng)));
        }
        Self {
            cells,
            span: Some(Span {
                id: entry.id,
                start,
                end: start + len.saturating_sub(1),
            }),
        }
    }

    fn filler(rng: &mut impl Rng) -> Self {
        Self {
            cells: (0..COL_WIDTH).map(|_| Cell::filler(filler_char(rng))).collect(),
            span: None,
        }
    }

    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    fn clear_span(&mut self) {
        let Some(span) = self.span.take() else {
            return;
        };
        for cell in &mut self.cells[span.start..=span.end] {
            *cell = Cell::filler(REMOVED_CHAR);
        }
    }
}

/// What a grid position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A filler character outside any word.
    Filler(char),
    Word { entry: &'a Entry, span: Span },
}

/// Entries chosen for a game, not yet laid out.
#[derive(Debug, Clone)]
pub struct Unpopulated {
    entries: Vec<Entry>,
}

impl Unpopulated {
    /// `entries` must be indexed by id.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Pad every entry to a full row, top up with filler rows, shuffle and
    /// split into the two columns.
    pub fn populate(self, rng: &mut impl Rng) -> Result<Grid, GenerationError> {
        let capacity = COLS * ROWS;
        if self.entries.len() >= capacity {
            return Err(GenerationError::PoolTooLarge {
                entries: self.entries.len(),
                rows: capacity,
            });
        }
        if let Some(wide) = self.entries.iter().find(|e| e.len() > COL_WIDTH) {
            return Err(GenerationError::EntryTooWide {
                text: wide.text.clone(),
                width: COL_WIDTH,
            });
        }

        let mut rows: Vec<Row> = self.entries.iter().map(|e| Row::place(e, rng)).collect();
        while rows.len() < capacity {
            rows.push(Row::filler(rng));
        }
        rows.shuffle(rng);
        let right = rows.split_off(ROWS);
        let columns = [rows, right];

        let mut dud_locations: Vec<CellRef> = columns
            .iter()
            .enumerate()
            .flat_map(|(c, column)| {
                column.iter().enumerate().filter_map(move |(r, row)| {
                    row.span.map(|span| (CellRef::new(c, r, span.start), span.id))
                })
            })
            .filter(|(_, id)| self.entries[id.0].is_dud())
            .map(|(at, _)| at)
            .collect();
        dud_locations.shuffle(rng);
        debug!(
            "grid populated: {} entries, {} duds",
            self.entries.len(),
            dud_locations.len()
        );

        Ok(Grid {
            columns,
            entries: self.entries,
            dud_locations,
        })
    }
}

/// Two columns of [`ROWS`] rows, each [`COL_WIDTH`] characters.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: [Vec<Row>; COLS],
    entries: Vec<Entry>,
    dud_locations: Vec<CellRef>,
}

impl Grid {
    pub fn row(&self, column: usize, row: usize) -> Option<&Row> {
        self.columns.get(column)?.get(row)
    }

    pub fn column_text(&self, column: usize) -> Vec<String> {
        self.columns
            .get(column)
            .map(|rows| rows.iter().map(Row::text).collect())
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Duds still on the grid.
    pub fn dud_count(&self) -> usize {
        self.dud_locations.len()
    }

    /// Front cell of every entry still on the grid.
    pub fn fronts(&self) -> impl Iterator<Item = (CellRef, &Entry)> + '_ {
        self.columns.iter().enumerate().flat_map(move |(c, column)| {
            column.iter().enumerate().filter_map(move |(r, row)| {
                let span = row.span?;
                Some((CellRef::new(c, r, span.start), &self.entries[span.id.0]))
            })
        })
    }

    pub fn resolve(&self, at: CellRef) -> Result<Resolved<'_>, UsageError> {
        let row = self
            .row(at.column, at.row)
            .filter(|_| at.position < COL_WIDTH)
            .ok_or(UsageError::OutOfBounds {
                column: at.column,
                row: at.row,
                position: at.position,
            })?;
        match row.span {
            Some(span) if span.contains(at.position) => Ok(Resolved::Word {
                entry: &self.entries[span.id.0],
                span,
            }),
            _ => Ok(Resolved::Filler(row.cells[at.position].ch)),
        }
    }

    /// Blank out one remaining dud, chosen at layout time.
    pub fn remove_random_dud(&mut self) -> Option<&Entry> {
        let at = self.dud_locations.pop()?;
        let row = &mut self.columns[at.column][at.row];
        let id = row.span.map(|s| s.id)?;
        row.clear_span();
        self.entries.get(id.0)
    }
}
