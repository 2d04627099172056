use crate::scope::{block_index, Cell, SCOPES};
use anyhow::Context;
use derive_more::{Display, Error};

pub type Digit = u8; // 1..=9

/// Candidate bitset; bit d set means digit d (1..=9) is still possible.
pub type DigitSet = u16;

pub const ALL_DIGITS: DigitSet = 0b11_1111_1110; // bits 1..=9

pub fn digit_count(set: DigitSet) -> usize {
    set.count_ones() as usize
}

pub fn digits_of(set: DigitSet) -> impl Iterator<Item = Digit> {
    (1..=9).filter(move |&d| set & (1u16 << d) != 0)
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum SolveError {
    /// Coordinate outside [0, 9). Programmer error, never recoverable.
    #[display("coordinate out of range: [{col}, {row}]")]
    OutOfRange { col: usize, row: usize },
    /// A cell's candidate set was emptied; the grid must be abandoned.
    #[display("contradiction: a cell has no candidates left")]
    Contradiction,
    /// Nothing left to branch on and the grid is unsolved; malformed puzzle.
    #[display("puzzle is unsolvable: no cell left to guess at")]
    Unsolvable,
}

/// Puzzle state: committed values plus per-cell candidate sets.
///
/// A committed cell has an empty candidate set; an unset cell always has at
/// least one candidate unless the grid is contradictory. Arrays are indexed
/// column-major (`Cell::idx`). `Clone` is a deep copy, which is what the
/// search relies on for branch isolation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    values: [Digit; 81],
    cands: [DigitSet; 81],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self { values: [0; 81], cands: [ALL_DIGITS; 81] }
    }

    /// Builds a grid from exactly 81 digit characters ('0' = blank), read in
    /// row-major text order; all non-digit characters are ignored, so both
    /// the nine-line batch-file blocks and compact 81-char strings parse.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let digits: Vec<Digit> = text
            .chars()
            .filter_map(|ch| ch.to_digit(10).map(|d| d as Digit))
            .collect();
        if digits.len() != 81 {
            anyhow::bail!("expected 81 digit characters, got {}", digits.len());
        }
        let mut grid = Grid::new();
        for (i, &digit) in digits.iter().enumerate() {
            if digit == 0 {
                continue;
            }
            let (col, row) = (i % 9, i / 9);
            grid.set_value(col, row, digit)
                .with_context(|| format!("clue {digit} at column {col}, row {row}"))?;
        }
        Ok(grid)
    }

    pub fn value(&self, cell: Cell) -> Digit {
        self.values[cell.idx()]
    }

    pub fn get(&self, col: usize, row: usize) -> Digit {
        self.values[Cell::new(col, row).idx()]
    }

    pub fn candidates(&self, cell: Cell) -> DigitSet {
        self.cands[cell.idx()]
    }

    pub fn is_solved(&self) -> bool {
        self.values.iter().all(|&d| d != 0)
    }

    /// Commits `digit`, clears the cell's candidates, and strips the digit
    /// from the candidate sets of the cell's column, row, and block. Fails
    /// with `Contradiction` if any affected unset cell ends up with no
    /// candidates; the grid is not rolled back, so callers that may fail
    /// must work on a disposable copy.
    pub fn set_value(&mut self, col: usize, row: usize, digit: Digit) -> Result<(), SolveError> {
        if col >= 9 || row >= 9 {
            return Err(SolveError::OutOfRange { col, row });
        }
        debug_assert!((1..=9).contains(&digit));
        let i = Cell::new(col, row).idx();
        if self.values[i] == digit {
            return Ok(());
        }
        if self.values[i] != 0 || self.cands[i] & (1u16 << digit) == 0 {
            return Err(SolveError::Contradiction);
        }
        self.values[i] = digit;
        self.cands[i] = 0;
        let mask = 1u16 << digit;
        self.remove_candidates(mask, &SCOPES.columns[col])?;
        self.remove_candidates(mask, &SCOPES.rows[row])?;
        self.remove_candidates(mask, &SCOPES.blocks[block_index(col, row)])?;
        Ok(())
    }

    /// Removes every digit in `digits` from each cell's candidate set.
    /// Returns whether anything was removed.
    pub fn remove_candidates(&mut self, digits: DigitSet, cells: &[Cell]) -> Result<bool, SolveError> {
        let mut removed = false;
        for cell in cells {
            let i = cell.idx();
            let after = self.cands[i] & !digits;
            if after == self.cands[i] {
                continue;
            }
            if after == 0 && self.values[i] == 0 {
                return Err(SolveError::Contradiction);
            }
            self.cands[i] = after;
            removed = true;
        }
        Ok(removed)
    }

    /// Intersects each cell's candidate set with `digits` (hidden-tuple
    /// restriction). Returns whether anything changed.
    pub(crate) fn restrict_candidates(
        &mut self,
        digits: DigitSet,
        cells: &[Cell],
    ) -> Result<bool, SolveError> {
        let mut changed = false;
        for cell in cells {
            let i = cell.idx();
            let after = self.cands[i] & digits;
            if after == self.cands[i] {
                continue;
            }
            if after == 0 && self.values[i] == 0 {
                return Err(SolveError::Contradiction);
            }
            self.cands[i] = after;
            changed = true;
        }
        Ok(changed)
    }

    /// The 3-digit number in the solved grid's top-left corner: cells
    /// (0,0), (1,0), (2,0) read as a base-10 number.
    pub fn corner_number(&self) -> u32 {
        (0..3).fold(0, |acc, col| acc * 10 + u32::from(self.get(col, 0)))
    }

    pub fn to_pretty_string(&self) -> String {
        let mut s = String::new();
        for row in 0..9 {
            if row % 3 == 0 {
                s.push_str("+-------+-------+-------+\n");
            }
            for col in 0..9 {
                if col % 3 == 0 {
                    s.push_str("| ");
                }
                let d = self.get(col, row);
                s.push(if d == 0 { '·' } else { (b'0' + d) as char });
                s.push(' ');
            }
            s.push_str("|\n");
        }
        s.push_str("+-------+-------+-------+\n");
        s
    }
}
