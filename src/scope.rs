use once_cell::sync::Lazy;
use std::fmt;

/// A cell position; identity is the coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Column-major index into the grid's flat arrays.
    pub fn idx(self) -> usize {
        self.col * 9 + self.row
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.col, self.row)
    }
}

/// The 27 scopes of a 9x9 grid. Each digit must appear exactly once in
/// every column, row, and block. Built once, shared read-only by all grids.
pub struct Scopes {
    pub columns: [[Cell; 9]; 9],
    pub rows: [[Cell; 9]; 9],
    pub blocks: [[Cell; 9]; 9],
}

impl Scopes {
    /// All 27 scopes with a label for log messages.
    pub fn all(&self) -> impl Iterator<Item = (&'static str, &[Cell; 9])> + '_ {
        self.columns
            .iter()
            .map(|s| ("column", s))
            .chain(self.rows.iter().map(|s| ("row", s)))
            .chain(self.blocks.iter().map(|s| ("block", s)))
    }
}

/// Every cell in column-major order; also the fixed scan order of the search.
pub static ALL_CELLS: Lazy<[Cell; 81]> = Lazy::new(|| {
    let mut cells = [Cell::new(0, 0); 81];
    for col in 0..9 {
        for row in 0..9 {
            cells[col * 9 + row] = Cell::new(col, row);
        }
    }
    cells
});

pub static SCOPES: Lazy<Scopes> = Lazy::new(|| {
    let mut columns = [[Cell::new(0, 0); 9]; 9];
    let mut rows = [[Cell::new(0, 0); 9]; 9];
    let mut blocks = [[Cell::new(0, 0); 9]; 9];
    for col in 0..9 {
        for row in 0..9 {
            columns[col][row] = Cell::new(col, row);
            rows[row][col] = Cell::new(col, row);
        }
    }
    for b in 0..9 {
        let (bc, br) = ((b / 3) * 3, (b % 3) * 3);
        let mut k = 0;
        for col in bc..bc + 3 {
            for row in br..br + 3 {
                blocks[b][k] = Cell::new(col, row);
                k += 1;
            }
        }
    }
    Scopes { columns, rows, blocks }
});

/// Index into `SCOPES.blocks` of the block containing (col, row).
pub fn block_index(col: usize, row: usize) -> usize {
    3 * (col / 3) + row / 3
}
