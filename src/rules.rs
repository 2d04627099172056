//! Deduction rules applied by the propagator. Each rule reports whether it
//! changed the grid; a `Contradiction` from any grid operation aborts the
//! rule immediately.

use crate::grid::{digit_count, digits_of, Digit, DigitSet, Grid, SolveError};
use crate::logger::SolveLog;
use crate::scope::{block_index, Cell, ALL_CELLS, SCOPES};
use itertools::Itertools;

/// Commits every unset cell that has exactly one candidate left.
pub fn naked_singles(grid: &mut Grid, log: &mut SolveLog) -> Result<bool, SolveError> {
    let mut changed = false;
    for &cell in ALL_CELLS.iter() {
        let cands = grid.candidates(cell);
        if digit_count(cands) == 1 {
            let digit = cands.trailing_zeros() as Digit;
            grid.set_value(cell.col, cell.row, digit)?;
            log.placed("naked single", cell, digit);
            changed = true;
        }
    }
    Ok(changed)
}

/// Per-scope deductions: hidden singles, then naked/hidden tuple
/// elimination. All tuples detected in the scan are applied before the
/// propagator re-scans.
pub fn resolve_scope(
    grid: &mut Grid,
    kind: &'static str,
    scope: &[Cell; 9],
    log: &mut SolveLog,
) -> Result<bool, SolveError> {
    let mut changed = false;

    // Hidden singles: a digit with exactly one candidate cell in the scope.
    for digit in 1..=9 {
        let holders = cells_with(grid, scope, digit);
        if let [cell] = holders[..] {
            grid.set_value(cell.col, cell.row, digit)?;
            log.placed("hidden single", cell, digit);
            changed = true;
        }
    }

    let unset: Vec<Cell> = scope.iter().copied().filter(|&c| grid.value(c) == 0).collect();
    let mut groups: Vec<(DigitSet, Vec<Cell>)> = Vec::new();

    // Naked tuples: n cells whose combined candidates are exactly n digits.
    // The full unset set is skipped; reserving everything eliminates nothing.
    for n in 2..unset.len() {
        for combo in unset.iter().copied().combinations(n) {
            let union = combo.iter().fold(0, |m, &c| m | grid.candidates(c));
            if digit_count(union) == n {
                groups.push((union, combo));
            }
        }
    }

    // Hidden pairs: two digits whose candidate cells coincide exactly.
    // Cell-side detection above is unbounded; digit-side detection stops at
    // pairs, as the pair case is the only one not already covered cheaply.
    for (a, b) in (1..=9).tuple_combinations() {
        let holders = cells_with(grid, scope, a);
        if holders.len() == 2 && holders == cells_with(grid, scope, b) {
            groups.push(((1u16 << a) | (1u16 << b), holders));
        }
    }

    for (digits, cells) in groups {
        changed |= grid.restrict_candidates(digits, &cells)?;
        let others: Vec<Cell> = scope.iter().copied().filter(|c| !cells.contains(c)).collect();
        if grid.remove_candidates(digits, &others)? {
            log.eliminated(
                "tuple",
                &format!(
                    "{kind}: digits {:?} reserved for {} cells",
                    digits_of(digits).collect::<Vec<_>>(),
                    cells.len()
                ),
            );
            changed = true;
        }
    }
    Ok(changed)
}

/// Block-from-line confinement: if all of a digit's candidate cells in a row
/// or column fall inside one block, the digit is removed from the rest of
/// that block.
pub fn confine_to_block(
    grid: &mut Grid,
    line: &[Cell; 9],
    log: &mut SolveLog,
) -> Result<bool, SolveError> {
    let mut changed = false;
    for digit in 1..=9 {
        let holders = cells_with(grid, line, digit);
        let Some(&first) = holders.first() else { continue };
        let block = block_index(first.col, first.row);
        if holders.iter().any(|c| block_index(c.col, c.row) != block) {
            continue;
        }
        let others: Vec<Cell> = SCOPES.blocks[block]
            .iter()
            .copied()
            .filter(|c| !line.contains(c))
            .collect();
        if grid.remove_candidates(1u16 << digit, &others)? {
            log.eliminated("block confinement", &format!("digit {digit} confined to block {block}"));
            changed = true;
        }
    }
    Ok(changed)
}

/// Line-from-block confinement: if all of a digit's candidate cells in a
/// block share one column (or row), the digit is removed from that line
/// outside the block.
pub fn confine_to_lines(
    grid: &mut Grid,
    block: &[Cell; 9],
    log: &mut SolveLog,
) -> Result<bool, SolveError> {
    let mut changed = false;
    for digit in 1..=9 {
        let holders = cells_with(grid, block, digit);
        let Some(&first) = holders.first() else { continue };
        if holders.iter().all(|c| c.col == first.col) {
            changed |= strip_line(grid, &SCOPES.columns[first.col], block, digit, "column", log)?;
        }
        if holders.iter().all(|c| c.row == first.row) {
            changed |= strip_line(grid, &SCOPES.rows[first.row], block, digit, "row", log)?;
        }
    }
    Ok(changed)
}

fn strip_line(
    grid: &mut Grid,
    line: &[Cell; 9],
    block: &[Cell; 9],
    digit: Digit,
    label: &str,
    log: &mut SolveLog,
) -> Result<bool, SolveError> {
    let others: Vec<Cell> = line.iter().copied().filter(|c| !block.contains(c)).collect();
    if grid.remove_candidates(1u16 << digit, &others)? {
        log.eliminated("line confinement", &format!("digit {digit} confined to one {label} of a block"));
        return Ok(true);
    }
    Ok(false)
}

fn cells_with(grid: &Grid, scope: &[Cell; 9], digit: Digit) -> Vec<Cell> {
    scope
        .iter()
        .copied()
        .filter(|&c| grid.candidates(c) & (1u16 << digit) != 0)
        .collect()
}
