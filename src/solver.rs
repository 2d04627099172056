//! Fixed-point constraint propagation with a guess-and-verify fallback.
//!
//! `solve` drives the state machine: propagate to a fixed point; if the grid
//! is still unsolved, branch on the first undetermined cell and recurse on a
//! deep copy per candidate. Contradictions unwind through `Result`, which is
//! what un-tries a guess at the parent level; nothing is ever undone in
//! place.

use crate::grid::{digit_count, digits_of, Grid, SolveError};
use crate::logger::SolveLog;
use crate::rules;
use crate::scope::{ALL_CELLS, SCOPES};

pub fn solve(grid: &mut Grid, log: &mut SolveLog) -> Result<(), SolveError> {
    solve_at(grid, log, 0)
}

/// Runs propagation passes until one changes nothing. Monotone (candidates
/// only shrink), so the fixed point is reached in a bounded number of
/// passes.
pub fn propagate(grid: &mut Grid, log: &mut SolveLog) -> Result<(), SolveError> {
    loop {
        log.stats.passes += 1;
        if !pass(grid, log)? {
            return Ok(());
        }
    }
}

fn pass(grid: &mut Grid, log: &mut SolveLog) -> Result<bool, SolveError> {
    let mut changed = rules::naked_singles(grid, log)?;
    for (kind, scope) in SCOPES.all() {
        changed |= rules::resolve_scope(grid, kind, scope, log)?;
    }
    for line in SCOPES.columns.iter().chain(SCOPES.rows.iter()) {
        changed |= rules::confine_to_block(grid, line, log)?;
    }
    for block in SCOPES.blocks.iter() {
        changed |= rules::confine_to_lines(grid, block, log)?;
    }
    Ok(changed)
}

fn solve_at(grid: &mut Grid, log: &mut SolveLog, depth: usize) -> Result<(), SolveError> {
    propagate(grid, log)?;
    if grid.is_solved() {
        return Ok(());
    }

    // Deduction stalled; guess. Branch on the first cell (column-major) with
    // any candidates left. No such cell on an unsolved grid means the puzzle
    // itself is broken, not that this branch guessed wrong.
    let Some(&cell) = ALL_CELLS.iter().find(|&&c| digit_count(grid.candidates(c)) > 0) else {
        return Err(SolveError::Unsolvable);
    };

    for digit in digits_of(grid.candidates(cell)) {
        let mut branch = grid.clone();
        match branch.set_value(cell.col, cell.row, digit) {
            Ok(()) => {}
            Err(SolveError::Contradiction) => continue,
            Err(err) => return Err(err),
        }
        log.guess(cell, digit, depth);
        match solve_at(&mut branch, log, depth + 1) {
            Ok(()) => {
                // First surviving branch wins; siblings are abandoned.
                *grid = branch;
                return Ok(());
            }
            Err(SolveError::Contradiction) => {
                log.backtrack(cell, digit, depth);
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    // Every candidate for this cell dead-ended; let the parent guess retry.
    Err(SolveError::Contradiction)
}
