use pretty_assertions::assert_eq;
use sumdoku::grid::{digit_count, digits_of, DigitSet, ALL_DIGITS};
use sumdoku::logger::SolveLog;
use sumdoku::scope::{block_index, ALL_CELLS, SCOPES};
use sumdoku::{solver, Cell, Grid, SolveError};

// First grid of the Project Euler 96 batch; solvable by deduction alone.
const EULER_01: &str = "\
003020600
900305001
001806400
008102900
700000008
006708200
002609500
800203009
005010300";

const EULER_01_SOLVED: &str = "\
483921657
967345821
251876493
548132976
729564138
136798245
372689514
814253769
695417382";

const WIKI: &str = "\
530070000
600195000
098000060
800060003
400803001
700020006
060000280
000419005
000080079";

// Inkala's puzzle; deduction stalls early and the search has to carry it.
const INKALA: &str = "\
800000000
003600000
070090200
050007000
000045700
000100030
001000068
008500010
090000400";

const INKALA_SOLVED: &str = "\
812753649
943682175
675491283
154237896
369845721
287169534
521974368
438526917
796318452";

fn assert_valid(grid: &Grid) {
    for (kind, scope) in SCOPES.all() {
        let mut seen: DigitSet = 0;
        for &cell in scope {
            let d = grid.value(cell);
            if d == 0 {
                continue;
            }
            assert_eq!(seen & (1 << d), 0, "digit {d} twice in a {kind}");
            seen |= 1 << d;
        }
    }
}

#[test]
fn already_solved_grid_is_a_zero_change_fixed_point() {
    let mut g = Grid::parse(EULER_01_SOLVED).unwrap();
    let mut log = SolveLog::quiet();
    solver::solve(&mut g, &mut log).unwrap();
    assert!(g.is_solved());
    assert_eq!(log.stats.passes, 1, "one pass that changes nothing");
    assert_eq!(log.stats.placements, 0);
    assert_eq!(log.stats.guesses, 0);
}

#[test]
fn single_empty_cell_is_a_naked_single() {
    let mut text: Vec<u8> = EULER_01_SOLVED.bytes().collect();
    let hole = 4 * 10 + 4; // cell (4, 4); rows are 10 bytes with the newline
    let expected = text[hole] - b'0';
    text[hole] = b'0';
    let mut g = Grid::parse(std::str::from_utf8(&text).unwrap()).unwrap();

    let mut log = SolveLog::quiet();
    solver::solve(&mut g, &mut log).unwrap();
    assert!(g.is_solved());
    assert_eq!(g.get(4, 4), expected);
    assert_eq!(log.stats.guesses, 0, "no search for a lone naked single");
    assert_eq!(log.stats.placements, 1);
}

#[test]
fn naked_pair_strips_its_digits_from_the_rest_of_the_row() {
    let mut g = Grid::new();
    let pair = (1u16 << 1) | (1 << 2);
    g.remove_candidates(ALL_DIGITS & !pair, &[Cell::new(0, 0), Cell::new(1, 0)]).unwrap();

    let mut log = SolveLog::quiet();
    solver::propagate(&mut g, &mut log).unwrap();
    assert_eq!(g.candidates(Cell::new(0, 0)), pair);
    assert_eq!(g.candidates(Cell::new(1, 0)), pair);
    for col in 2..9 {
        assert_eq!(g.candidates(Cell::new(col, 0)) & pair, 0, "column {col} kept a pair digit");
    }
    assert_eq!(log.stats.placements, 0, "nothing is decidable here");
}

#[test]
fn hidden_single_is_committed() {
    let mut g = Grid::new();
    let others: Vec<Cell> = (1..9).map(|col| Cell::new(col, 0)).collect();
    g.remove_candidates(1 << 7, &others).unwrap();

    let mut log = SolveLog::quiet();
    solver::propagate(&mut g, &mut log).unwrap();
    assert_eq!(g.get(0, 0), 7, "only cell in row 0 that can take 7");
}

#[test]
fn twin_naked_singles_in_one_row_contradict() {
    let mut g = Grid::new();
    let only_five = ALL_DIGITS & !(1 << 5);
    g.remove_candidates(only_five, &[Cell::new(0, 0)]).unwrap();
    g.remove_candidates(only_five, &[Cell::new(8, 0)]).unwrap();

    let mut log = SolveLog::quiet();
    assert_eq!(solver::solve(&mut g, &mut log), Err(SolveError::Contradiction));
}

#[test]
fn euler_grid_01_solves_to_corner_483() {
    let mut g = Grid::parse(EULER_01).unwrap();
    let mut log = SolveLog::quiet();
    solver::solve(&mut g, &mut log).unwrap();
    assert!(g.is_solved());
    assert_valid(&g);
    assert_eq!(g.corner_number(), 483);
    assert_eq!(g, Grid::parse(EULER_01_SOLVED).unwrap());
    assert!(log.stats.passes <= 81, "fixed point must come well within the bound");
}

#[test]
fn repeated_solves_are_deterministic() {
    let solve_once = || {
        let mut g = Grid::parse(EULER_01).unwrap();
        solver::solve(&mut g, &mut SolveLog::quiet()).unwrap();
        g
    };
    assert_eq!(solve_once(), solve_once());
}

#[test]
fn hard_puzzle_is_solved_by_search() {
    let mut g = Grid::parse(INKALA).unwrap();
    let mut log = SolveLog::quiet();
    solver::solve(&mut g, &mut log).unwrap();
    assert!(g.is_solved());
    assert_valid(&g);
    assert_eq!(g, Grid::parse(INKALA_SOLVED).unwrap());
    assert!(log.stats.guesses > 0, "this puzzle is beyond pure deduction");
}

#[test]
fn fixed_point_candidates_are_sound() {
    let mut g = Grid::parse(INKALA).unwrap();
    let solved = Grid::parse(INKALA_SOLVED).unwrap();
    solver::propagate(&mut g, &mut SolveLog::quiet()).unwrap();
    assert!(!g.is_solved(), "deduction alone must stall on this puzzle");

    for &cell in ALL_CELLS.iter() {
        if g.value(cell) != 0 {
            assert_eq!(g.value(cell), solved.value(cell));
            continue;
        }
        let mut committed_peers: DigitSet = 0;
        for peer in SCOPES.columns[cell.col]
            .iter()
            .chain(SCOPES.rows[cell.row].iter())
            .chain(SCOPES.blocks[block_index(cell.col, cell.row)].iter())
        {
            committed_peers |= 1 << g.value(*peer);
        }
        let naive = ALL_DIGITS & !committed_peers;
        let cands = g.candidates(cell);
        assert!(digit_count(cands) >= 1, "unset cell {cell} with no candidates");
        assert_eq!(cands & !naive, 0, "cell {cell} kept a digit a peer already holds");
        let answer = solved.value(cell);
        assert!(
            digits_of(cands).any(|d| d == answer),
            "over-elimination at {cell}: solution digit {answer} was removed"
        );
    }
}

#[test]
fn batch_of_two_sums_corner_numbers() {
    let mut sum = 0;
    for text in [EULER_01, WIKI] {
        let mut g = Grid::parse(text).unwrap();
        solver::solve(&mut g, &mut SolveLog::quiet()).unwrap();
        sum += g.corner_number();
    }
    assert_eq!(sum, 483 + 534);
}
