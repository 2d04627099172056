use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use std::{fs, path::PathBuf, time::Instant};
use sumdoku::{grid::Grid, logger::SolveLog, solver};

#[derive(Parser, Debug)]
#[command(name = "sumdoku", version, about = "Solves a file of Su Doku puzzles and sums the top-left corner numbers")]
struct Cli {
    /// Puzzle file: repeated blocks of a header line followed by nine rows
    /// of nine digits, '0' for blanks.
    input: PathBuf,

    /// Print each solved grid and every deduction step
    #[arg(short, long)]
    verbose: bool,

    /// Colorize console output
    #[arg(long)]
    color: bool,

    /// Write one numbered log file per deduction step into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let puzzles = parse_batch(&text)?;
    if puzzles.is_empty() {
        bail!("no puzzles found in {}", cli.input.display());
    }

    let mut log = SolveLog::new(cli.verbose, cli.color, cli.log_dir)?;
    let started = Instant::now();
    let mut sum = 0u32;
    let count = puzzles.len();
    for (name, mut grid) in puzzles {
        solver::solve(&mut grid, &mut log).with_context(|| format!("solving {name}"))?;
        let corner = grid.corner_number();
        sum += corner;
        if cli.verbose {
            println!("{name}: corner number {corner}\n{}", grid.to_pretty_string());
        }
    }
    let elapsed = started.elapsed().as_secs_f64();

    if cli.verbose {
        let s = log.stats;
        println!(
            "{} passes, {} placements, {} eliminations, {} guesses, {} backtracks",
            s.passes, s.placements, s.eliminations, s.guesses, s.backtracks
        );
    }
    let report = format!("sum of corner numbers: {sum} ({count} puzzles in {elapsed:.3}s)");
    if cli.color {
        println!("{}", report.green().bold());
    } else {
        println!("{report}");
    }
    Ok(())
}

/// Splits the batch file into named grids. A header is any non-digit line;
/// the nine digit rows that follow it form one puzzle.
fn parse_batch(text: &str) -> Result<Vec<(String, Grid)>> {
    let mut puzzles = Vec::new();
    let mut header: Option<String> = None;
    let mut rows: Vec<&str> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.chars().all(|ch| ch.is_ascii_digit()) {
            if line.len() != 9 {
                bail!("puzzle row {line:?} has {} digits, expected 9", line.len());
            }
            rows.push(line);
            if rows.len() == 9 {
                let name = header
                    .take()
                    .unwrap_or_else(|| format!("grid {}", puzzles.len() + 1));
                let grid = Grid::parse(&rows.join("\n")).with_context(|| name.clone())?;
                puzzles.push((name, grid));
                rows.clear();
            }
        } else {
            if !rows.is_empty() {
                bail!("header {line:?} interrupts a puzzle block after {} rows", rows.len());
            }
            header = Some(line.to_string());
        }
    }
    if !rows.is_empty() {
        bail!("file ends mid-puzzle with {} of 9 rows", rows.len());
    }
    Ok(puzzles)
}
