use crate::grid::Digit;
use crate::scope::Cell;
use anyhow::Result;
use chrono::Local;
use colored::*;
use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

/// Counters accumulated while solving. Cheap enough to keep always-on; the
/// driver reports them under --verbose and tests assert on them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub passes: usize,
    pub placements: usize,
    pub eliminations: usize,
    pub guesses: usize,
    pub backtracks: usize,
}

/// Step reporting for the solver: optional colored console output plus
/// optional per-step files (one numbered file per step, timestamped).
pub struct SolveLog {
    dir: Option<PathBuf>,
    color: bool,
    verbose: bool,
    counter: usize,
    pub stats: Stats,
}

impl SolveLog {
    pub fn new(verbose: bool, color: bool, dir: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = &dir {
            fs::create_dir_all(dir)?;
        }
        Ok(Self { dir, color, verbose, counter: 0, stats: Stats::default() })
    }

    /// A log that records stats but prints and writes nothing.
    pub fn quiet() -> Self {
        Self { dir: None, color: false, verbose: false, counter: 0, stats: Stats::default() }
    }

    pub fn placed(&mut self, rule: &str, cell: Cell, digit: Digit) {
        self.stats.placements += 1;
        self.step(rule, &format!("placed {digit} at {cell}"));
    }

    pub fn eliminated(&mut self, rule: &str, details: &str) {
        self.stats.eliminations += 1;
        self.step(rule, details);
    }

    pub fn guess(&mut self, cell: Cell, digit: Digit, depth: usize) {
        self.stats.guesses += 1;
        self.step("guess", &format!("try {digit} at {cell} (depth {depth})"));
    }

    pub fn backtrack(&mut self, cell: Cell, digit: Digit, depth: usize) {
        self.stats.backtracks += 1;
        self.step("backtrack", &format!("{digit} at {cell} dead-ended (depth {depth})"));
    }

    /// Best effort: a step-file write failure disables the log directory
    /// with a warning instead of failing the solve.
    pub fn step(&mut self, title: &str, details: &str) {
        self.counter += 1;
        if let Some(dir) = &self.dir {
            let path = dir.join(format!("step-{:05}.txt", self.counter));
            let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
            let written = File::create(&path)
                .and_then(|mut f| writeln!(f, "[{ts}] {title}\n\n{details}"));
            if let Err(err) = written {
                eprintln!("step log disabled: {err}");
                self.dir = None;
            }
        }
        if self.verbose {
            if self.color {
                println!("{} {}", format!("➤ {title}:").blue().bold(), details);
            } else {
                println!("➤ {title}: {details}");
            }
        }
    }
}
