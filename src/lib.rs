pub mod grid;
pub mod logger;
pub mod rules;
pub mod scope;
pub mod solver;

pub use grid::{Grid, SolveError};
pub use scope::Cell;
