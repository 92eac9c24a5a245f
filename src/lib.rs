pub mod grid;
pub mod logger;
pub mod report;
pub mod rules;
pub mod solver;
pub mod state;
pub mod units;

pub use grid::{Digit, Grid};
pub use rules::Difficulty;
pub use solver::{Solver, SolverResult};
pub use state::{Hint, HintSource};
