use anyhow::Result;
use log::trace;

use crate::grid::Grid;
use crate::rules::Difficulty;
use crate::state::{deduction_step, user_hint_step, HintSource, SolverState, Transition};

/// Upper bound on state-machine steps per solve. One deduction step sweeps
/// the whole grid, so well-formed puzzles finish far below this; the cap
/// only guards against pathological input.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Final outcome of one solve: the grid as the solver left it, the hardest
/// rule level that fired (or `Impossible` when the puzzle was not solved),
/// and the solved flag.
#[derive(Clone, Debug)]
pub struct SolverResult {
    pub grid: Grid,
    pub difficulty: Difficulty,
    pub solved: bool,
}

/// Drives the Deduction/UserHint state machine over one grid at a time
/// until the puzzle is solved, no further progress is possible, or the
/// iteration cap is reached.
pub struct Solver {
    max_iterations: usize,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self { max_iterations: DEFAULT_MAX_ITERATIONS }
    }

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Solves one puzzle. Hinting is enabled by passing a [`HintSource`];
    /// without one, the solver halts as soon as no rule fires.
    ///
    /// Stuck puzzles and cap exhaustion are not errors: both yield a
    /// result graded `Impossible`. The only error paths are a misbehaving
    /// hint source and an out-of-contract hint.
    pub fn solve(
        &self,
        mut grid: Grid,
        mut hints: Option<&mut dyn HintSource>,
    ) -> Result<SolverResult> {
        let mut state = SolverState::Deduction;
        // Solved is the floor so an already-complete input grades as such;
        // any rule that fires outranks it.
        let mut difficulty = Difficulty::Solved;

        let mut iteration = 0;
        while !grid.is_solved() && iteration < self.max_iterations {
            trace!(
                "iteration {iteration}, difficulty {difficulty}\n{}",
                grid.to_candidates_string()
            );

            let outcome = match state {
                SolverState::Deduction => deduction_step(&mut grid, hints.is_some()),
                SolverState::UserHint => match hints.as_deref_mut() {
                    Some(source) => user_hint_step(&mut grid, source)?,
                    // hinting got requested without a source; nothing to do
                    None => break,
                },
            };

            if outcome.used && outcome.difficulty > difficulty {
                difficulty = outcome.difficulty;
            }
            match outcome.next {
                Transition::Stay => {}
                Transition::SwitchTo(next) => state = next,
                Transition::Halt => break,
            }
            iteration += 1;
        }

        if !grid.is_solved() {
            difficulty = Difficulty::Impossible;
        }
        Ok(SolverResult { solved: grid.is_solved(), difficulty, grid })
    }
}
