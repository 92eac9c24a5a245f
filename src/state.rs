use anyhow::{ensure, Context, Result};
use log::trace;

use crate::grid::{Digit, Grid};
use crate::rules::{Difficulty, RULES};
use crate::units::{col_of, row_of};

/// The two modes the solving loop alternates between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// Try the deduction rules in difficulty order.
    Deduction,
    /// Ask the external hint source for one placement.
    UserHint,
}

/// Where the engine should go after a step. States never reach back into
/// the engine; they signal the transition and the engine rebinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    SwitchTo(SolverState),
    Halt,
}

/// Outcome of one state-machine step.
#[derive(Debug)]
pub struct StateOutcome {
    /// Whether the step changed the grid.
    pub used: bool,
    pub difficulty: Difficulty,
    pub next: Transition,
}

/// One externally supplied placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hint {
    pub index: usize,
    pub digit: Digit,
}

/// Supplies one placement when deduction stalls. Implementations must only
/// yield hints targeting an empty cell with the digit in that cell's
/// current candidate set.
pub trait HintSource {
    fn request_hint(&mut self, grid: &Grid) -> Result<Hint>;
}

/// Tries the rules easiest-first and stops at the first one that changes
/// the grid. When none fires the step reports no progress at `User`
/// difficulty and hands over to the hint state, or halts when hinting is
/// disabled.
pub fn deduction_step(grid: &mut Grid, assist: bool) -> StateOutcome {
    for rule in RULES.iter() {
        if rule.apply(grid) {
            trace!("rule fired: {} ({})", rule.name(), rule.difficulty());
            return StateOutcome {
                used: true,
                difficulty: rule.difficulty(),
                next: Transition::Stay,
            };
        }
    }
    StateOutcome {
        used: false,
        difficulty: Difficulty::User,
        next: if assist {
            Transition::SwitchTo(SolverState::UserHint)
        } else {
            Transition::Halt
        },
    }
}

/// Obtains one hint, applies it, and returns control to deduction. The
/// boundary is expected to validate; an out-of-contract hint is rejected
/// here rather than silently placed.
pub fn user_hint_step(grid: &mut Grid, source: &mut dyn HintSource) -> Result<StateOutcome> {
    let hint = source.request_hint(grid).context("collecting user hint")?;
    ensure!(
        grid.is_candidate(hint.index, hint.digit),
        "hint {} at ({}, {}) is not a candidate for that cell",
        hint.digit,
        row_of(hint.index),
        col_of(hint.index),
    );
    grid.set_value(hint.index, hint.digit)?;
    trace!(
        "user hint: {} at ({}, {})",
        hint.digit,
        row_of(hint.index),
        col_of(hint.index)
    );
    Ok(StateOutcome {
        used: true,
        difficulty: Difficulty::User,
        next: Transition::SwitchTo(SolverState::Deduction),
    })
}
