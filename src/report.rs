use std::fmt::{self, Display, Formatter};

use colored::Colorize;
use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::rules::Difficulty;
use crate::solver::SolverResult;

/// Running tally over a batch of solved puzzles: how many were solved and
/// how each one was graded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchReport {
    pub total: usize,
    pub solved: usize,
    /// Inputs that arrived with no empty cells.
    pub already_solved: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub user: usize,
    pub impossible: usize,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &SolverResult) {
        self.total += 1;
        if result.solved {
            self.solved += 1;
        }
        match result.difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
            Difficulty::User => self.user += 1,
            Difficulty::Impossible => self.impossible += 1,
            Difficulty::Solved => self.already_solved += 1,
            // the solver never reports Unknown
            Difficulty::Unknown => warn!("puzzle graded with difficulty unknown"),
        }
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.already_solved > 0 {
            writeln!(f, "{} {}", "Already solved:".green(), self.already_solved)?;
        }
        writeln!(f, "{} {}", "Easy:".blue(), self.easy)?;
        writeln!(f, "{} {}", "Medium:".yellow(), self.medium)?;
        writeln!(f, "{} {}", "Hard:".red(), self.hard)?;
        writeln!(f, "{} {}", "Impossible:".magenta(), self.impossible)?;
        write!(f, "User hint: {}", self.user)
    }
}
