use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use log::trace;
use once_cell::sync::Lazy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grid::{Digit, Grid};
use crate::units::{box_index, box_indices, col_of, index_of, row_of};

/// Difficulty grade of a puzzle, defined as the hardest deduction needed to
/// make progress on it. Ordering matters: the solver tracks the running
/// maximum over all rules that fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Difficulty {
    #[default]
    Unknown,
    Solved,
    Easy,
    Medium,
    Hard,
    User,
    Impossible,
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Unknown => "unknown",
            Difficulty::Solved => "solved",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::User => "user",
            Difficulty::Impossible => "impossible",
        })
    }
}

/// One class of logical inference over a [`Grid`]. Rules are stateless and
/// shared; they report whether they changed the grid and never error. A
/// rule whose preconditions are not met (cell already filled, nothing to
/// eliminate) simply returns `false`.
pub trait DeductionRule: Sync {
    fn name(&self) -> &'static str;

    fn difficulty(&self) -> Difficulty;

    /// Tries the rule against a single cell.
    fn apply_cell(&self, grid: &mut Grid, index: usize) -> bool;

    /// Sweeps all 81 cells in index order. Returns true if any cell
    /// changed; the sweep does not short-circuit, so one invocation picks
    /// up every cell the rule currently applies to.
    fn apply(&self, grid: &mut Grid) -> bool {
        let mut changed = false;
        for index in 0..81 {
            if self.apply_cell(grid, index) {
                changed = true;
            }
        }
        changed
    }
}

/// The rule set in the order the solver tries it: easiest first.
pub static RULES: Lazy<Vec<Box<dyn DeductionRule + Send + Sync>>> = Lazy::new(|| {
    vec![
        Box::new(NakedSingle),
        Box::new(HiddenSingle),
        Box::new(PointingPair),
    ]
});

/// An empty cell with exactly one candidate left must hold that digit.
pub struct NakedSingle;

impl DeductionRule for NakedSingle {
    fn name(&self) -> &'static str {
        "naked single"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn apply_cell(&self, grid: &mut Grid, index: usize) -> bool {
        if !grid.is_empty(index) {
            return false;
        }
        let mask = grid.candidates(index);
        if mask.count_ones() != 1 {
            return false;
        }
        let digit = mask.trailing_zeros() as Digit;
        if grid.set_value(index, digit).is_err() {
            return false;
        }
        trace!(
            "naked single: {digit} at ({}, {})",
            row_of(index),
            col_of(index)
        );
        true
    }
}

/// A digit excluded from every other cell of one of the cell's units is
/// forced into the cell, even when the cell still has other candidates.
pub struct HiddenSingle;

impl HiddenSingle {
    /// True if no other cell of the unit still admits `digit`.
    fn alone_in_unit(
        grid: &Grid,
        indices: impl IntoIterator<Item = usize>,
        cell: usize,
        digit: Digit,
    ) -> bool {
        indices
            .into_iter()
            .all(|i| i == cell || !grid.is_candidate(i, digit))
    }
}

impl DeductionRule for HiddenSingle {
    fn name(&self) -> &'static str {
        "hidden single"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn apply_cell(&self, grid: &mut Grid, index: usize) -> bool {
        if !grid.is_empty(index) {
            return false;
        }
        let row = row_of(index);
        let col = col_of(index);

        // digits ascending; row, then column, then box; first hit wins
        for digit in grid.candidate_digits(index) {
            let row_cells = (0..9).map(|c| index_of(row, c));
            let col_cells = (0..9).map(|r| index_of(r, col));
            let box_cells = box_indices(box_index(row, col));
            let forced = Self::alone_in_unit(grid, row_cells, index, digit)
                || Self::alone_in_unit(grid, col_cells, index, digit)
                || Self::alone_in_unit(grid, box_cells, index, digit);
            if forced && grid.set_value(index, digit).is_ok() {
                trace!("hidden single: {digit} at ({row}, {col})");
                return true;
            }
        }
        false
    }
}

/// Within one box, a digit whose candidates all sit on a single row (or
/// column) must be placed there, so it can be eliminated from the rest of
/// that row (column) outside the box.
///
/// This rule works on the whole grid at once; the cell index of
/// [`DeductionRule::apply_cell`] is ignored and [`DeductionRule::apply`]
/// runs the scan exactly once.
pub struct PointingPair;

impl PointingPair {
    /// Index of the single `true` entry, or `None` if zero or several.
    fn single_true(flags: [bool; 3]) -> Option<usize> {
        let mut found = None;
        for (i, &set) in flags.iter().enumerate() {
            if set {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        found
    }

    fn scan_box(grid: &mut Grid, box_row: usize, box_col: usize, digit: Digit) -> bool {
        let mut rows = [false; 3];
        let mut cols = [false; 3];
        for r in 0..3 {
            for c in 0..3 {
                if grid.is_candidate_at(box_row * 3 + r, box_col * 3 + c, digit) {
                    rows[r] = true;
                    cols[c] = true;
                }
            }
        }

        let mut changed = false;
        if let Some(r) = Self::single_true(rows) {
            let row = box_row * 3 + r;
            let removed = (0..9)
                .filter(|&c| c / 3 != box_col && grid.is_candidate_at(row, c, digit))
                .collect_vec();
            for &c in &removed {
                grid.remove_candidate_at(row, c, digit);
            }
            if !removed.is_empty() {
                trace!(
                    "pointing pair: {digit} confined to row {row} in box ({box_row}, {box_col}), removed from columns {}",
                    removed.iter().join(", ")
                );
                changed = true;
            }
        }
        if let Some(c) = Self::single_true(cols) {
            let col = box_col * 3 + c;
            let removed = (0..9)
                .filter(|&r| r / 3 != box_row && grid.is_candidate_at(r, col, digit))
                .collect_vec();
            for &r in &removed {
                grid.remove_candidate_at(r, col, digit);
            }
            if !removed.is_empty() {
                trace!(
                    "pointing pair: {digit} confined to column {col} in box ({box_row}, {box_col}), removed from rows {}",
                    removed.iter().join(", ")
                );
                changed = true;
            }
        }
        changed
    }
}

impl DeductionRule for PointingPair {
    fn name(&self) -> &'static str {
        "pointing pair/triple"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    fn apply_cell(&self, grid: &mut Grid, _index: usize) -> bool {
        let mut changed = false;
        for box_row in 0..3 {
            for box_col in 0..3 {
                for digit in 1..=9 {
                    changed |= Self::scan_box(grid, box_row, box_col, digit);
                }
            }
        }
        changed
    }

    fn apply(&self, grid: &mut Grid) -> bool {
        self.apply_cell(grid, 0)
    }
}
