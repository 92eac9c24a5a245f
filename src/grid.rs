use std::fmt::{self, Display, Formatter};

use anyhow::{bail, Result};
use colored::Colorize;

use crate::units::{
    box_indices, box_of, col_indices, col_of, has_no_duplicate, index_of, row_indices, row_of,
};

pub type Digit = u8; // 1..=9; 0 marks an empty cell

/// Candidate mask with bits 1..=9 set (all digits possible).
#[inline]
pub const fn all_candidates() -> u16 {
    0b11_1111_1110
}

/// A 9x9 Sudoku grid: 81 cell values plus, for every still-empty cell, the
/// bitmask of digits not yet excluded for it. Bit `d` of a mask set means
/// digit `d` is still possible. Filled cells carry an empty mask.
///
/// Masks only ever shrink: [`Grid::set_value`] and
/// [`Grid::remove_candidate`] are the sole mutation paths, and neither adds
/// bits back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [Digit; 81],
    cands: [u16; 81],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    pub fn empty() -> Self {
        Self { cells: [0; 81], cands: [all_candidates(); 81] }
    }

    /// Parses one puzzle in the batch-file format: 81 cells in row-major
    /// order, digits 1-9 or `.`/`0` for empty, commas and spaces ignored.
    /// Anything else, or a cell count other than 81, is rejected.
    pub fn parse(line: &str) -> Result<Self> {
        let mut grid = Grid::empty();
        let mut index = 0;
        for ch in line.chars() {
            match ch {
                ',' | ' ' | '\t' => continue,
                '.' | '0' | '1'..='9' => {
                    if index == 81 {
                        bail!("puzzle has more than 81 cells");
                    }
                    if ch != '.' && ch != '0' {
                        grid.set_value(index, ch as u8 - b'0')?;
                    }
                    index += 1;
                }
                _ => bail!("invalid character {ch:?} in puzzle"),
            }
        }
        if index != 81 {
            bail!("puzzle has {index} cells, expected 81");
        }
        Ok(grid)
    }

    /// 81-char row-major form with `.` for empty cells.
    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .map(|&d| if d == 0 { '.' } else { (b'0' + d) as char })
            .collect()
    }

    pub fn value(&self, index: usize) -> Digit {
        self.cells[index]
    }

    pub fn value_at(&self, row: usize, col: usize) -> Digit {
        self.cells[index_of(row, col)]
    }

    pub fn is_empty(&self, index: usize) -> bool {
        self.cells[index] == 0
    }

    /// Candidate mask for the cell; 0 for filled cells.
    pub fn candidates(&self, index: usize) -> u16 {
        self.cands[index]
    }

    /// Remaining candidate digits for the cell, ascending.
    pub fn candidate_digits(&self, index: usize) -> Vec<Digit> {
        (1..=9).filter(|&d| self.is_candidate(index, d)).collect()
    }

    pub fn is_candidate(&self, index: usize, digit: Digit) -> bool {
        self.cands[index] & (1 << digit) != 0
    }

    pub fn is_candidate_at(&self, row: usize, col: usize, digit: Digit) -> bool {
        self.is_candidate(index_of(row, col), digit)
    }

    /// Places `digit` at `index` and propagates: the cell's own mask is
    /// cleared and the digit's bit is removed from every cell sharing the
    /// cell's row, column, or box. This is the only propagation mechanism;
    /// no rule rescans peers after a placement.
    ///
    /// Only structural preconditions are enforced: the digit must be in
    /// 1..=9 and the cell empty. Candidate membership is not checked, so an
    /// inconsistent puzzle can still be seeded and shows up via
    /// [`Grid::is_valid`] instead.
    pub fn set_value(&mut self, index: usize, digit: Digit) -> Result<()> {
        if !(1..=9).contains(&digit) {
            bail!("digit {digit} out of range 1-9");
        }
        if self.cells[index] != 0 {
            bail!("cell {index} already holds {}", self.cells[index]);
        }
        self.cells[index] = digit;
        self.cands[index] = 0;

        let (row, col, bx) = (row_of(index), col_of(index), box_of(index));
        for i in 0..81 {
            if i != index && (row_of(i) == row || col_of(i) == col || box_of(i) == bx) {
                self.cands[i] &= !(1 << digit);
            }
        }
        Ok(())
    }

    pub fn set_value_at(&mut self, row: usize, col: usize, digit: Digit) -> Result<()> {
        self.set_value(index_of(row, col), digit)
    }

    /// Clears one candidate bit without placing anything; used by rules
    /// that eliminate rather than place.
    pub fn remove_candidate(&mut self, index: usize, digit: Digit) {
        self.cands[index] &= !(1 << digit);
    }

    pub fn remove_candidate_at(&mut self, row: usize, col: usize, digit: Digit) {
        self.remove_candidate(index_of(row, col), digit);
    }

    /// No digit appears twice among placed values in any row, column, or
    /// box. Empty cells are excluded from the duplicate check.
    pub fn is_valid(&self) -> bool {
        for unit in 0..9 {
            let row = row_indices(unit).map(|i| self.cells[i]);
            let col = col_indices(unit).map(|i| self.cells[i]);
            let bx = box_indices(unit).map(|i| self.cells[i]);
            if !has_no_duplicate(row) || !has_no_duplicate(col) || !has_no_duplicate(bx) {
                return false;
            }
        }
        true
    }

    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|&d| d != 0) && self.is_valid()
    }

    /// Grid with rows labeled A-I and columns 1-9, for the hint prompt.
    pub fn to_labeled_string(&self) -> String {
        let sep = "  +-------+-------+-------+\n";
        let mut s = String::from("    1 2 3   4 5 6   7 8 9\n");
        s.push_str(sep);
        for r in 0..9 {
            s.push((b'A' + r as u8) as char);
            s.push_str(" |");
            for c in 0..9 {
                let d = self.value_at(r, c);
                s.push(' ');
                s.push(if d == 0 { '.' } else { (b'0' + d) as char });
                if c % 3 == 2 {
                    s.push_str(" |");
                }
            }
            s.push('\n');
            if r % 3 == 2 {
                s.push_str(sep);
            }
        }
        s
    }

    /// Grid annotated with the candidate digits of every empty cell; placed
    /// values render green, candidates blue. Trace/prompt output only.
    pub fn to_candidates_string(&self) -> String {
        let sep = "+-------------------------------------+-------------------------------------+-------------------------------------+\n";
        let mut s = String::from(sep);
        for r in 0..9 {
            s.push_str("| ");
            for c in 0..9 {
                let index = index_of(r, c);
                let d = self.value(index);
                if d != 0 {
                    s.push_str(&format!("     {}      ", d.to_string().green()));
                } else {
                    s.push('[');
                    for digit in 1..=9 {
                        if self.is_candidate(index, digit) {
                            s.push_str(&digit.to_string().blue().to_string());
                        } else {
                            s.push(' ');
                        }
                    }
                    s.push_str("] ");
                }
                if c % 3 == 2 {
                    s.push_str("| ");
                }
            }
            s.push('\n');
            if r % 3 == 2 {
                s.push_str(sep);
            }
        }
        s
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sep = "+-------+-------+-------+\n";
        f.write_str(sep)?;
        for r in 0..9 {
            write!(f, "|")?;
            for c in 0..9 {
                let d = self.value_at(r, c);
                write!(f, " {}", if d == 0 { '.' } else { (b'0' + d) as char })?;
                if c % 3 == 2 {
                    write!(f, " |")?;
                }
            }
            writeln!(f)?;
            if r % 3 == 2 {
                f.write_str(sep)?;
            }
        }
        Ok(())
    }
}
