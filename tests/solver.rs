use anyhow::{bail, Result};
use dedoku::grid::Grid;
use dedoku::rules::Difficulty;
use dedoku::solver::Solver;
use dedoku::state::{Hint, HintSource};
use pretty_assertions::assert_eq;

const EASY: &str =
    "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
const EASY_SOLUTION: &str =
    "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

// needs chain-based techniques, far beyond the rule set here
const HARD: &str =
    "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..";
const HARD_SOLUTION: &str =
    "812753649943682175675491283154237896369845721287169534521974368438526917796318452";

/// Feeds the solver correct placements taken from a known solution,
/// first empty cell each time it is asked.
struct SolutionHints {
    solution: Vec<u8>,
}

impl SolutionHints {
    fn new(solution: &str) -> Self {
        Self { solution: solution.bytes().map(|b| b - b'0').collect() }
    }
}

impl HintSource for SolutionHints {
    fn request_hint(&mut self, grid: &Grid) -> Result<Hint> {
        for index in 0..81 {
            if grid.is_empty(index) {
                return Ok(Hint { index, digit: self.solution[index] });
            }
        }
        bail!("hint requested for a full grid");
    }
}

#[test]
fn already_solved_input_grades_as_solved() {
    let grid = Grid::parse(EASY_SOLUTION).unwrap();
    let result = Solver::new().solve(grid, None).unwrap();
    assert!(result.solved);
    assert_eq!(result.difficulty, Difficulty::Solved);
}

#[test]
fn single_blank_cell_grades_easy() {
    let puzzle = format!(".{}", &EASY_SOLUTION[1..]);
    let grid = Grid::parse(&puzzle).unwrap();
    let result = Solver::new().solve(grid, None).unwrap();
    assert!(result.solved);
    assert_eq!(result.difficulty, Difficulty::Easy);
    assert_eq!(result.grid.to_compact(), EASY_SOLUTION);
}

#[test]
fn easy_puzzle_solves_with_singles() {
    let grid = Grid::parse(EASY).unwrap();
    let result = Solver::new().solve(grid, None).unwrap();
    assert!(result.solved);
    assert!(
        result.difficulty <= Difficulty::Medium,
        "singles should suffice, got {}",
        result.difficulty
    );
    assert_eq!(result.grid.to_compact(), EASY_SOLUTION);
}

#[test]
fn stuck_puzzle_without_hints_is_impossible() {
    let grid = Grid::parse(HARD).unwrap();
    let result = Solver::new().solve(grid, None).unwrap();
    assert!(!result.solved);
    assert_eq!(result.difficulty, Difficulty::Impossible);
    // whatever partial progress happened stayed consistent
    assert!(result.grid.is_valid());
}

#[test]
fn hints_unlock_a_stuck_puzzle_and_grade_user() {
    let grid = Grid::parse(HARD).unwrap();
    let mut hints = SolutionHints::new(HARD_SOLUTION);
    let result = Solver::with_max_iterations(500)
        .solve(grid, Some(&mut hints))
        .unwrap();
    assert!(result.solved);
    // a user step outranks every rule that fired afterwards
    assert_eq!(result.difficulty, Difficulty::User);
    assert_eq!(result.grid.to_compact(), HARD_SOLUTION);
}

#[test]
fn solve_is_deterministic() {
    let first = Solver::new().solve(Grid::parse(EASY).unwrap(), None).unwrap();
    let second = Solver::new().solve(Grid::parse(EASY).unwrap(), None).unwrap();
    assert_eq!(first.grid, second.grid);
    assert_eq!(first.difficulty, second.difficulty);
    assert_eq!(first.solved, second.solved);
}

#[test]
fn zero_iteration_cap_still_terminates() {
    let grid = Grid::parse(EASY).unwrap();
    let result = Solver::with_max_iterations(0).solve(grid, None).unwrap();
    assert!(!result.solved);
    assert_eq!(result.difficulty, Difficulty::Impossible);
    // cap exhaustion left the input untouched
    assert_eq!(result.grid.to_compact(), EASY);
}

#[test]
fn invalid_hint_is_rejected_not_placed() {
    struct BadHints;
    impl HintSource for BadHints {
        fn request_hint(&mut self, grid: &Grid) -> Result<Hint> {
            let index = (0..81).find(|&i| grid.is_empty(i)).unwrap();
            let digit = (1..=9).find(|&d| !grid.is_candidate(index, d)).unwrap();
            Ok(Hint { index, digit })
        }
    }
    let grid = Grid::parse(HARD).unwrap();
    let err = Solver::new().solve(grid, Some(&mut BadHints)).unwrap_err();
    assert!(err.to_string().contains("not a candidate"));
}
