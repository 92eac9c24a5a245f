use dedoku::grid::Grid;
use dedoku::rules::{DeductionRule, Difficulty, HiddenSingle, NakedSingle, PointingPair, RULES};
use dedoku::units::index_of;
use pretty_assertions::assert_eq;

const SOLVED: &str =
    "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

#[test]
fn rule_set_is_ordered_by_difficulty() {
    let difficulties: Vec<Difficulty> = RULES.iter().map(|r| r.difficulty()).collect();
    assert_eq!(
        difficulties,
        vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    );
}

#[test]
fn naked_single_places_the_last_candidate() {
    // blank one cell of a solved grid: that cell has exactly one candidate
    let puzzle = format!(".{}", &SOLVED[1..]);
    let mut grid = Grid::parse(&puzzle).unwrap();
    assert_eq!(grid.candidate_digits(0), vec![5]);

    assert!(NakedSingle.apply_cell(&mut grid, 0));
    assert_eq!(grid.value(0), 5);
    assert!(grid.is_solved());
}

#[test]
fn naked_single_ignores_filled_and_ambiguous_cells() {
    let mut grid = Grid::parse(SOLVED).unwrap();
    assert!(!NakedSingle.apply_cell(&mut grid, 0), "cell already filled");

    let mut empty = Grid::empty();
    assert!(!NakedSingle.apply_cell(&mut empty, 0), "nine candidates left");
    assert!(!NakedSingle.apply(&mut empty));
}

#[test]
fn hidden_single_finds_digit_forced_into_a_cell() {
    // 7 is eliminated from every other cell of row 0 (via columns and
    // boxes) but cell (0,0) itself keeps several candidates
    let mut grid = Grid::empty();
    grid.set_value_at(1, 4, 7).unwrap();
    grid.set_value_at(2, 7, 7).unwrap();
    grid.set_value_at(4, 1, 7).unwrap();
    grid.set_value_at(7, 2, 7).unwrap();

    let index = index_of(0, 0);
    assert!(grid.candidate_digits(index).len() > 1);
    assert!((1..9).all(|c| !grid.is_candidate_at(0, c, 7)));

    assert!(HiddenSingle.apply_cell(&mut grid, index));
    assert_eq!(grid.value(index), 7);
}

#[test]
fn hidden_single_reports_nothing_without_a_forced_digit() {
    let mut grid = Grid::empty();
    assert!(!HiddenSingle.apply(&mut grid));
}

#[test]
fn pointing_pair_eliminates_along_the_row() {
    // fill rows 1-2 of box 0, confining 5 (among others) to row 0 of the box
    let mut grid = Grid::empty();
    for (r, c, d) in [(1, 0, 1), (1, 1, 2), (1, 2, 3), (2, 0, 4), (2, 1, 6), (2, 2, 8)] {
        grid.set_value_at(r, c, d).unwrap();
    }
    assert!(grid.is_candidate_at(0, 4, 5));
    assert!(grid.is_candidate_at(0, 8, 5));

    assert!(PointingPair.apply(&mut grid));
    for c in 3..9 {
        assert!(
            !grid.is_candidate_at(0, c, 5),
            "5 should be gone from (0, {c})"
        );
    }
    // inside the box the candidate stays, and nothing was placed
    assert!(grid.is_candidate_at(0, 0, 5));
    assert!(grid.is_empty(index_of(0, 0)));
}

#[test]
fn pointing_pair_eliminates_along_the_column() {
    // fill columns 1-2 of box 0, confining 5 to column 0 of the box
    let mut grid = Grid::empty();
    for (r, c, d) in [(0, 1, 1), (0, 2, 2), (1, 1, 3), (1, 2, 4), (2, 1, 6), (2, 2, 8)] {
        grid.set_value_at(r, c, d).unwrap();
    }
    assert!(PointingPair.apply(&mut grid));
    for r in 3..9 {
        assert!(
            !grid.is_candidate_at(r, 0, 5),
            "5 should be gone from ({r}, 0)"
        );
    }
}

#[test]
fn rules_leave_a_solved_grid_alone() {
    let mut grid = Grid::parse(SOLVED).unwrap();
    for rule in RULES.iter() {
        assert!(!rule.apply(&mut grid), "{} fired on a solved grid", rule.name());
    }
}

#[test]
fn firing_rules_strictly_shrink_state() {
    // blank two cells of a solved grid; both are naked singles
    let mut puzzle: Vec<char> = SOLVED.chars().collect();
    puzzle[0] = '.';
    puzzle[40] = '.';
    let mut grid = Grid::parse(&puzzle.iter().collect::<String>()).unwrap();
    let empties_before = (0..81).filter(|&i| grid.is_empty(i)).count();
    let mask_bits_before: u32 = (0..81).map(|i| grid.candidates(i).count_ones()).sum();

    assert!(NakedSingle.apply(&mut grid));

    let empties_after = (0..81).filter(|&i| grid.is_empty(i)).count();
    let mask_bits_after: u32 = (0..81).map(|i| grid.candidates(i).count_ones()).sum();
    assert!(empties_after < empties_before);
    assert!(mask_bits_after < mask_bits_before);
}
