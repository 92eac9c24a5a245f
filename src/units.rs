//! Index arithmetic for the 81-cell grid: mapping a flat cell index to
//! (row, column, box) coordinates and materializing the index sets of the
//! 27 units (9 rows, 9 columns, 9 boxes).

pub const fn row_of(index: usize) -> usize {
    index / 9
}

pub const fn col_of(index: usize) -> usize {
    index % 9
}

pub const fn index_of(row: usize, col: usize) -> usize {
    row * 9 + col
}

/// Box index (0-8) of the cell at (row, col). Boxes are numbered
/// left-to-right, top-to-bottom.
pub const fn box_index(row: usize, col: usize) -> usize {
    (row / 3) * 3 + col / 3
}

pub const fn box_of(index: usize) -> usize {
    box_index(row_of(index), col_of(index))
}

pub fn row_indices(row: usize) -> [usize; 9] {
    let mut indices = [0; 9];
    for (c, slot) in indices.iter_mut().enumerate() {
        *slot = index_of(row, c);
    }
    indices
}

pub fn col_indices(col: usize) -> [usize; 9] {
    let mut indices = [0; 9];
    for (r, slot) in indices.iter_mut().enumerate() {
        *slot = index_of(r, col);
    }
    indices
}

pub fn box_indices(box_idx: usize) -> [usize; 9] {
    let start_row = (box_idx / 3) * 3;
    let start_col = (box_idx % 3) * 3;
    let mut indices = [0; 9];
    let mut i = 0;
    for r in start_row..start_row + 3 {
        for c in start_col..start_col + 3 {
            indices[i] = index_of(r, c);
            i += 1;
        }
    }
    indices
}

/// True if no digit 1-9 occurs twice among the given values (0 = empty,
/// excluded from the check).
pub fn has_no_duplicate(values: impl IntoIterator<Item = u8>) -> bool {
    let mut seen = [false; 10];
    for v in values {
        if v != 0 {
            if seen[v as usize] {
                return false;
            }
            seen[v as usize] = true;
        }
    }
    true
}
