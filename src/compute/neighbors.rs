//! Moore-neighborhood counting under the two supported boundary policies.
//!
//! Both policies walk the same 8 offsets; they differ only in how a
//! lookup past an edge is resolved.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::Grid;

/// The 8 (row, col) offsets of the Moore neighborhood.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// How neighbor lookups beyond the grid edges are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Opposite edges are adjacent (torus).
    #[default]
    Periodic,
    /// Everything outside the grid is permanently dead.
    ZeroPadded,
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryMode::Periodic => write!(f, "periodic"),
            BoundaryMode::ZeroPadded => write!(f, "zero-padded"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown boundary mode '{0}' (expected 'periodic' or 'zero-padded')")]
pub struct ParseBoundaryError(pub String);

impl FromStr for BoundaryMode {
    type Err = ParseBoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "periodic" | "torus" | "wrap" => Ok(BoundaryMode::Periodic),
            "zero-padded" | "zero_padded" | "zero" | "dead" => Ok(BoundaryMode::ZeroPadded),
            other => Err(ParseBoundaryError(other.to_string())),
        }
    }
}

/// Compute live-neighbor counts for every cell.
/// Returns a flat row-major vector with values in [0, 8].
pub fn neighbor_counts(grid: &Grid, mode: BoundaryMode) -> Vec<u8> {
    let mut counts = vec![0u8; grid.area()];
    neighbor_counts_into(grid, mode, &mut counts);
    counts
}

/// Compute live-neighbor counts into a pre-allocated buffer.
///
/// `counts` must hold exactly `grid.area()` entries. Rows are processed in
/// parallel; each row only reads `grid` and writes its own slice.
///
/// # Panics
///
/// Panics if `counts.len() != grid.area()`.
pub fn neighbor_counts_into(grid: &Grid, mode: BoundaryMode, counts: &mut [u8]) {
    assert_eq!(
        counts.len(),
        grid.area(),
        "count buffer does not match grid area"
    );

    let columns = grid.columns();
    counts
        .par_chunks_mut(columns)
        .enumerate()
        .for_each(|(row, out)| match mode {
            BoundaryMode::Periodic => count_row_periodic(grid, row, out),
            BoundaryMode::ZeroPadded => count_row_zero_padded(grid, row, out),
        });
}

/// Wraparound counting. Equivalent to summing the 8 cyclic shifts of the
/// grid, so on grids narrower than 3 a cell may see itself or the same
/// neighbor more than once.
fn count_row_periodic(grid: &Grid, row: usize, out: &mut [u8]) {
    let rows = grid.rows();
    let columns = grid.columns();
    let cells = grid.cells();

    let row_prev = ((row + rows - 1) % rows) * columns;
    let row_curr = row * columns;
    let row_next = ((row + 1) % rows) * columns;

    for (col, count) in out.iter_mut().enumerate() {
        let col_prev = (col + columns - 1) % columns;
        let col_next = (col + 1) % columns;

        *count = cells[row_prev + col_prev].as_u8()
            + cells[row_prev + col].as_u8()
            + cells[row_prev + col_next].as_u8()
            + cells[row_curr + col_prev].as_u8()
            + cells[row_curr + col_next].as_u8()
            + cells[row_next + col_prev].as_u8()
            + cells[row_next + col].as_u8()
            + cells[row_next + col_next].as_u8();
    }
}

/// Counting with a one-cell dead border around the grid.
fn count_row_zero_padded(grid: &Grid, row: usize, out: &mut [u8]) {
    let rows = grid.rows() as isize;
    let columns = grid.columns() as isize;

    for (col, count) in out.iter_mut().enumerate() {
        *count = MOORE_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| {
                let r = row as isize + dr;
                let c = col as isize + dc;
                (r >= 0 && r < rows && c >= 0 && c < columns)
                    .then(|| grid.get(r as usize, c as usize).as_u8())
            })
            .sum();
    }
}
