//! Dense binary grid shared by the decoder and the evolution engine.

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Numeric value used when summing neighbors.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Grid construction errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid dimensions (rows, columns) must be non-zero")]
    EmptyDimensions,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Cell buffer holds {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },
    #[error("Grid of {rows}x{columns} cells is too large to allocate")]
    TooLarge { rows: usize, columns: usize },
}

/// Number of cells in a `rows` x `columns` grid, if it can be allocated.
fn checked_area(rows: usize, columns: usize) -> Result<usize, GridError> {
    if rows == 0 || columns == 0 {
        return Err(GridError::EmptyDimensions);
    }
    rows.checked_mul(columns)
        .filter(|&area| area <= isize::MAX as usize)
        .ok_or(GridError::TooLarge { rows, columns })
}

/// Rectangular matrix of cells.
///
/// Data is stored row-major: index = row * columns + col.
/// The shape is fixed once the grid is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        let area = checked_area(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            cells: vec![Cell::Dead; area],
        })
    }

    /// Build a grid from a flat row-major cell buffer.
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        let area = checked_area(rows, columns)?;
        if cells.len() != area {
            return Err(GridError::CellCount {
                expected: area,
                found: cells.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Build a grid from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        let height = rows.len();
        if height == 0 || columns == 0 {
            return Err(GridError::EmptyDimensions);
        }

        let mut cells = Vec::with_capacity(height * columns);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != columns {
                return Err(GridError::RaggedRows {
                    row,
                    expected: columns,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            rows: height,
            columns,
            cells,
        })
    }

    /// Convenience constructor from 0/1 rows, mostly for tests and fixtures.
    pub fn from_bits(rows: &[&[u8]]) -> Result<Self, GridError> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| Cell::from(v != 0)).collect())
                .collect(),
        )
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// (rows, columns)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Total number of cells.
    #[inline]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    /// Get cell at (row, col). Panics if out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.idx(row, col)]
    }

    /// Set cell at (row, col). Panics if out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.idx(row, col);
        self.cells[idx] = cell;
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// Iterate over rows top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.columns)
    }

    /// Flat row-major view of all cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Copy the grid as nested 0/1 rows.
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.rows_iter()
            .map(|row| row.iter().map(|c| c.as_u8()).collect())
            .collect()
    }
}
