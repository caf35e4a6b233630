//! Seed types for initializing Game of Life runs.

use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::compute::{Cell, Grid, GridError, random_grid};
use crate::rle::{DecodeError, PatternDecoder};

/// Complete seed specification for simulation initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Random {
                side: 64,
                seed: None,
            },
        }
    }
}

/// Sources for an initial grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// RLE pattern file on disk.
    Rle { path: PathBuf },
    /// Inline RLE pattern text.
    RleText { text: String },
    /// Square grid of independent fair coin flips.
    Random {
        side: usize,
        /// RNG seed; None draws from the thread RNG.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Explicit live cells (sparse representation).
    Custom {
        rows: usize,
        columns: usize,
        /// (row, col) coordinates of live cells.
        alive: Vec<(usize, usize)>,
    },
}

/// Seeding errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Cannot read pattern file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Live cell ({row}, {col}) lies outside the grid")]
    CellOutOfBounds { row: usize, col: usize },
}

impl Seed {
    /// Seed from an RLE file path.
    pub fn rle_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            pattern: Pattern::Rle { path: path.into() },
        }
    }

    /// Seed with a random square grid.
    pub fn random(side: usize, seed: Option<u64>) -> Self {
        Self {
            pattern: Pattern::Random { side, seed },
        }
    }

    /// Generate the initial grid.
    pub fn generate(&self) -> Result<Grid, SeedError> {
        match &self.pattern {
            Pattern::Rle { path } => {
                let text = fs::read_to_string(path).map_err(|source| SeedError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                log::info!("Loading RLE pattern from {}", path.display());
                Ok(PatternDecoder::from_text(&text)?.parse()?)
            }
            Pattern::RleText { text } => Ok(PatternDecoder::from_text(text)?.parse()?),
            Pattern::Random { side, seed } => {
                let grid = match seed {
                    Some(seed) => random_grid(*side, &mut StdRng::seed_from_u64(*seed))?,
                    None => random_grid(*side, &mut rand::thread_rng())?,
                };
                Ok(grid)
            }
            Pattern::Custom {
                rows,
                columns,
                alive,
            } => {
                let mut grid = Grid::new(*rows, *columns)?;
                for &(row, col) in alive {
                    if row >= *rows || col >= *columns {
                        return Err(SeedError::CellOutOfBounds { row, col });
                    }
                    grid.set(row, col, Cell::Alive);
                }
                Ok(grid)
            }
        }
    }
}
