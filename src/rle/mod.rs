//! Run-length encoded (RLE) pattern decoding.
//!
//! # Format
//!
//! ```text
//! #N Blinker                  comment lines (#N #C #c #O #P #R #r) are skipped
//! x = 3, y = 1, rule = B3/S23 header: columns, rows, optional rule
//! 3o!                         body: runs of b (dead) / o (alive),
//!                             $ ends a row, ! ends the pattern
//! ```
//!
//! A decimal count before a tag repeats it; a count before `$` skips that
//! many rows. Rows shorter than the declared width are padded with dead
//! cells, and rows never reached stay dead.

mod decoder;
mod header;

pub use decoder::{PatternDecoder, decode};
pub use header::{COMMENT_MARKERS, RleHeader, is_comment};

/// Pattern decoding errors. Decoding stops at the first one.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed header: {0}")]
    MalformedHeader(String),
    #[error("Unknown tag '{tag}' at body position {position}")]
    UnknownTag { tag: char, position: usize },
    #[error("Row {row} decodes to {length} cells, but the header declares {columns} columns")]
    RowOverflow {
        row: usize,
        length: usize,
        columns: usize,
    },
    #[error("Pattern writes row {row}, but the header declares {rows} rows")]
    TooManyRows { rows: usize, row: usize },
}
