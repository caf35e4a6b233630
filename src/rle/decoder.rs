//! RLE body tokenizing and grid assembly.

use super::{DecodeError, RleHeader, is_comment};
use crate::compute::{Cell, Grid};

/// One lexical unit of an RLE body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `count` consecutive cells of one state.
    Run { count: usize, cell: Cell },
    /// `$` - advance to the next row.
    RowEnd,
    /// `!` - nothing after it is read.
    End,
}

/// Tag characters and the state they encode.
fn tag_cell(tag: char) -> Option<Cell> {
    match tag {
        'b' => Some(Cell::Dead),
        'o' => Some(Cell::Alive),
        _ => None,
    }
}

/// Decoder for one RLE pattern.
///
/// Construction strips comments, parses the header and joins the body
/// lines; [`parse`](Self::parse) turns the body into a grid.
#[derive(Debug, Clone)]
pub struct PatternDecoder {
    header: RleHeader,
    body: String,
}

impl PatternDecoder {
    /// Build a decoder from raw text lines (line terminators optional).
    pub fn from_lines<I, S>(lines: I) -> Result<Self, DecodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter().filter(|line| {
            let line: &str = line.as_ref();
            !is_comment(line) && !line.trim().is_empty()
        });

        let header = match lines.next() {
            Some(line) => RleHeader::parse(line.as_ref())?,
            None => {
                return Err(DecodeError::MalformedHeader(
                    "missing header line".to_string(),
                ));
            }
        };

        // `$` is the only row separator, so body lines are joined as-is
        let body: String = lines.map(|line| line.as_ref().trim_end().to_string()).collect();

        log::debug!(
            "RLE header: {} columns x {} rows, rule {:?}, body {} chars",
            header.columns,
            header.rows,
            header.rule,
            body.len()
        );

        Ok(Self { header, body })
    }

    /// Build a decoder from a whole pattern file's contents.
    pub fn from_text(text: &str) -> Result<Self, DecodeError> {
        Self::from_lines(text.lines())
    }

    pub fn header(&self) -> &RleHeader {
        &self.header
    }

    /// Concatenated body stream.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decode the body into a grid of the declared shape.
    pub fn parse(&self) -> Result<Grid, DecodeError> {
        let tokens = tokenize(&self.body)?;
        let grid = assemble(&self.header, &tokens)?;

        log::debug!(
            "Decoded {}x{} pattern with {} live cells",
            grid.rows(),
            grid.columns(),
            grid.population()
        );
        Ok(grid)
    }
}

/// Decode RLE text straight into a grid.
pub fn decode(text: &str) -> Result<Grid, DecodeError> {
    PatternDecoder::from_text(text)?.parse()
}

/// Split the body into tokens, stopping at `!`.
fn tokenize(body: &str) -> Result<Vec<Token>, DecodeError> {
    let mut tokens = Vec::new();
    let mut count: Option<usize> = None;

    for (position, ch) in body.chars().enumerate() {
        match ch {
            '0'..='9' => {
                let digit = ch as usize - '0' as usize;
                count = Some(count.unwrap_or(0).saturating_mul(10).saturating_add(digit));
            }
            '$' => {
                // A count with no tag carries no cells
                count = None;
                tokens.push(Token::RowEnd);
            }
            '!' => {
                tokens.push(Token::End);
                return Ok(tokens);
            }
            tag => {
                let cell = tag_cell(tag).ok_or(DecodeError::UnknownTag { tag, position })?;
                tokens.push(Token::Run {
                    count: count.take().unwrap_or(1),
                    cell,
                });
            }
        }
    }

    // A trailing count with no tag carries no cells.
    Ok(tokens)
}

/// Expand tokens into a dead-initialized grid of the header's shape.
fn assemble(header: &RleHeader, tokens: &[Token]) -> Result<Grid, DecodeError> {
    let mut grid = Grid::new(header.rows, header.columns)
        .map_err(|e| DecodeError::MalformedHeader(e.to_string()))?;

    let mut row = 0usize;
    let mut col = 0usize;

    for token in tokens {
        match *token {
            Token::Run { count, cell } => {
                if count == 0 {
                    continue;
                }
                if row >= header.rows {
                    return Err(DecodeError::TooManyRows {
                        rows: header.rows,
                        row,
                    });
                }

                let end = col.saturating_add(count);
                if end > header.columns {
                    return Err(DecodeError::RowOverflow {
                        row,
                        length: end,
                        columns: header.columns,
                    });
                }

                if cell.is_alive() {
                    for c in col..end {
                        grid.set(row, c, cell);
                    }
                }
                col = end;
            }
            Token::RowEnd => {
                row += 1;
                col = 0;
            }
            Token::End => break,
        }
    }

    Ok(grid)
}
