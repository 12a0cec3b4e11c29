//! Board files
//!
//! ```text
//! WIDTH HEIGHT
//! 0 0 1 ...      (HEIGHT rows of WIDTH tokens, 1 marks a bomb)
//! ```

use crate::board::{Board, BoardError, Coord};
use log::info;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read board file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed header {0:?}, expected \"WIDTH HEIGHT\"")]
    MalformedHeader(String),
    #[error("expected {expected} board rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("line {line}: expected {expected} cells, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid cell {token:?}, expected 0 or 1")]
    InvalidToken { line: usize, token: String },
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Dimensions and bomb positions read from a board file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    pub width: usize,
    pub height: usize,
    pub bombs: Vec<Coord>,
}

impl BoardLayout {
    pub fn into_board(self) -> Result<Board, BoardError> {
        Board::with_bombs(self.width, self.height, self.bombs)
    }
}

/// Reads and validates a board file, then builds an untouched board from it.
pub fn load_board(path: impl AsRef<Path>) -> Result<Board, LoadError> {
    let path = path.as_ref();
    let layout = parse_board(&fs::read_to_string(path)?)?;
    info!(
        "Loaded {}x{} board with {} bomb(s) from {}",
        layout.width,
        layout.height,
        layout.bombs.len(),
        path.display()
    );
    Ok(layout.into_board()?)
}

pub fn parse_board(text: &str) -> Result<BoardLayout, LoadError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or_default();
    let (width, height) = parse_header(header)?;

    let rows: Vec<&str> = lines.collect();
    if rows.len() != height {
        return Err(LoadError::RowCount {
            expected: height,
            found: rows.len(),
        });
    }

    let mut bombs = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        let line = y + 2;
        let tokens: Vec<&str> = row.split(' ').collect();
        if tokens.len() != width {
            return Err(LoadError::ColumnCount {
                line,
                expected: width,
                found: tokens.len(),
            });
        }

        for (x, token) in tokens.into_iter().enumerate() {
            match token {
                "0" => {}
                "1" => bombs.push((x, y)),
                _ => {
                    return Err(LoadError::InvalidToken {
                        line,
                        token: token.to_string(),
                    })
                }
            }
        }
    }

    Ok(BoardLayout {
        width,
        height,
        bombs,
    })
}

fn parse_header(header: &str) -> Result<(usize, usize), LoadError> {
    let malformed = || LoadError::MalformedHeader(header.to_string());
    let (width, height) = header.split_once(' ').ok_or_else(malformed)?;

    let parse = |token: &str| {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            token.parse::<usize>().map_err(|_| malformed())
        } else {
            Err(malformed())
        }
    };
    Ok((parse(width)?, parse(height)?))
}
