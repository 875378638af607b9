use std::fmt;
use std::str::FromStr;

use shakmaty::{File, Rank, Square};
use thiserror::Error;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// A cell on the board, addressed as `(row, col)`.
///
/// Row 0 is black's back rank (rank 8) and row 7 is white's (rank 1).
/// Column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position if both coordinates are in `0..8`.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Steps by a signed delta, returning `None` when leaving the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    /// All 64 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }

    /// The same cell in algebraic terms.
    pub fn algebraic(self) -> Square {
        let rank = Rank::ALL[usize::from(BOARD_SIZE - 1 - self.row)];
        let file = File::ALL[usize::from(self.col)];
        Square::from_coords(file, rank)
    }

    fn from_square(square: Square) -> Self {
        let col = square.file().char() as u8 - b'a';
        let row = BOARD_SIZE - 1 - (square.rank().char() as u8 - b'1');
        Self { row, col }
    }
}

impl From<Square> for Position {
    fn from(square: Square) -> Self {
        Self::from_square(square)
    }
}

/// Displayed the way the interactive shell echoes coordinates, e.g. `(6, 4)`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Error type for parsing a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionParseError {
    #[error("invalid input format '{0}', expected row,col (e.g., 6,0) or a square (e.g., e2)")]
    BadFormat(String),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("invalid position {0},{1}, values must be between 0 and 7")]
    OutOfRange(i64, i64),
}

/// Parses either `row,col` or algebraic notation.
///
/// ```
/// # use coordinate_chess::game_state::Position;
/// let a: Position = "6,4".parse().unwrap();
/// let b: Position = "e2".parse().unwrap();
/// assert_eq!(a, b);
/// ```
impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some((row, col)) = s.split_once(',') {
            let row = parse_coordinate(row)?;
            let col = parse_coordinate(col)?;
            return u8::try_from(row)
                .ok()
                .zip(u8::try_from(col).ok())
                .and_then(|(r, c)| Self::new(r, c))
                .ok_or(PositionParseError::OutOfRange(row, col));
        }

        s.to_ascii_lowercase()
            .parse::<Square>()
            .map(Self::from_square)
            .map_err(|_| PositionParseError::BadFormat(s.to_string()))
    }
}

fn parse_coordinate(s: &str) -> Result<i64, PositionParseError> {
    let s = s.trim();
    s.parse()
        .map_err(|_| PositionParseError::NotANumber(s.to_string()))
}
