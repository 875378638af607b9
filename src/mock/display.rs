use std::io::{self, Write};

use crate::BoardDisplay;
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::game_state::{BOARD_SIZE, Board, Position};

/// Terminal-based board display.
///
/// Renders the board as an 8×8 grid of piece letters (uppercase white,
/// lowercase black) with ANSI backgrounds for [`BoardFeedback`]. Rows and
/// columns are labelled with the indices the player types.
#[derive(Debug)]
pub struct TerminalDisplay<W = io::Stdout> {
    out: W,
}

impl TerminalDisplay {
    /// Create a display writing to stdout.
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Create a display writing somewhere other than stdout.
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl<W: Write> BoardDisplay for TerminalDisplay<W> {
    type Error = DisplayError;

    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut self.out, board, feedback)
    }

    fn message(&mut self, text: &str) -> Result<(), Self::Error> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Render the board to any writer. Extracted for testability.
fn render_board(
    w: &mut impl Write,
    board: &Board,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    writeln!(w)?;
    for row in 0..BOARD_SIZE {
        write!(w, " {row} ")?;
        for col in 0..BOARD_SIZE {
            let Some(position) = Position::new(row, col) else {
                continue;
            };
            let symbol = board.get(position).map_or('.', |piece| piece.symbol());
            write!(w, "{}", format_square(symbol, feedback.get(position)))?;
        }
        // Rank on the right so algebraic input is easy to read off.
        writeln!(w, " {}", BOARD_SIZE - row)?;
    }
    writeln!(w, "    0  1  2  3  4  5  6  7")?;
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Wrap a cell in the ANSI background for its feedback.
fn format_square(symbol: char, feedback: Option<SquareFeedback>) -> String {
    let background = match feedback {
        Some(SquareFeedback::Destination) => "\x1b[44m",
        Some(SquareFeedback::Capture) => "\x1b[41m",
        Some(SquareFeedback::Origin) => "\x1b[42m",
        Some(SquareFeedback::Check) => "\x1b[45m",
        Some(SquareFeedback::Checker) => "\x1b[43m",
        None => return format!(" {symbol} "),
    };
    format!("{background} {symbol} \x1b[0m")
}
