//! Board representation and per-piece move rules.

mod board;
mod piece;
mod position;
mod tentative;

pub use board::Board;
pub use piece::{Color, Piece, PieceKind};
pub use position::{BOARD_SIZE, Position, PositionParseError};
pub use tentative::{CommittedMove, TentativeMove};
