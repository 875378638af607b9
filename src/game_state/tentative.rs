use std::ops::Deref;

use super::{Board, Color, Piece, PieceKind, Position};

/// A move played on the board that is undone when dropped.
///
/// This is the only place the board is mutated speculatively. While the
/// guard is alive the board reads as if the piece had moved; dropping it
/// without [`commit`](Self::commit) puts back the moved piece and the
/// captured piece (or emptiness).
///
/// Only the moving piece is played. The rook of a castle stays put until
/// the move is committed, so a castling king is judged on its own square.
#[derive(Debug)]
pub struct TentativeMove<'a> {
    board: &'a mut Board,
    start: Position,
    end: Position,
    captured: Option<Piece>,
    rook: Option<(Position, Position)>,
    committed: bool,
}

/// What a committed move left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedMove {
    pub captured: Option<Piece>,
    /// Where the castling rook now stands, if the move was a castle.
    pub castled_rook: Option<Position>,
}

impl<'a> TentativeMove<'a> {
    pub(super) fn new(board: &'a mut Board, start: Position, end: Position) -> Self {
        let king_color = board
            .get(start)
            .filter(|piece| piece.kind == PieceKind::King)
            .map(|king| king.color);
        let rook = match king_color {
            Some(color) => castling_rook(board, color, start, end),
            None => None,
        };

        let piece = board.take(start);
        let captured = board.set(end, piece);

        Self {
            board,
            start,
            end,
            captured,
            rook,
            committed: false,
        }
    }

    /// The piece that moved, on its new square.
    pub fn moved_piece_mut(&mut self) -> Option<&mut Piece> {
        self.board.get_mut(self.end)
    }

    /// The occupant the move displaced, if any.
    pub fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }

    /// Keeps the move on the board and, for a castle, brings the rook over.
    pub fn commit(mut self) -> CommittedMove {
        self.committed = true;
        if let Some((from, to)) = self.rook {
            let rook = self.board.take(from);
            self.board.set(to, rook);
        }
        CommittedMove {
            captured: self.captured.take(),
            castled_rook: self.rook.map(|(_, to)| to),
        }
    }

    fn revert(&mut self) {
        let piece = self.board.take(self.end);
        self.board.set(self.end, self.captured.take());
        self.board.set(self.start, piece);
    }
}

impl Deref for TentativeMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl Drop for TentativeMove<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.revert();
        }
    }
}

/// Rook squares `(from, to)` when `start -> end` is a castle by a king of
/// `color` and the rook is there to move.
fn castling_rook(
    board: &Board,
    color: Color,
    start: Position,
    end: Position,
) -> Option<(Position, Position)> {
    if start.row() != end.row() {
        return None;
    }

    let (from, to) = match i16::from(end.col()) - i16::from(start.col()) {
        2 => (start.offset(0, 3)?, start.offset(0, 1)?),
        -2 => (start.offset(0, -4)?, start.offset(0, -1)?),
        _ => return None,
    };

    let is_own_rook = board
        .get(from)
        .is_some_and(|piece| piece.kind == PieceKind::Rook && piece.color == color);

    (is_own_rook && board.get(to).is_none()).then_some((from, to))
}
