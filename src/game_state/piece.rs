use std::fmt;
use std::ops::Not;

use super::{Board, Position};

/// Side of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Row delta of a pawn step: white moves toward row 0.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this color's rooks, knights, bishops, queen and king.
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Movement rule of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const BACK_RANK: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Letter used on the rendered board, uppercase.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        f.write_str(name)
    }
}

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// A piece on the board.
///
/// Pieces are not `Copy`: a piece lives in exactly one board cell and moves
/// between cells by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Only consulted for pawns (double step) and kings/rooks (castling).
    pub has_moved: bool,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Letter for rendering: uppercase for white, lowercase for black.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    /// Destinations allowed by this piece's movement rule from `position`,
    /// ignoring whether the move would expose its own king.
    ///
    /// `position` is expected to hold this piece; that is not re-checked.
    pub fn pseudo_legal_moves(&self, board: &Board, position: Position) -> Vec<Position> {
        let mut moves = Vec::new();
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(board, position, &mut moves),
            PieceKind::Rook => self.slide(board, position, &ROOK_DIRECTIONS, &mut moves),
            PieceKind::Bishop => self.slide(board, position, &BISHOP_DIRECTIONS, &mut moves),
            PieceKind::Queen => {
                self.slide(board, position, &ROOK_DIRECTIONS, &mut moves);
                self.slide(board, position, &BISHOP_DIRECTIONS, &mut moves);
            }
            PieceKind::Knight => self.step(board, position, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::King => {
                self.step(board, position, &KING_OFFSETS, &mut moves);
                self.castling_moves(board, position, &mut moves);
            }
        }
        moves
    }

    fn is_enemy(&self, other: &Piece) -> bool {
        self.color != other.color
    }

    fn pawn_moves(&self, board: &Board, position: Position, moves: &mut Vec<Position>) {
        let forward = self.color.forward();

        if let Some(one) = position.offset(forward, 0)
            && board.get(one).is_none()
        {
            moves.push(one);
            if !self.has_moved
                && let Some(two) = position.offset(2 * forward, 0)
                && board.get(two).is_none()
            {
                moves.push(two);
            }
        }

        // Diagonals only when there is something to take.
        for d_col in [-1, 1] {
            if let Some(target) = position.offset(forward, d_col)
                && board.get(target).is_some_and(|other| self.is_enemy(other))
            {
                moves.push(target);
            }
        }
    }

    fn slide(
        &self,
        board: &Board,
        position: Position,
        directions: &[(i8, i8)],
        moves: &mut Vec<Position>,
    ) {
        for &(d_row, d_col) in directions {
            let mut current = position;
            while let Some(next) = current.offset(d_row, d_col) {
                match board.get(next) {
                    None => moves.push(next),
                    Some(other) => {
                        if self.is_enemy(other) {
                            moves.push(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
    }

    fn step(
        &self,
        board: &Board,
        position: Position,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Position>,
    ) {
        moves.extend(
            offsets
                .iter()
                .filter_map(|&(d_row, d_col)| position.offset(d_row, d_col))
                .filter(|&target| board.get(target).is_none_or(|other| self.is_enemy(other))),
        );
    }

    /// Castling only looks at emptiness and movement history; squares the
    /// king crosses may be attacked.
    fn castling_moves(&self, board: &Board, position: Position, moves: &mut Vec<Position>) {
        if self.has_moved {
            return;
        }

        let is_empty = |d_col: i8| {
            position
                .offset(0, d_col)
                .is_some_and(|target| board.get(target).is_none())
        };
        let has_unmoved_rook = |d_col: i8| {
            position
                .offset(0, d_col)
                .and_then(|target| board.get(target))
                .is_some_and(|rook| {
                    rook.kind == PieceKind::Rook && rook.color == self.color && !rook.has_moved
                })
        };

        if is_empty(1)
            && is_empty(2)
            && has_unmoved_rook(3)
            && let Some(target) = position.offset(0, 2)
        {
            moves.push(target);
        }

        if is_empty(-1)
            && is_empty(-2)
            && is_empty(-3)
            && has_unmoved_rook(-4)
            && let Some(target) = position.offset(0, -2)
        {
            moves.push(target);
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
