use super::{BOARD_SIZE, Color, Piece, PieceKind, Position, TentativeMove};

/// 8×8 grid of optional pieces. The board owns every piece on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Creates a board in the standard starting layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (col, kind) in (0..).zip(PieceKind::BACK_RANK) {
                board.place(color.back_rank(), col, Piece::new(kind, color));
                board.place(color.pawn_rank(), col, Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Creates a board with no pieces, for building custom positions.
    pub fn empty() -> Self {
        Self {
            cells: Default::default(),
        }
    }

    fn place(&mut self, row: u8, col: u8, piece: Piece) {
        self.cells[usize::from(row)][usize::from(col)] = Some(piece);
    }

    #[inline]
    pub fn get(&self, position: Position) -> Option<&Piece> {
        self.cells[usize::from(position.row())][usize::from(position.col())].as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Piece> {
        self.cells[usize::from(position.row())][usize::from(position.col())].as_mut()
    }

    /// Puts `piece` (or nothing) on `position`, returning the previous occupant.
    pub fn set(&mut self, position: Position, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.cells[usize::from(position.row())][usize::from(position.col())],
            piece,
        )
    }

    /// Removes and returns the piece on `position`.
    pub fn take(&mut self, position: Position) -> Option<Piece> {
        self.set(position, None)
    }

    /// Iterates over every occupied cell in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, &Piece)> {
        Position::all().filter_map(|position| self.get(position).map(|piece| (position, piece)))
    }

    /// Iterates over the pieces of one color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, &Piece)> {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Locates the king of `color`, if it is on the board.
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }

    /// Opposing pieces (relative to `color`) that could move onto `position`.
    pub fn attackers(&self, position: Position, color: Color) -> Vec<Position> {
        self.pieces(!color)
            .filter(|(from, piece)| piece.pseudo_legal_moves(self, *from).contains(&position))
            .map(|(from, _)| from)
            .collect()
    }

    /// Whether any piece of the opposing color could move onto `position`.
    pub fn is_position_under_attack(&self, position: Position, color: Color) -> bool {
        self.pieces(!color)
            .any(|(from, piece)| piece.pseudo_legal_moves(self, from).contains(&position))
    }

    /// Whether the king of `color` is attacked. A missing king is never in check.
    pub fn is_check(&self, color: Color) -> bool {
        self.find_king(color)
            .is_some_and(|king| self.is_position_under_attack(king, color))
    }

    /// Whether `color` is in check and none of its pseudo-legal moves
    /// gets it out.
    ///
    /// Every candidate is played through [`Board::try_move`] and undone
    /// before the next one, so the board is unchanged on return.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        if !self.is_check(color) {
            return false;
        }

        let board: &Board = self;
        let candidates: Vec<(Position, Position)> = board
            .pieces(color)
            .flat_map(|(from, piece)| {
                piece
                    .pseudo_legal_moves(board, from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect();

        let escape = candidates.into_iter().find(|&(from, to)| {
            let trial = self.try_move(from, to);
            !trial.is_check(color)
        });

        if let Some((from, to)) = escape {
            log::trace!("{color} escapes check with {from} -> {to}");
        }
        escape.is_none()
    }

    /// Tentatively plays `start -> end`; see [`TentativeMove`].
    pub fn try_move(&mut self, start: Position, end: Position) -> TentativeMove<'_> {
        TentativeMove::new(self, start, end)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
