use crate::game_state::{Board, Color, Position};

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// A destination of the selected piece on an empty square
    Destination,
    /// A destination of the selected piece that takes an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// A king that is in check
    Check,
    /// A piece giving check
    Checker,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by [`compute_feedback()`] and consumed by a
/// [`BoardDisplay`](crate::BoardDisplay) to highlight squares next to the pieces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Position, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Position, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, position: Position) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, feedback)| *feedback)
    }

    /// Set the feedback for a square, replacing what was there.
    pub fn set(&mut self, position: Position, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(pos, _)| *pos == position) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((position, feedback)),
        }
    }

    /// Check if any feedback exists
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Position, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Position, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// Compute visual feedback for the current board.
///
/// - Any king in check is marked, along with the pieces attacking it.
/// - With a piece selected: its square plus every pseudo-legal destination,
///   split into plain destinations and captures. Selection marks win over
///   check marks on the same square.
pub fn compute_feedback(board: &Board, selected: Option<Position>) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();

    for color in [Color::White, Color::Black] {
        show_check(board, color, &mut feedback);
    }

    if let Some(from) = selected {
        show_destinations_for(board, from, &mut feedback);
    }

    feedback
}

/// Mark a king in check and its attackers
fn show_check(board: &Board, color: Color, feedback: &mut BoardFeedback) {
    let Some(king) = board.find_king(color) else {
        return;
    };
    let attackers = board.attackers(king, color);
    if attackers.is_empty() {
        return;
    }

    feedback.set(king, SquareFeedback::Check);
    for attacker in attackers {
        feedback.set(attacker, SquareFeedback::Checker);
    }
}

/// Show the destinations of the selected piece
fn show_destinations_for(board: &Board, from: Position, feedback: &mut BoardFeedback) {
    let Some(piece) = board.get(from) else {
        return;
    };

    feedback.set(from, SquareFeedback::Origin);
    for to in piece.pseudo_legal_moves(board, from) {
        let kind = if board.get(to).is_some() {
            SquareFeedback::Capture
        } else {
            SquareFeedback::Destination
        };
        feedback.set(to, kind);
    }
}
