use std::env;

use thiserror::Error;

use crate::game_state::{Board, Color, Piece, PieceKind, Position};

/// Environment variable read by [`ExecutorConfig::from_env`].
pub const RESTORE_MOVED_FLAG_ENV: &str = "CHESS_RESTORE_MOVED_FLAG";

/// Why a move was refused. The board is left as it was, apart from the
/// moved piece's `has_moved` flag on [`MoveError::SelfCheck`] unless
/// [`ExecutorConfig::restore_moved_flag_on_rejection`] is set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("No piece at the start position {0}!")]
    NoPieceAtStart(Position),
    #[error("Invalid move for {kind} from {start} to {end}")]
    IllegalDestination {
        kind: PieceKind,
        start: Position,
        end: Position,
    },
    #[error("Move puts own king in check! ({kind} from {start} to {end})")]
    SelfCheck {
        kind: PieceKind,
        start: Position,
        end: Position,
    },
}

/// Details of a move that went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub kind: PieceKind,
    pub color: Color,
    pub start: Position,
    pub end: Position,
    pub captured: Option<Piece>,
    /// Set when the move was a castle; the rook's new square.
    pub castled_rook: Option<Position>,
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game continues.
    Applied(MoveReport),
    /// The opponent of the mover is checkmated; the game is over.
    Checkmate(MoveReport),
}

impl MoveOutcome {
    pub fn report(&self) -> &MoveReport {
        match self {
            MoveOutcome::Applied(report) | MoveOutcome::Checkmate(report) => report,
        }
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        matches!(self, MoveOutcome::Checkmate(_))
    }
}

/// Behaviour switches for [`MoveExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutorConfig {
    /// The moved piece is marked as moved before the self-check test, and
    /// by default the mark is kept when the move is refused. When set, the
    /// previous flag is put back instead.
    pub restore_moved_flag_on_rejection: bool,
}

impl ExecutorConfig {
    /// Reads [`RESTORE_MOVED_FLAG_ENV`]; anything but `1`, `true` or `yes`
    /// leaves the default.
    pub fn from_env() -> Self {
        let restore_moved_flag_on_rejection = env::var(RESTORE_MOVED_FLAG_ENV)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);
        Self {
            restore_moved_flag_on_rejection,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Applies moves to a [`Board`], refusing those that leave the mover in check.
#[derive(Debug, Clone, Default)]
pub struct MoveExecutor {
    config: ExecutorConfig,
}

impl MoveExecutor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_config(config: ExecutorConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> ExecutorConfig {
        self.config
    }

    /// Moves the piece on `start` to `end`.
    ///
    /// The destination must be in the piece's pseudo-legal set. The move is
    /// played tentatively and kept only if the mover's king is not attacked
    /// afterwards; then the opponent is tested for checkmate.
    pub fn apply(
        &self,
        board: &mut Board,
        start: Position,
        end: Position,
    ) -> Result<MoveOutcome, MoveError> {
        let piece = board.get(start).ok_or(MoveError::NoPieceAtStart(start))?;
        let (kind, color) = (piece.kind, piece.color);

        if !piece.pseudo_legal_moves(board, start).contains(&end) {
            log::debug!("rejected {color} {kind} {start} -> {end}: not in move set");
            return Err(MoveError::IllegalDestination { kind, start, end });
        }

        let mut trial = board.try_move(start, end);
        let previously_moved = trial
            .moved_piece_mut()
            .map(|piece| std::mem::replace(&mut piece.has_moved, true));

        if trial.is_check(color) {
            if self.config.restore_moved_flag_on_rejection
                && let (Some(piece), Some(flag)) = (trial.moved_piece_mut(), previously_moved)
            {
                piece.has_moved = flag;
            }
            log::debug!("rejected {color} {kind} {start} -> {end}: own king in check");
            return Err(MoveError::SelfCheck { kind, start, end });
        }

        let committed = trial.commit();
        if let Some(square) = committed.castled_rook
            && let Some(rook) = board.get_mut(square)
        {
            rook.has_moved = true;
        }

        let report = MoveReport {
            kind,
            color,
            start,
            end,
            captured: committed.captured,
            castled_rook: committed.castled_rook,
        };
        log::debug!("moved {color} {kind} {start} -> {end}");

        if board.is_checkmate(!color) {
            log::info!("checkmate, {color} wins");
            Ok(MoveOutcome::Checkmate(report))
        } else {
            Ok(MoveOutcome::Applied(report))
        }
    }
}
