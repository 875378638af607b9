use coordinate_chess::feedback::{SquareFeedback, compute_feedback};
use coordinate_chess::game_logic::{ExecutorConfig, MoveError, MoveExecutor, MoveOutcome};
use coordinate_chess::game_state::{Board, Color, Piece, PieceKind, Position};
use coordinate_chess::mock::ScriptedSource;
use coordinate_chess::session::{GameResult, Session};
use coordinate_chess::{BoardDisplay, MoveSource, Prompt};
use test_case::test_case;

/// Helper: position from row and column.
fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).expect("test position on board")
}

/// Helper: board from a list of `(row, col, kind, color)`.
fn board_with(pieces: &[(u8, u8, PieceKind, Color)]) -> Board {
    let mut board = Board::empty();
    for &(row, col, kind, color) in pieces {
        board.set(pos(row, col), Some(Piece::new(kind, color)));
    }
    board
}

/// Helper: play a script of positions straight through the executor.
fn play(board: &mut Board, script: &str) -> Vec<Result<MoveOutcome, MoveError>> {
    let mut source = ScriptedSource::new();
    source.push_script(script).expect("valid script");
    let executor = MoveExecutor::new();

    let mut results = Vec::new();
    while let (Ok(Some(start)), Ok(Some(end))) = (
        source.next_position(Prompt::Start),
        source.next_position(Prompt::End),
    ) {
        results.push(executor.apply(board, start, end));
    }
    results
}

// ---------------------------------------------------------------
// Move generation properties
// ---------------------------------------------------------------

#[test]
fn pseudo_legal_moves_never_hit_friends_during_a_game() {
    let mut board = Board::new();
    let results = play(&mut board, "e2 e4  d7 d5  g1 f3  c8 g4  f1 c4  b8 c6  e1 g1");
    assert!(results.iter().all(Result::is_ok), "{results:?}");

    for (from, piece) in board.occupied() {
        for to in piece.pseudo_legal_moves(&board, from) {
            let occupant = board.get(to);
            assert!(
                occupant.is_none_or(|other| other.color != piece.color),
                "{piece} on {from} reaches friendly {to}"
            );
        }
    }
}

#[test_case(PieceKind::Rook; "rook")]
#[test_case(PieceKind::Bishop; "bishop")]
#[test_case(PieceKind::Queen; "queen")]
fn sliding_rays_stop_at_first_piece(kind: PieceKind) {
    // Blockers two squares away in all eight directions.
    let mut pieces = vec![(4, 4, kind, Color::White)];
    for (row, col) in [(2, 4), (6, 4), (4, 2), (4, 6), (2, 2), (2, 6), (6, 2), (6, 6)] {
        pieces.push((row, col, PieceKind::Pawn, Color::Black));
    }
    let board = board_with(&pieces);

    let moves = board
        .get(pos(4, 4))
        .expect("slider present")
        .pseudo_legal_moves(&board, pos(4, 4));

    for (row, col) in [(1, 4), (7, 4), (4, 1), (4, 7), (1, 1), (1, 7), (7, 1), (7, 7)] {
        assert!(!moves.contains(&pos(row, col)), "({row}, {col}) is behind a blocker");
    }
    let expected = match kind {
        PieceKind::Queen => 16,
        _ => 8,
    };
    assert_eq!(moves.len(), expected);
}

#[test]
fn opening_move_count_matches_shakmaty() {
    use shakmaty::{Chess, Position as _};

    let board = Board::new();
    let ours: usize = board
        .pieces(Color::White)
        .map(|(from, piece)| piece.pseudo_legal_moves(&board, from).len())
        .sum();

    assert_eq!(ours, Chess::default().legal_moves().len());
}

// ---------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------

#[test]
fn king_pawn_double_step_then_single_only() {
    let mut board = Board::new();

    let outcome = MoveExecutor::new().apply(&mut board, pos(6, 4), pos(4, 4));
    assert!(matches!(outcome, Ok(MoveOutcome::Applied(_))));

    let pawn = board.get(pos(4, 4)).expect("pawn on (4, 4)");
    let moves = pawn.pseudo_legal_moves(&board, pos(4, 4));
    assert_eq!(moves, vec![pos(3, 4)]);
}

#[test]
fn same_square_is_illegal_destination() {
    let mut board = Board::new();
    let result = MoveExecutor::new().apply(&mut board, pos(6, 0), pos(6, 0));

    assert_eq!(
        result,
        Err(MoveError::IllegalDestination {
            kind: PieceKind::Pawn,
            start: pos(6, 0),
            end: pos(6, 0),
        })
    );
    assert_eq!(board, Board::new());
}

#[test]
fn starting_position_is_not_checkmate() {
    let mut board = Board::new();
    assert!(!board.is_checkmate(Color::White));
    assert!(!board.is_checkmate(Color::Black));
}

#[test]
fn cornered_king_is_checkmated() {
    // King on (0, 0); queen on (1, 1) is protected by the king on (2, 2).
    let mut board = board_with(&[
        (0, 0, PieceKind::King, Color::Black),
        (1, 1, PieceKind::Queen, Color::White),
        (2, 2, PieceKind::King, Color::White),
    ]);
    let before = board.clone();

    assert!(board.is_check(Color::Black));
    assert!(board.is_checkmate(Color::Black));
    assert_eq!(board, before);
}

#[test]
fn fools_mate_through_executor() {
    let mut board = Board::new();
    let results = play(&mut board, "6,5 5,5  1,4 3,4  6,6 4,6  0,3 4,7");

    assert_eq!(results.len(), 4);
    assert!(results[..3].iter().all(|r| matches!(r, Ok(MoveOutcome::Applied(_)))));
    match &results[3] {
        Ok(MoveOutcome::Checkmate(report)) => {
            assert_eq!(report.color, Color::Black);
            assert_eq!(report.kind, PieceKind::Queen);
        }
        other => panic!("expected checkmate, got {other:?}"),
    }
}

#[test]
fn castling_requires_unmoved_rook() {
    let mut board = board_with(&[
        (7, 4, PieceKind::King, Color::White),
        (7, 7, PieceKind::Rook, Color::White),
    ]);
    let king_moves = |board: &Board| {
        board
            .get(pos(7, 4))
            .expect("king present")
            .pseudo_legal_moves(board, pos(7, 4))
    };

    assert!(king_moves(&board).contains(&pos(7, 6)));

    if let Some(rook) = board.get_mut(pos(7, 7)) {
        rook.has_moved = true;
    }
    assert!(!king_moves(&board).contains(&pos(7, 6)));
}

// ---------------------------------------------------------------
// Rejections leave the board alone
// ---------------------------------------------------------------

#[test_case(6, 4, 5, 3; "pinned bishop steps off the file")]
#[test_case(7, 4, 6, 4; "king walks onto the attacked file")]
fn self_check_restores_every_cell(from_row: u8, from_col: u8, to_row: u8, to_col: u8) {
    let mut board = board_with(&[
        (7, 4, PieceKind::King, Color::White),
        (6, 4, PieceKind::Bishop, Color::White),
        (7, 5, PieceKind::Rook, Color::Black),
        (0, 4, PieceKind::Rook, Color::Black),
        (0, 0, PieceKind::King, Color::Black),
    ]);
    // Take the bishop off the file for the king case so the move is pseudo-legal.
    if (from_row, from_col) == (7, 4) {
        board.take(pos(6, 4));
    }
    let before = board.clone();

    let result = MoveExecutor::new().apply(
        &mut board,
        pos(from_row, from_col),
        pos(to_row, to_col),
    );
    assert!(matches!(result, Err(MoveError::SelfCheck { .. })), "{result:?}");

    for position in Position::all() {
        let now = board.get(position).map(|p| (p.kind, p.color));
        let then = before.get(position).map(|p| (p.kind, p.color));
        assert_eq!(now, then, "cell {position} changed");
    }
}

#[test]
fn rejected_king_move_forfeits_castling() {
    let mut board = board_with(&[
        (7, 4, PieceKind::King, Color::White),
        (7, 7, PieceKind::Rook, Color::White),
        (0, 3, PieceKind::Rook, Color::Black),
        (0, 0, PieceKind::King, Color::Black),
    ]);

    let result = MoveExecutor::new().apply(&mut board, pos(7, 4), pos(7, 3));
    assert!(matches!(result, Err(MoveError::SelfCheck { .. })));

    let king = board.get(pos(7, 4)).expect("king back home");
    assert!(king.has_moved);
    assert!(!king.pseudo_legal_moves(&board, pos(7, 4)).contains(&pos(7, 6)));
}

#[test]
fn rejected_king_move_keeps_castling_when_configured() {
    let mut board = board_with(&[
        (7, 4, PieceKind::King, Color::White),
        (7, 7, PieceKind::Rook, Color::White),
        (0, 3, PieceKind::Rook, Color::Black),
        (0, 0, PieceKind::King, Color::Black),
    ]);
    let before = board.clone();
    let executor = MoveExecutor::with_config(ExecutorConfig {
        restore_moved_flag_on_rejection: true,
    });

    let result = executor.apply(&mut board, pos(7, 4), pos(7, 3));
    assert!(matches!(result, Err(MoveError::SelfCheck { .. })));
    assert_eq!(board, before);
}

// ---------------------------------------------------------------
// Session + feedback
// ---------------------------------------------------------------

#[derive(Debug, Default)]
struct Transcript {
    lines: Vec<String>,
    checks_seen: usize,
}

impl BoardDisplay for Transcript {
    type Error = std::convert::Infallible;

    fn show(
        &mut self,
        _board: &Board,
        feedback: &coordinate_chess::feedback::BoardFeedback,
    ) -> Result<(), Self::Error> {
        if feedback
            .squares()
            .iter()
            .any(|(_, f)| *f == SquareFeedback::Check)
        {
            self.checks_seen += 1;
        }
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), Self::Error> {
        self.lines.push(text.to_string());
        Ok(())
    }
}

#[test]
fn scholars_mate_session() {
    let mut source = ScriptedSource::new();
    source
        .push_script("e2 e4  e7 e5  f1 c4  b8 c6  d1 h5  g8 f6  h5 f7")
        .expect("valid script");
    let mut session = Session::new(source, Transcript::default());

    let result = session.run().expect("infallible I/O");

    assert_eq!(
        result,
        GameResult::Checkmate {
            winner: Color::White,
            moves: 7
        }
    );
    assert!(session.display().checks_seen > 0);
    assert!(
        session
            .display()
            .lines
            .contains(&"Checkmate! White wins!".to_string())
    );
}

#[test]
fn feedback_marks_check_after_move() {
    let mut board = Board::new();
    let results = play(&mut board, "e2 e4  f7 f6  d1 h5");
    assert!(results.iter().all(Result::is_ok));

    let feedback = compute_feedback(&board, None);
    assert_eq!(feedback.get(pos(0, 4)), Some(SquareFeedback::Check));
    assert_eq!(feedback.get(pos(3, 7)), Some(SquareFeedback::Checker));
}
