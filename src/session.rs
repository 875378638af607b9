//! The turn loop that sits between a player and the rules engine.

use thiserror::Error;

use crate::feedback::compute_feedback;
use crate::game_logic::{MoveExecutor, MoveOutcome};
use crate::game_state::{Board, Color, Position};
use crate::{BoardDisplay, MoveSource, Prompt};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// A move checkmated the opponent.
    Checkmate { winner: Color, moves: usize },
    /// The input ran out before the game was decided.
    Abandoned { moves: usize },
}

/// Failure of one of the session's collaborators.
#[derive(Debug, Error)]
pub enum SessionError<S, D> {
    #[error("failed to read input: {0}")]
    Source(S),
    #[error("failed to update display: {0}")]
    Display(D),
}

/// A single game: one board, one executor, and the player's I/O.
///
/// Moves are not restricted to a side; whoever is at the keyboard may move
/// any piece.
#[derive(Debug)]
pub struct Session<S, D> {
    board: Board,
    executor: MoveExecutor,
    source: S,
    display: D,
    moves: usize,
}

impl<S, D> Session<S, D>
where
    S: MoveSource,
    D: BoardDisplay,
{
    /// Starts from the standard layout.
    pub fn new(source: S, display: D) -> Self {
        Self::from_board(Board::new(), MoveExecutor::new(), source, display)
    }

    pub fn from_board(board: Board, executor: MoveExecutor, source: S, display: D) -> Self {
        Self {
            board,
            executor,
            source,
            display,
            moves: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Plays until checkmate or until the source has nothing more to say.
    pub fn run(&mut self) -> Result<GameResult, SessionError<S::Error, D::Error>> {
        log::info!("session started");
        self.show(None)?;

        loop {
            let Some(start) = self.read(Prompt::Start)? else {
                return Ok(self.finish(GameResult::Abandoned { moves: self.moves }));
            };

            let Some(piece) = self.board.get(start) else {
                self.say("No piece at the start position! Please try again.")?;
                continue;
            };
            let kind = piece.kind;
            let destinations = piece.pseudo_legal_moves(&self.board, start);

            if destinations.is_empty() {
                self.say("No valid moves for this piece! Please try again.")?;
                continue;
            }

            self.say(&format!(
                "Valid moves for {kind} at {start}: {}",
                format_positions(&destinations)
            ))?;
            self.show(Some(start))?;

            let Some(end) = self.read(Prompt::End)? else {
                return Ok(self.finish(GameResult::Abandoned { moves: self.moves }));
            };
            if !destinations.contains(&end) {
                self.say("Invalid move! Please try again.")?;
                continue;
            }

            match self.executor.apply(&mut self.board, start, end) {
                Ok(MoveOutcome::Applied(report)) => {
                    self.moves += 1;
                    self.say(&format!(
                        "Moved {} from {} to {}",
                        report.kind, report.start, report.end
                    ))?;
                    self.show(None)?;
                }
                Ok(MoveOutcome::Checkmate(report)) => {
                    self.moves += 1;
                    self.say(&format!(
                        "Moved {} from {} to {}",
                        report.kind, report.start, report.end
                    ))?;
                    self.say(&format!("Checkmate! {} wins!", report.color))?;
                    self.show(None)?;
                    self.say("Game over!")?;
                    return Ok(self.finish(GameResult::Checkmate {
                        winner: report.color,
                        moves: self.moves,
                    }));
                }
                Err(err) => {
                    self.say(&err.to_string())?;
                    self.say("Please try again with a valid move.")?;
                }
            }
        }
    }

    fn finish(&self, result: GameResult) -> GameResult {
        log::info!("session finished: {result:?}");
        result
    }

    fn read(&mut self, prompt: Prompt) -> Result<Option<Position>, SessionError<S::Error, D::Error>> {
        self.source.next_position(prompt).map_err(SessionError::Source)
    }

    fn say(&mut self, text: &str) -> Result<(), SessionError<S::Error, D::Error>> {
        self.display.message(text).map_err(SessionError::Display)
    }

    fn show(&mut self, selected: Option<Position>) -> Result<(), SessionError<S::Error, D::Error>> {
        let feedback = compute_feedback(&self.board, selected);
        self.display
            .show(&self.board, &feedback)
            .map_err(SessionError::Display)
    }
}

fn format_positions(positions: &[Position]) -> String {
    let items: Vec<String> = positions.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
