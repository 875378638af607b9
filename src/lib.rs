use std::fmt;

use game_state::{Board, Position};

pub mod feedback;
pub mod game_logic;
pub mod game_state;
pub mod mock;
pub mod session;

/// What a [`MoveSource`] is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prompt {
    /// The square of the piece to move.
    Start,
    /// The square to move it to.
    End,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::Start => write!(f, "Enter the start position (row,col) between 0 and 7: "),
            Prompt::End => write!(
                f,
                "Enter the end position (row,col) from the list of valid moves: "
            ),
        }
    }
}

/// Trait for reading the squares a player picks.
///
/// Abstracts over interactive terminal input and scripted inputs,
/// providing a uniform interface for [`session::Session`].
pub trait MoveSource {
    /// Error type for input failures.
    type Error: fmt::Debug + fmt::Display;

    /// Read the next position, or `None` once the player is done.
    fn next_position(&mut self, prompt: Prompt) -> Result<Option<Position>, Self::Error>;
}

/// Trait for displaying the board and messages to the player.
///
/// Mirrors [`MoveSource`] on the output side of the game loop.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: fmt::Debug + fmt::Display;

    /// Show the board with the given highlights.
    fn show(
        &mut self,
        board: &Board,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;

    /// Show a line of text.
    fn message(&mut self, text: &str) -> Result<(), Self::Error>;
}
