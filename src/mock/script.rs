use std::collections::VecDeque;
use std::convert::Infallible;

use thiserror::Error;

use crate::game_state::{Position, PositionParseError};
use crate::{MoveSource, Prompt};

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid position '{token}' in script: {source}")]
pub struct ScriptError {
    token: String,
    source: PositionParseError,
}

/// A move source fed from a script instead of a keyboard.
///
/// New script can be appended at any time; once the queue is empty the
/// source reports that the player is done.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    pending: VecDeque<Position>,
}

impl ScriptedSource {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script.
    ///
    /// Format:
    /// - Positions are `row,col` (e.g., "6,4") or squares (e.g., "e2")
    /// - Whitespace separates positions; start and end simply alternate
    ///
    /// Examples:
    /// - `"6,4 4,4"` - Move the piece on row 6, col 4 to row 4, col 4
    /// - `"e2 e4  e7 e5"` - Two moves in algebraic squares
    ///
    /// Nothing is queued if any token is invalid.
    pub fn push_script(&mut self, script: &str) -> Result<(), ScriptError> {
        let positions = parse_script(script)?;
        self.pending.extend(positions);
        Ok(())
    }

    /// Number of positions still queued.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl MoveSource for ScriptedSource {
    type Error = Infallible;

    fn next_position(&mut self, prompt: Prompt) -> Result<Option<Position>, Self::Error> {
        let position = self.pending.pop_front();
        log::trace!("{prompt:?} -> {position:?}");
        Ok(position)
    }
}

/// Parse a script string into the positions it names.
fn parse_script(script: &str) -> Result<Vec<Position>, ScriptError> {
    script
        .split_whitespace()
        .map(|token| {
            token.parse().map_err(|source| ScriptError {
                token: token.to_string(),
                source,
            })
        })
        .collect()
}
