use std::io::{self, BufRead, Write};

use super::TerminalDisplay;
use crate::game_logic::{ExecutorConfig, MoveExecutor};
use crate::game_state::{Board, Position};
use crate::session::{GameResult, Session, SessionError};
use crate::{MoveSource, Prompt};

/// Reads positions typed at a terminal.
///
/// Prompts before every read and keeps asking until the line parses.
/// `q`, `quit` or end of input end the game.
#[derive(Debug)]
pub struct TerminalSource<R, W> {
    input: R,
    prompts: W,
}

impl TerminalSource<io::StdinLock<'static>, io::Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalSource<R, W> {
    pub fn new(input: R, prompts: W) -> Self {
        Self { input, prompts }
    }
}

impl<R: BufRead, W: Write> MoveSource for TerminalSource<R, W> {
    type Error = io::Error;

    fn next_position(&mut self, prompt: Prompt) -> Result<Option<Position>, Self::Error> {
        loop {
            write!(self.prompts, "{prompt}")?;
            self.prompts.flush()?;

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return Ok(None),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    writeln!(self.prompts, "input is not valid UTF-8")?;
                    continue;
                }
                Err(e) => return Err(e),
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "q" | "quit") {
                return Ok(None);
            }

            match line.parse::<Position>() {
                Ok(position) => return Ok(Some(position)),
                Err(e) => writeln!(self.prompts, "{e}")?,
            }
        }
    }
}

/// Runs an interactive game on stdin/stdout until checkmate or quit.
///
/// The executor is configured from the environment, see
/// [`ExecutorConfig::from_env`].
pub fn run_interactive_terminal()
-> Result<GameResult, SessionError<io::Error, super::DisplayError>> {
    let config = ExecutorConfig::from_env();
    log::debug!("executor config: {config:?}");

    let mut session = Session::from_board(
        Board::new(),
        MoveExecutor::with_config(config),
        TerminalSource::stdin(),
        TerminalDisplay::new(),
    );
    session.run()
}
