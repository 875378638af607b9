mod display;
mod script;
mod terminal;

pub use display::{DisplayError, TerminalDisplay};
pub use script::{ScriptError, ScriptedSource};
pub use terminal::{TerminalSource, run_interactive_terminal};
