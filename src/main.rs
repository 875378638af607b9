use std::process::ExitCode;

use coordinate_chess::mock;
use coordinate_chess::session::GameResult;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Coordinate Chess - terminal");

    match mock::run_interactive_terminal() {
        Ok(GameResult::Checkmate { winner, moves }) => {
            log::info!("{winner} won after {moves} moves");
            ExitCode::SUCCESS
        }
        Ok(GameResult::Abandoned { moves }) => {
            log::info!("game abandoned after {moves} moves");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
