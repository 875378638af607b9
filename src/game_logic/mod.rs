mod engine;

pub use engine::{
    ExecutorConfig, MoveError, MoveExecutor, MoveOutcome, MoveReport, RESTORE_MOVED_FLAG_ENV,
};
