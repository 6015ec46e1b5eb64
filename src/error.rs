use crate::config::{MIN_COLS, MIN_ROWS};

/// Failures of the terminal shell. The simulation itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("IoError, reason='{0}'")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration, reason='{0}'")]
    Config(String),

    #[error("Terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}", min_cols = MIN_COLS, min_rows = MIN_ROWS)]
    TerminalTooSmall { cols: u16, rows: u16 },

    #[error("Input reader stopped")]
    InputClosed,
}
