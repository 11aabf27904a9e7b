//! Error types for the checkers engine.
//!
//! Player misuse during play is never reported through these; the state
//! machine turns it into `SelectOutcome::Invalid`. These cover the places
//! where a caller hands the engine data to parse.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Row or column outside `0..8`.
    #[error("invalid coordinate ({row}, {col}): must be within 0..8")]
    InvalidCoordinate { row: i32, col: i32 },

    /// Board text did not have exactly 8 rows.
    #[error("board text must have 8 rows, got {rows}")]
    RowCount { rows: usize },

    #[error("board row {row} must have 8 cells, got {cells}")]
    RowWidth { row: usize, cells: usize },

    #[error("unknown square '{ch}' at ({row}, {col})")]
    UnknownSquare { ch: char, row: usize, col: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;
