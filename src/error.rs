//! Error types.
//!
//! Move rejections are ordinary results, not faults: the engine reports them
//! and leaves the board untouched.

use std::path::PathBuf;

/// Why a move was rejected by [`Engine::play`](crate::engine::Engine::play).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Coordinate outside `[0, size)` on either axis
    #[error("illegal move: point is off the board")]
    OutOfBounds,
    /// Point already holds a stone
    #[error("illegal move: point not empty")]
    Occupied,
    /// Move would leave its own group without liberties and captures nothing
    #[error("illegal move: suicide")]
    Suicide,
}

/// Errors raised while building or loading puzzle records.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("board must be square: row {row} has {len} points, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    #[error("unknown board character {ch:?} in row {row}")]
    BadChar { row: usize, ch: char },

    #[error("solution move ({x}, {y}) is off a {size}x{size} board")]
    SolutionOffBoard { x: usize, y: usize, size: usize },

    #[error("puzzle {id}: solution move {index} is illegal: {source}")]
    IllegalSolution {
        id: String,
        index: usize,
        source: MoveError,
    },

    #[error("puzzle {id}: group at ({x}, {y}) has no liberties on the initial board")]
    DeadGroup { id: String, x: usize, y: usize },

    #[error("puzzle {0} has an empty solution")]
    EmptySolution(String),

    #[error("duplicate puzzle id {0}")]
    DuplicateId(String),

    #[error("puzzle catalog is empty")]
    EmptyCatalog,

    #[error(transparent)]
    BoardSize(#[from] ConfigError),

    #[error("failed to read puzzle file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse puzzle JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported board size {size} (expected {min}..={max})")]
    BoardSize { size: usize, min: usize, max: usize },

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
