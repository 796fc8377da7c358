//! Error kinds raised by the board model and game engine

use crate::board::{Cell, Edge};

/// Rejections and internal failures from a claim attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("edge {0} lies outside the grid")]
    InvalidEdge(Edge),

    #[error("edge {0} is already claimed")]
    AlreadyClaimed(Edge),

    #[error("cell {0} already has an owner")]
    AlreadyOwned(Cell),

    #[error("cell {0} lies outside the grid")]
    InvalidCell(Cell),

    #[error("the game is over")]
    GameOver,

    #[error("grid size must be between 1 and {max}, got {0}", max = crate::board::MAX_GRID_SIZE)]
    InvalidGridSize(usize),
}

impl GameError {
    /// True for internal-consistency failures that indicate a bug in the
    /// engine rather than a bad request from the caller
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::AlreadyOwned(_) | GameError::InvalidCell(_))
    }
}

/// Failure to read an edge from its text form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseEdgeError {
    #[error("expected `<h|v> <row> <col>`, got {0:?}")]
    Malformed(String),

    #[error("unknown orientation {0:?} (use h or v)")]
    Orientation(String),

    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}
