//! Dots Core - rule engine for Dots and Boxes
//!
//! This crate provides the game logic only:
//! - Board geometry (edges, cells, adjacency)
//! - Edge claiming, cell completion and scoring
//! - Turn order with the extra-turn rule
//! - Win/tie detection
//!
//! Rendering and input handling live in the caller, which forwards one
//! primitive into the engine: "the current player claims edge E".

pub mod board;
pub mod config;
pub mod error;
pub mod game;

// Re-exports for convenient access
pub use board::{check_grid_size, Board, Cell, Edge, Orientation, MAX_GRID_SIZE};
pub use config::{GameConfig, DEFAULT_GRID_SIZE};
pub use error::{GameError, ParseEdgeError};
pub use game::{ClaimResult, CompletedCell, GameEngine, GameStatus, Player, Scores, Winner};
