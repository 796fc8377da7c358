//! Game state, turn order and scoring

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Edge};
use crate::error::GameError;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Seat number (1 or 2)
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Cells owned by each player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub player_one: u32,
    pub player_two: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    pub fn total(&self) -> u32 {
        self.player_one + self.player_two
    }

    fn award(&mut self, player: Player) {
        match player {
            Player::One => self.player_one += 1,
            Player::Two => self.player_two += 1,
        }
    }

    /// Strictly higher score wins, equal scores tie
    pub fn leader(&self) -> Winner {
        use std::cmp::Ordering;
        match self.player_one.cmp(&self.player_two) {
            Ordering::Greater => Winner::Player(Player::One),
            Ordering::Less => Winner::Player(Player::Two),
            Ordering::Equal => Winner::Tie,
        }
    }
}

/// Final outcome of a finished game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player(Player),
    Tie,
}

/// Game lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Over(Winner),
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Over(_))
    }
}

/// A cell awarded by a claim
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedCell {
    pub cell: Cell,
    pub owner: Player,
}

/// Everything a single accepted claim changed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResult {
    /// The edge that was claimed
    pub edge: Edge,
    /// Who claimed it
    pub player: Player,
    /// Newly owned cells, above/left before below/right
    pub completed_cells: Vec<CompletedCell>,
    /// Claimer moves again
    pub turn_retained: bool,
    pub scores: Scores,
    /// Player to move next (meaningless once the game is over)
    pub current_player: Player,
    pub status: GameStatus,
}

// ============================================================================
// GAME ENGINE
// ============================================================================

/// State machine for one game of dots and boxes
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    current_player: Player,
    scores: Scores,
    status: GameStatus,

    /// Accepted claims in order
    history: Vec<(Player, Edge)>,
}

impl GameEngine {
    /// Start a game on a `size` x `size` grid of cells with player one to move.
    /// `size` must lie in `1..=MAX_GRID_SIZE`.
    pub fn new(size: usize) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(size)?,
            current_player: Player::One,
            scores: Scores::default(),
            status: GameStatus::InProgress,
            history: Vec::new(),
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Outcome, once the game is over
    pub fn winner(&self) -> Option<Winner> {
        match self.status {
            GameStatus::Over(winner) => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn total_cells(&self) -> usize {
        self.board.cell_count()
    }

    pub fn owned_cells(&self) -> usize {
        self.board.owned_cells()
    }

    pub fn history(&self) -> &[(Player, Edge)] {
        &self.history
    }

    // ========================================================================
    // CLAIM EDGE
    // ========================================================================

    /// Claim `edge` for the current player.
    ///
    /// A rejected claim leaves the game untouched. An accepted claim awards
    /// every adjacent cell it completes to the claimer, who then keeps the
    /// turn; otherwise the turn passes.
    pub fn claim_edge(&mut self, edge: Edge) -> Result<ClaimResult, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let player = self.current_player;
        self.board.claim(edge, player)?;
        self.history.push((player, edge));
        tracing::debug!("{} claimed {}", player, edge);

        let completed_cells = self.award_completed_cells(edge, player)?;

        let turn_retained = !completed_cells.is_empty();
        if !turn_retained {
            self.current_player = player.opponent();
        }

        self.check_game_over();

        Ok(ClaimResult {
            edge,
            player,
            completed_cells,
            turn_retained,
            scores: self.scores,
            current_player: self.current_player,
            status: self.status,
        })
    }

    fn award_completed_cells(
        &mut self,
        edge: Edge,
        player: Player,
    ) -> Result<Vec<CompletedCell>, GameError> {
        let mut completed = Vec::with_capacity(2);

        for cell in self.board.adjacent_cells(edge) {
            if self.board.cell_owner(cell).is_some() || !self.board.is_cell_complete(cell) {
                continue;
            }

            if let Err(err) = self.board.set_cell_owner(cell, player) {
                tracing::error!("Cell {} completed twice: {}", cell, err);
                return Err(err);
            }
            self.scores.award(player);
            tracing::debug!("{} completed cell {}", player, cell);
            completed.push(CompletedCell { cell, owner: player });
        }

        Ok(completed)
    }

    fn check_game_over(&mut self) {
        if self.scores.total() as usize != self.total_cells() {
            return;
        }

        let winner = self.scores.leader();
        self.status = GameStatus::Over(winner);
        tracing::info!(
            "Game over: {:?} ({} - {})",
            winner,
            self.scores.player_one,
            self.scores.player_two
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
