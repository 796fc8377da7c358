//! GameConfig - board size and player labels

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::check_grid_size;
use crate::error::GameError;
use crate::game::{GameEngine, Player};

/// Default board is 8 x 8 boxes
pub const DEFAULT_GRID_SIZE: usize = 8;

/// Settings for starting a game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells along one side
    pub grid_size: usize,
    /// Initials shown in boxes won by player one
    pub player_one_label: String,
    /// Initials shown in boxes won by player two
    pub player_two_label: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            player_one_label: "P1".to_string(),
            player_two_label: "P2".to_string(),
        }
    }
}

impl GameConfig {
    /// Default labels on a board of the given size
    pub fn with_size(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    pub fn label(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_one_label,
            Player::Two => &self.player_two_label,
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        check_grid_size(self.grid_size)
    }

    /// Fresh game on this board
    pub fn new_game(&self) -> Result<GameEngine, GameError> {
        self.validate()?;
        GameEngine::new(self.grid_size)
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
