//! Shared game setup flags
//!
//! Level 4 - configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dots_core::GameConfig;

#[derive(Args, Clone, Debug, Default)]
pub struct SetupArgs {
    /// Cells along one side of the board (overrides the config file)
    #[arg(long)]
    pub size: Option<usize>,

    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SetupArgs {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(size) = self.size {
            config.grid_size = size;
        }
        config.validate().context("Invalid board size")?;

        Ok(config)
    }
}
