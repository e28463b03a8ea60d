use anyhow::{Context, Result};
use clap::Parser;
use critter_snake::game::{GameConfig, GameEngine};
use critter_snake::logging::init_file_logging;
use critter_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "critter_snake")]
#[command(version, about = "Snake game: eat the critters, don't eat the dog")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells, status bar row included
    #[arg(long)]
    height: Option<u32>,

    /// Seed for item placement, for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.set_columns(width).context("Invalid --width")?;
        }
        if let Some(height) = self.height {
            config.set_rows(height).context("Invalid --height")?;
        }
        config.validate().context("Invalid game configuration")?;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = cli.game_config()?;
    tracing::info!(
        columns = config.columns(),
        rows = config.rows(),
        seed = ?cli.seed,
        "starting"
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_grid_size_overrides() {
        let cli = Cli::parse_from(["critter_snake", "--width", "20", "--height", "12"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.columns(), 20);
        assert_eq!(config.rows(), 12);

        let cli = Cli::parse_from(["critter_snake", "--width", "100000000"]);
        assert!(cli.game_config().is_err());

        let cli = Cli::parse_from(["critter_snake", "--height", "5000"]);
        assert!(cli.game_config().is_err());
    }
}
