//! Game configuration flags shared across commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{GameConfig, beliefs::UpdateMode, types::SignalScheme};

/// Flags that shape the game itself. A JSON file supplies the base and
/// individual flags override it.
#[derive(Args, Debug, Clone, Default)]
pub struct GameArgs {
    /// JSON file with a game configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Side length of the grid
    #[arg(long)]
    pub grid_size: Option<usize>,

    /// Relocations available to the ghost
    #[arg(long)]
    pub move_budget: Option<u32>,

    /// Neighbourhood fraction that triggers a relocation, in (0, 1]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Belief update mode (bayesian, region, contiguous)
    #[arg(long)]
    pub mode: Option<UpdateMode>,

    /// Signal scheme (graded, proximity)
    #[arg(long)]
    pub scheme: Option<SignalScheme>,

    /// Disable the constraint layer
    #[arg(long)]
    pub no_constraints: bool,
}

impl GameArgs {
    /// Resolve the flags into a validated configuration.
    pub fn resolve(&self, seed: Option<u64>) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                GameConfig::from_json(&json)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        if let Some(size) = self.grid_size {
            config = config.with_grid_size(size);
        }
        if let Some(budget) = self.move_budget {
            config = config.with_move_budget(budget);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_relocation_threshold(threshold);
        }
        if let Some(mode) = self.mode {
            config = config.with_update_mode(mode);
        }
        if let Some(scheme) = self.scheme {
            config = config.with_signal_scheme(scheme);
        }
        if self.no_constraints {
            config = config.with_constraint_layer(false);
        }
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = GameArgs {
            grid_size: Some(6),
            move_budget: Some(0),
            scheme: Some(SignalScheme::Proximity),
            no_constraints: true,
            ..GameArgs::default()
        };
        let config = args.resolve(Some(4)).unwrap();
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.move_budget, 0);
        assert_eq!(config.signal_scheme, SignalScheme::Proximity);
        assert!(!config.constraint_layer);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = GameArgs {
            threshold: Some(2.0),
            ..GameArgs::default()
        };
        assert!(args.resolve(None).is_err());
    }
}
