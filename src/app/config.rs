//! Configuration types for game sessions.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, beliefs::UpdateMode, observation::SignalTable, types::SignalScheme,
};

/// Grid side length used when none is given.
pub const DEFAULT_GRID_SIZE: usize = 10;
/// Fraction of an inquiry's neighbour block that must be inquired before the
/// ghost relocates.
pub const DEFAULT_RELOCATION_THRESHOLD: f64 = 0.8;
/// Relocations the ghost may make per game.
pub const DEFAULT_MOVE_BUDGET: u32 = 3;

/// Configuration for a single game session.
///
/// Builder-style API in the same shape as the rest of the crate: start from
/// [`GameConfig::default`] and override with the `with_*` methods.
///
/// # Examples
///
/// ```
/// use ghostbuster::app::GameConfig;
/// use ghostbuster::types::SignalScheme;
///
/// let config = GameConfig::default()
///     .with_grid_size(8)
///     .with_move_budget(0)
///     .with_signal_scheme(SignalScheme::Proximity)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Neighbour-block fraction that triggers a relocation, in (0, 1]
    pub relocation_threshold: f64,
    /// Number of relocations available to the ghost
    pub move_budget: u32,
    /// Observation likelihoods used by the Bayesian update
    pub signal_table: SignalTable,
    /// How true distances map to signals
    pub signal_scheme: SignalScheme,
    /// Probability update mechanism
    pub update_mode: UpdateMode,
    /// Whether the constraint set masks the probability grid
    pub constraint_layer: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_relocation_threshold(mut self, threshold: f64) -> Self {
        self.relocation_threshold = threshold;
        self
    }

    pub fn with_move_budget(mut self, move_budget: u32) -> Self {
        self.move_budget = move_budget;
        self
    }

    pub fn with_signal_table(mut self, table: SignalTable) -> Self {
        self.signal_table = table;
        self
    }

    pub fn with_signal_scheme(mut self, scheme: SignalScheme) -> Self {
        self.signal_scheme = scheme;
        self
    }

    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }

    pub fn with_constraint_layer(mut self, enabled: bool) -> Self {
        self.constraint_layer = enabled;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(Error::InvalidConfiguration {
                message: "grid size must be at least 1".to_string(),
            });
        }
        if self.grid_size.checked_mul(self.grid_size).is_none() {
            return Err(Error::InvalidConfiguration {
                message: format!("grid size {} has too many cells", self.grid_size),
            });
        }
        let threshold = self.relocation_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("relocation threshold must lie in (0, 1], got {threshold}"),
            });
        }
        if let UpdateMode::RegionWeighting(region) = &self.update_mode {
            region.validate()?;
        }
        self.signal_table.validate()
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            relocation_threshold: DEFAULT_RELOCATION_THRESHOLD,
            move_budget: DEFAULT_MOVE_BUDGET,
            signal_table: SignalTable::canonical(),
            signal_scheme: SignalScheme::default(),
            update_mode: UpdateMode::default(),
            constraint_layer: true,
            seed: None,
        }
    }
}
