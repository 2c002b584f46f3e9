//! Observation model: likelihood of each signal given the Chebyshev distance
//! between the inquired cell and the ghost, and the Bayesian posterior update
//! that applies it to the whole grid.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Error, Result,
    grid::Grid,
    types::{Position, Signal, SignalScheme, chebyshev_distance},
    utils::normalize_weights,
};

const RED: usize = 0;
const ORANGE: usize = 1;
const YELLOW: usize = 2;
const GREEN: usize = 3;

/// `P(signal | distance)` for distances 0, 1, 2 and anything further.
///
/// Each row lists the probabilities of red, orange, yellow and green.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalTable {
    pub rows: [[f64; 4]; 4],
}

impl SignalTable {
    /// The standard table.
    ///
    /// | distance | red  | orange | yellow | green |
    /// |----------|------|--------|--------|-------|
    /// | 0        | 0.80 | 0.10   | 0.05   | 0.05  |
    /// | 1        | 0.10 | 0.70   | 0.10   | 0.10  |
    /// | 2        | 0.05 | 0.10   | 0.70   | 0.15  |
    /// | >2       | 0.05 | 0.05   | 0.10   | 0.80  |
    pub const fn canonical() -> Self {
        Self {
            rows: [
                [0.80, 0.10, 0.05, 0.05],
                [0.10, 0.70, 0.10, 0.10],
                [0.05, 0.10, 0.70, 0.15],
                [0.05, 0.05, 0.10, 0.80],
            ],
        }
    }

    /// Check every entry is a probability and every row sums to one.
    pub fn validate(&self) -> Result<()> {
        for (bucket, row) in self.rows.iter().enumerate() {
            if let Some(bad) = row.iter().find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0) {
                return Err(Error::InvalidSignalTable {
                    message: format!("row {bucket} has entry {bad} outside [0, 1]"),
                });
            }
            let total: f64 = row.iter().sum();
            if (total - 1.0).abs() > 1e-6 {
                return Err(Error::InvalidSignalTable {
                    message: format!("row {bucket} sums to {total}, expected 1"),
                });
            }
        }
        Ok(())
    }

    /// Likelihood of observing `signal` when the ghost is `distance` away.
    ///
    /// Under the proximity scheme green also covers the yellow band, so the
    /// yellow mass of each row folds into green. `Neutral` carries no
    /// information and scores 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghostbuster::observation::SignalTable;
    /// use ghostbuster::types::{Signal, SignalScheme};
    ///
    /// let table = SignalTable::canonical();
    /// assert_eq!(table.likelihood(Signal::Red, 0, SignalScheme::Graded), 0.80);
    /// assert_eq!(table.likelihood(Signal::Green, 7, SignalScheme::Graded), 0.80);
    /// assert!((table.likelihood(Signal::Green, 2, SignalScheme::Proximity) - 0.85).abs() < 1e-12);
    /// ```
    pub fn likelihood(&self, signal: Signal, distance: usize, scheme: SignalScheme) -> f64 {
        let row = &self.rows[distance.min(3)];
        match (signal, scheme) {
            (Signal::Neutral, _) => 1.0,
            (Signal::Red, _) => row[RED],
            (Signal::Orange, _) => row[ORANGE],
            (Signal::Yellow, SignalScheme::Graded) => row[YELLOW],
            (Signal::Yellow, SignalScheme::Proximity) => 0.0,
            (Signal::Green, SignalScheme::Graded) => row[GREEN],
            (Signal::Green, SignalScheme::Proximity) => row[GREEN] + row[YELLOW],
        }
    }
}

impl Default for SignalTable {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Result of applying an observation to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Posterior computed and normalized.
    Normalized,
    /// Posterior mass collapsed; the grid was reset to uniform.
    ResetToUniform,
}

/// Bayesian observation model over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObservationModel {
    table: SignalTable,
    scheme: SignalScheme,
}

impl ObservationModel {
    pub fn new(table: SignalTable, scheme: SignalScheme) -> Self {
        Self { table, scheme }
    }

    pub fn table(&self) -> &SignalTable {
        &self.table
    }

    pub fn scheme(&self) -> SignalScheme {
        self.scheme
    }

    /// Posterior `∝ prior × P(signal | distance(cell, at))`, normalized over
    /// the grid. A collapsed total resets every cell to `1/N²`.
    pub fn update(&self, grid: &mut Grid, at: Position, signal: Signal) -> UpdateOutcome {
        let unnormalized = grid.all().map(|cell| {
            let distance = chebyshev_distance(cell.position(), at);
            cell.probability() * self.table.likelihood(signal, distance, self.scheme)
        });

        match normalize_weights(unnormalized) {
            Some(posterior) => {
                grid.set_probabilities(&posterior);
                UpdateOutcome::Normalized
            }
            None => {
                warn!(?at, %signal, "posterior collapsed, resetting to uniform");
                grid.reset_probabilities();
                UpdateOutcome::ResetToUniform
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_table_is_valid() {
        SignalTable::canonical()
            .validate()
            .expect("canonical table must validate");
    }

    #[test]
    fn validate_rejects_rows_not_summing_to_one() {
        let mut table = SignalTable::canonical();
        table.rows[2][0] = 0.5;
        assert!(matches!(
            table.validate(),
            Err(Error::InvalidSignalTable { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_entries() {
        let mut table = SignalTable::canonical();
        table.rows[0] = [1.2, -0.2, 0.0, 0.0];
        assert!(table.validate().is_err());
    }

    #[test]
    fn red_observation_concentrates_mass_on_inquiry() {
        let model = ObservationModel::default();
        let mut grid = Grid::new(10);
        let outcome = model.update(&mut grid, (5, 5), Signal::Red);

        assert_eq!(outcome, UpdateOutcome::Normalized);
        assert!((grid.total_probability() - 1.0).abs() < 1e-9);
        let centre = grid.get(5, 5).unwrap().probability();
        // 0.80 / (0.80 + 8*0.10 + 16*0.05 + 75*0.05)
        assert!((centre - 0.80 / 6.15).abs() < 1e-12);
        assert!(grid.all().all(|cell| cell.probability() <= centre));
    }

    #[test]
    fn green_observation_lowers_nearby_cells() {
        let model = ObservationModel::default();
        let mut grid = Grid::new(10);
        let prior = grid.get(0, 0).unwrap().probability();

        model.update(&mut grid, (0, 0), Signal::Green);

        assert!(grid.get(0, 0).unwrap().probability() < prior);
        assert!(grid.get(9, 9).unwrap().probability() > prior);
    }

    #[test]
    fn collapsed_posterior_resets_to_uniform() {
        // red is impossible at every distance
        let table = SignalTable {
            rows: [[0.0, 0.5, 0.5, 0.0]; 4],
        };
        let model = ObservationModel::new(table, SignalScheme::Graded);
        let mut grid = Grid::new(4);

        let outcome = model.update(&mut grid, (1, 1), Signal::Red);

        assert_eq!(outcome, UpdateOutcome::ResetToUniform);
        assert!(
            grid.all()
                .all(|cell| (cell.probability() - 1.0 / 16.0).abs() < 1e-12)
        );
    }
}
