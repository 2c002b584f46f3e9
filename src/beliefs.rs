//! Belief maintenance over the ghost's location.
//!
//! An engine runs exactly one update mode per game. `Bayesian` applies the
//! observation model; `RegionWeighting` is a guided heuristic that nudges
//! probability towards the ghost's true surroundings; `ContiguousRegion`
//! spreads the mass evenly over the pocket of uninquired cells the ghost sits
//! in. Whatever the mode, when the constraint layer is active the result is
//! restricted to the constraint set and renormalized.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Error, Result,
    constraints::ConstraintSet,
    grid::Grid,
    observation::UpdateOutcome,
    types::{Position, Signal, chebyshev_distance},
    utils::{normalize_weights, uniform_over},
};

/// Multiplicative region heuristic around the ghost's true cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionWeighting {
    /// Half-width of the boosted block; 2 gives a 5×5 block.
    pub radius: usize,
    /// Factor applied inside the block (> 1).
    pub boost: f64,
    /// Factor applied outside the block (< 1).
    pub decay: f64,
}

impl RegionWeighting {
    pub fn validate(&self) -> Result<()> {
        if !self.boost.is_finite() || self.boost <= 1.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("region boost must exceed 1, got {}", self.boost),
            });
        }
        if !self.decay.is_finite() || self.decay <= 0.0 || self.decay >= 1.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("region decay must lie in (0, 1), got {}", self.decay),
            });
        }
        Ok(())
    }

    /// Scale every cell by `boost` inside the block around `ghost` and by
    /// `decay` elsewhere. The grid is left unnormalized.
    pub fn reweight(&self, grid: &mut Grid, ghost: Position) {
        let weights: Vec<f64> = grid
            .all()
            .map(|cell| {
                let factor = if chebyshev_distance(cell.position(), ghost) <= self.radius {
                    self.boost
                } else {
                    self.decay
                };
                cell.probability() * factor
            })
            .collect();
        grid.set_probabilities(&weights);
    }
}

impl Default for RegionWeighting {
    fn default() -> Self {
        Self {
            radius: 2,
            boost: 1.5,
            decay: 0.8,
        }
    }
}

/// Which update mechanism drives the probability grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateMode {
    #[default]
    Bayesian,
    RegionWeighting(RegionWeighting),
    ContiguousRegion,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UpdateMode::Bayesian => "bayesian",
            UpdateMode::RegionWeighting(_) => "region",
            UpdateMode::ContiguousRegion => "contiguous",
        };
        f.write_str(label)
    }
}

impl FromStr for UpdateMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bayesian" | "bayes" => Ok(UpdateMode::Bayesian),
            "region" | "region-weighting" | "guided" => {
                Ok(UpdateMode::RegionWeighting(RegionWeighting::default()))
            }
            "contiguous" | "contiguous-region" | "flood" => Ok(UpdateMode::ContiguousRegion),
            _ => Err(Error::ParseUpdateMode {
                input: s.to_string(),
                expected: "bayesian, region, contiguous".to_string(),
            }),
        }
    }
}

/// Uninquired cells 8-connected to `start`, in row-major order.
///
/// Empty when `start` is out of range or already inquired.
pub fn contiguous_region(grid: &Grid, start: Position) -> Vec<Position> {
    match grid.get(start.0, start.1) {
        Some(cell) if !cell.is_inquired() => {}
        _ => return Vec::new(),
    }

    let mut seen = vec![false; grid.cell_count()];
    let index = |(row, col): Position| row * grid.size() + col;
    seen[index(start)] = true;
    let mut stack = vec![start];
    while let Some((row, col)) = stack.pop() {
        for neighbor in grid.neighbors(row, col, 1) {
            let pos = neighbor.position();
            if !neighbor.is_inquired() && !seen[index(pos)] {
                seen[index(pos)] = true;
                stack.push(pos);
            }
        }
    }

    grid.positions().filter(|&pos| seen[index(pos)]).collect()
}

/// Spread the belief evenly over the ghost's uninquired pocket.
///
/// A red inquiry on the ghost's cell pins all mass there. When the ghost
/// sits on an inquired cell without a red signal, the mass goes evenly to
/// every uninquired cell, or to the whole grid if none remain.
pub fn assign_contiguous(grid: &mut Grid, ghost: Position) {
    let support: Vec<bool> = match grid.get(ghost.0, ghost.1) {
        Some(cell) if cell.is_inquired() && cell.signal() == Signal::Red => {
            grid.positions().map(|pos| pos == ghost).collect()
        }
        Some(cell) if cell.is_inquired() => grid.all().map(|cell| !cell.is_inquired()).collect(),
        _ => {
            let region = contiguous_region(grid, ghost);
            grid.positions().map(|pos| region.binary_search(&pos).is_ok()).collect()
        }
    };

    match uniform_over(&support) {
        Some(probabilities) => grid.set_probabilities(&probabilities),
        None => grid.reset_probabilities(),
    }
}

/// Renormalize the grid, optionally restricted to a constraint set.
///
/// With a support set, cells outside it are zeroed and a collapse falls back
/// to uniform over the set. Without one, a collapse falls back to uniform
/// over the whole grid.
///
/// # Panics
///
/// Panics if `support` is empty: the true position is always a member, so an
/// empty set means the constraint bookkeeping is broken.
pub fn renormalize(grid: &mut Grid, support: Option<&ConstraintSet>) -> UpdateOutcome {
    let Some(support) = support else {
        return match normalize_weights(grid.probabilities()) {
            Some(probabilities) => {
                grid.set_probabilities(&probabilities);
                UpdateOutcome::Normalized
            }
            None => {
                warn!("belief mass collapsed, resetting to uniform over the grid");
                grid.reset_probabilities();
                UpdateOutcome::ResetToUniform
            }
        };
    };

    assert!(
        !support.is_empty(),
        "constraint set is empty; the ghost's position must always remain feasible"
    );

    let mask: Vec<bool> = grid.positions().map(|pos| support.contains(pos)).collect();
    let masked = grid
        .all()
        .zip(&mask)
        .map(|(cell, &kept)| if kept { cell.probability() } else { 0.0 });

    match normalize_weights(masked) {
        Some(probabilities) => {
            grid.set_probabilities(&probabilities);
            UpdateOutcome::Normalized
        }
        None => {
            warn!(
                feasible = support.len(),
                "belief mass collapsed, resetting to uniform over feasible cells"
            );
            if let Some(uniform) = uniform_over(&mask) {
                grid.set_probabilities(&uniform);
            }
            UpdateOutcome::ResetToUniform
        }
    }
}
