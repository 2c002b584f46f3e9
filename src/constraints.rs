//! Hard constraint propagation: the set of cells that are still logically
//! consistent with every signal observed since the ghost last moved.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{Position, Signal, SignalScheme, chebyshev_distance};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    positions: BTreeSet<Position>,
}

impl ConstraintSet {
    /// Every coordinate of a `size × size` grid.
    pub fn full(size: usize) -> Self {
        Self {
            positions: (0..size)
                .flat_map(|row| (0..size).map(move |col| (row, col)))
                .collect(),
        }
    }

    pub fn reset(&mut self, size: usize) {
        *self = Self::full(size);
    }

    /// Keep only the coordinates whose distance to `at` would have produced
    /// `signal`.
    ///
    /// Under the proximity scheme this is: red keeps just `at`, orange keeps
    /// its neighbours, green drops `at` and its neighbours.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghostbuster::constraints::ConstraintSet;
    /// use ghostbuster::types::{Signal, SignalScheme};
    ///
    /// let mut set = ConstraintSet::full(10);
    /// set.observe((0, 0), Signal::Green, SignalScheme::Proximity);
    /// assert_eq!(set.len(), 96);
    /// assert!(!set.contains((1, 1)));
    ///
    /// set.observe((5, 5), Signal::Red, SignalScheme::Proximity);
    /// assert_eq!(set.positions(), vec![(5, 5)]);
    /// ```
    pub fn observe(&mut self, at: Position, signal: Signal, scheme: SignalScheme) {
        if signal == Signal::Neutral {
            return;
        }
        self.positions
            .retain(|&pos| scheme.signal_for(chebyshev_distance(pos, at)) == signal);
    }

    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Members in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.iter().collect()
    }
}
