//! Core value types shared across the engine: coordinates, signals and the
//! scheme that turns a true distance into a signal.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Grid coordinate as `(row, col)`.
pub type Position = (usize, usize);

/// Chebyshev distance `max(|Δrow|, |Δcol|)` between two positions.
///
/// # Examples
///
/// ```
/// use ghostbuster::types::chebyshev_distance;
///
/// assert_eq!(chebyshev_distance((0, 0), (5, 5)), 5);
/// assert_eq!(chebyshev_distance((4, 6), (5, 5)), 1);
/// assert_eq!(chebyshev_distance((3, 3), (3, 3)), 0);
/// ```
pub fn chebyshev_distance(a: Position, b: Position) -> usize {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}

/// Proximity signal shown on a cell.
///
/// `Neutral` marks a cell that has not been inquired; it is never the result
/// of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    #[default]
    Neutral,
    Red,
    Orange,
    Yellow,
    Green,
}

impl Signal {
    /// Lowercase name used by the status snapshot.
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Neutral => "neutral",
            Signal::Red => "red",
            Signal::Orange => "orange",
            Signal::Yellow => "yellow",
            Signal::Green => "green",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the true distance to the ghost is bucketed into a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalScheme {
    /// Four signals: here, adjacent, two away, further.
    #[default]
    Graded,
    /// Three signals: here, adjacent, anything further.
    Proximity,
}

impl SignalScheme {
    /// Signal observed when the ghost is `distance` cells away.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghostbuster::types::{Signal, SignalScheme};
    ///
    /// assert_eq!(SignalScheme::Graded.signal_for(2), Signal::Yellow);
    /// assert_eq!(SignalScheme::Proximity.signal_for(2), Signal::Green);
    /// assert_eq!(SignalScheme::Proximity.signal_for(0), Signal::Red);
    /// ```
    pub fn signal_for(self, distance: usize) -> Signal {
        match (self, distance) {
            (_, 0) => Signal::Red,
            (_, 1) => Signal::Orange,
            (SignalScheme::Graded, 2) => Signal::Yellow,
            _ => Signal::Green,
        }
    }
}

impl fmt::Display for SignalScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalScheme::Graded => "graded",
            SignalScheme::Proximity => "proximity",
        };
        f.write_str(label)
    }
}

impl FromStr for SignalScheme {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graded" | "four" | "4" => Ok(SignalScheme::Graded),
            "proximity" | "three" | "3" => Ok(SignalScheme::Proximity),
            _ => Err(crate::Error::ParseSignalScheme {
                input: s.to_string(),
                expected: "graded/4, proximity/3".to_string(),
            }),
        }
    }
}
