//! Adapters implementing the seeker port.
//!
//! - [`GreedySeeker`]: always inquires the most probable cell
//! - [`RandomSeeker`]: baseline that inquires at random

pub mod greedy_seeker;
pub mod random_seeker;

use std::str::FromStr;

pub use greedy_seeker::GreedySeeker;
pub use random_seeker::RandomSeeker;

/// Seeker strategies selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekerKind {
    Greedy,
    Random,
}

impl SeekerKind {
    /// Build the seeker with default parameters.
    pub fn build(self, seed: Option<u64>) -> Box<dyn crate::ports::Seeker> {
        match self {
            SeekerKind::Greedy => Box::new(GreedySeeker::default()),
            SeekerKind::Random => Box::new(RandomSeeker::new(seed)),
        }
    }
}

impl FromStr for SeekerKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" | "max" => Ok(SeekerKind::Greedy),
            "random" | "uniform" => Ok(SeekerKind::Random),
            _ => Err(crate::Error::ParseSeeker {
                input: s.to_string(),
                expected: "greedy, random".to_string(),
            }),
        }
    }
}
