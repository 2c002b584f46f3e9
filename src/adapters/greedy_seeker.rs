//! Greedy seeker: inquire wherever the belief is highest.

use crate::{GameEngine, ports::Seeker, types::Position};

/// Inquires the most probable uninquired cell until confident enough, then
/// bursts on the most probable cell overall.
#[derive(Debug, Clone)]
pub struct GreedySeeker {
    /// Burst once some cell holds at least this much probability mass.
    pub burst_confidence: f64,
    /// Burst after this many inquiries regardless of confidence.
    pub max_inquiries: usize,
}

impl GreedySeeker {
    pub fn new(burst_confidence: f64, max_inquiries: usize) -> Self {
        Self {
            burst_confidence,
            max_inquiries,
        }
    }
}

impl Default for GreedySeeker {
    fn default() -> Self {
        Self::new(0.9, 25)
    }
}

impl Seeker for GreedySeeker {
    fn name(&self) -> &str {
        "greedy"
    }

    fn next_inquiry(&mut self, engine: &GameEngine) -> Option<Position> {
        if engine.inquiries() >= self.max_inquiries {
            return None;
        }
        let (row, col) = engine.most_likely();
        let confidence = engine
            .grid()
            .get(row, col)
            .map_or(0.0, |cell| cell.probability());
        if confidence >= self.burst_confidence {
            return None;
        }
        engine.best_inquiry()
    }

    fn burst_target(&mut self, engine: &GameEngine) -> Position {
        engine.most_likely()
    }
}
