//! Random baseline seeker.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{GameEngine, ports::Seeker, types::Position, utils::weighted_sample};

/// Inquires uninquired cells uniformly at random, then bursts on a cell
/// sampled from the current belief.
#[derive(Debug, Clone)]
pub struct RandomSeeker {
    rng: StdRng,
    /// Inquiries made before switching to burst mode.
    pub inquiries_before_burst: usize,
}

impl RandomSeeker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            rng,
            inquiries_before_burst: 10,
        }
    }

    pub fn with_inquiries_before_burst(mut self, inquiries: usize) -> Self {
        self.inquiries_before_burst = inquiries;
        self
    }
}

impl Seeker for RandomSeeker {
    fn name(&self) -> &str {
        "random"
    }

    fn next_inquiry(&mut self, engine: &GameEngine) -> Option<Position> {
        if engine.inquiries() >= self.inquiries_before_burst {
            return None;
        }
        let open: Vec<Position> = engine
            .grid()
            .all()
            .filter(|cell| !cell.is_inquired())
            .map(|cell| cell.position())
            .collect();
        open.choose(&mut self.rng).copied()
    }

    fn burst_target(&mut self, engine: &GameEngine) -> Position {
        let weighted: Vec<(Position, f64)> = engine
            .grid()
            .all()
            .map(|cell| (cell.position(), cell.probability()))
            .collect();
        weighted_sample(&mut self.rng, &weighted).unwrap_or_else(|| engine.most_likely())
    }
}
