//! Turn-based game engine.
//!
//! The engine owns the grid, the ghost, the constraint set and the random
//! source of one session. A game moves `Inquiry → Burst → Terminal`; every
//! transition is one-way. Presentation layers drive it through
//! [`GameEngine::inquire`], [`GameEngine::switch_to_burst_mode`] and
//! [`GameEngine::burst_attempt`] and read it through [`GameEngine::status`].

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use crate::{
    Error, Result,
    app::GameConfig,
    beliefs::{UpdateMode, assign_contiguous, renormalize},
    constraints::ConstraintSet,
    ghost::Ghost,
    grid::Grid,
    observation::ObservationModel,
    types::{Position, Signal, chebyshev_distance},
    utils::{round_to, shannon_entropy},
};

/// Radius of the neighbour block inspected by the relocation trigger.
const TRIGGER_RADIUS: usize = 1;
/// Decimal places of probabilities in the status snapshot.
pub const STATUS_DECIMALS: u32 = 2;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Result of the single burst attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
}

/// Phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Inquiry,
    Burst,
    Terminal(Outcome),
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Inquiry => "inquiry",
            Mode::Burst => "burst",
            Mode::Terminal(Outcome::Won) => "won",
            Mode::Terminal(Outcome::Lost) => "lost",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Mode::Terminal(_))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One cell of the status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellStatus {
    pub inquired: bool,
    pub signal: Signal,
    /// Rounded to [`STATUS_DECIMALS`] places.
    pub probability: f64,
}

/// Read-only snapshot handed to presentation layers.
///
/// `agent_position` is `None` while the game is in inquiry mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub mode: Mode,
    pub agent_position: Option<Position>,
    pub moves_left: u32,
    pub grid: Vec<Vec<CellStatus>>,
}

/// What a successful inquiry revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InquiryReport {
    pub position: Position,
    pub signal: Signal,
    /// Whether the ghost relocated as a consequence.
    pub relocated: bool,
}

/// Builder for [`GameEngine`].
///
/// # Examples
///
/// ```
/// use ghostbuster::{GameConfig, GameEngine};
///
/// let engine = GameEngine::builder()
///     .config(GameConfig::default().with_move_budget(0))
///     .seed(7)
///     .ghost_at((5, 5))
///     .build()?;
/// assert_eq!(engine.ghost().position(), (5, 5));
/// # Ok::<(), ghostbuster::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameEngineBuilder {
    config: GameConfig,
    ghost_start: Option<Position>,
}

impl GameEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Start the ghost on a known cell instead of a random one.
    pub fn ghost_at(mut self, position: Position) -> Self {
        self.ghost_start = Some(position);
        self
    }

    pub fn build(self) -> Result<GameEngine> {
        let config = self.config;
        config.validate()?;

        let size = config.grid_size;
        let mut rng = build_rng(config.seed);
        let ghost = match self.ghost_start {
            Some((row, col)) if row >= size || col >= size => {
                return Err(Error::OutOfBounds { row, col, size });
            }
            Some(position) => Ghost::at(position, config.move_budget),
            None => Ghost::place(size, config.move_budget, &mut rng),
        };

        let engine = GameEngine {
            grid: Grid::new(size),
            ghost,
            constraints: ConstraintSet::full(size),
            model: ObservationModel::new(config.signal_table, config.signal_scheme),
            mode: Mode::Inquiry,
            rng,
            inquiries: 0,
            relocations: 0,
            config,
        };
        debug!(ghost = ?engine.ghost.position(), size, "game started");
        Ok(engine)
    }
}

/// One game session.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    ghost: Ghost,
    constraints: ConstraintSet,
    model: ObservationModel,
    mode: Mode,
    rng: StdRng,
    inquiries: usize,
    relocations: usize,
}

impl GameEngine {
    pub fn builder() -> GameEngineBuilder {
        GameEngineBuilder::new()
    }

    /// Start a game with the ghost placed at random.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Oracle view of the ghost for harnesses and tests. Presentation layers
    /// should only use [`GameEngine::status`].
    pub fn ghost(&self) -> &Ghost {
        &self.ghost
    }

    pub fn moves_left(&self) -> u32 {
        self.ghost.moves_left()
    }

    /// Inquiries accepted since the game started.
    pub fn inquiries(&self) -> usize {
        self.inquiries
    }

    /// Relocations the ghost has made since the game started.
    pub fn relocations(&self) -> usize {
        self.relocations
    }

    /// Shannon entropy (nats) of the current belief grid.
    pub fn belief_entropy(&self) -> f64 {
        shannon_entropy(self.grid.probabilities())
    }

    /// Most probable cell overall; ties go to the first in row-major order.
    pub fn most_likely(&self) -> Position {
        self.argmax(|_| true).unwrap_or((0, 0))
    }

    /// Most probable cell not yet inquired, if any remain.
    pub fn best_inquiry(&self) -> Option<Position> {
        self.argmax(|inquired| !inquired)
    }

    fn argmax(&self, admit: impl Fn(bool) -> bool) -> Option<Position> {
        self.grid
            .all()
            .filter(|cell| admit(cell.is_inquired()))
            .fold(None, |best: Option<(Position, f64)>, cell| match best {
                Some((_, p)) if p >= cell.probability() => best,
                _ => Some((cell.position(), cell.probability())),
            })
            .map(|(position, _)| position)
    }

    /// Inquire a cell. Returns `true` iff the ghost relocated as a result.
    ///
    /// Out-of-range coordinates, repeated inquiries and calls outside inquiry
    /// mode have no effect and return `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghostbuster::GameEngine;
    ///
    /// let mut engine = GameEngine::builder().seed(1).ghost_at((9, 9)).build()?;
    /// assert!(!engine.inquire(0, 0));
    /// assert!(!engine.inquire(0, 0));
    /// assert!(!engine.inquire(42, 0));
    /// assert_eq!(engine.inquiries(), 1);
    /// # Ok::<(), ghostbuster::Error>(())
    /// ```
    pub fn inquire(&mut self, row: usize, col: usize) -> bool {
        match self.submit_inquiry(row, col) {
            Ok(report) => report.relocated,
            Err(err) => {
                debug!(row, col, %err, "inquiry rejected");
                false
            }
        }
    }

    /// Fallible form of [`GameEngine::inquire`] reporting the observed signal.
    pub fn submit_inquiry(&mut self, row: usize, col: usize) -> Result<InquiryReport> {
        if self.mode != Mode::Inquiry {
            return Err(Error::WrongMode {
                operation: "inquire",
                mode: self.mode,
            });
        }
        let size = self.grid.size();
        let cell = self
            .grid
            .get_mut(row, col)
            .ok_or(Error::OutOfBounds { row, col, size })?;
        if cell.is_inquired() {
            return Err(Error::AlreadyInquired { row, col });
        }

        let position = (row, col);
        let distance = chebyshev_distance(position, self.ghost.position());
        let signal = self.config.signal_scheme.signal_for(distance);
        cell.mark_inquired(signal);
        self.inquiries += 1;
        debug!(?position, %signal, "inquiry resolved");

        self.constraints
            .observe(position, signal, self.config.signal_scheme);
        self.update_beliefs(position, signal);
        let relocated = self.check_relocation(position, distance);

        debug_assert!(self.constraints.contains(self.ghost.position()));
        Ok(InquiryReport {
            position,
            signal,
            relocated,
        })
    }

    fn update_beliefs(&mut self, at: Position, signal: Signal) {
        match self.config.update_mode {
            UpdateMode::Bayesian => {
                self.model.update(&mut self.grid, at, signal);
                if self.config.constraint_layer {
                    renormalize(&mut self.grid, Some(&self.constraints));
                }
            }
            UpdateMode::RegionWeighting(region) => {
                region.reweight(&mut self.grid, self.ghost.position());
                let support = self.config.constraint_layer.then_some(&self.constraints);
                renormalize(&mut self.grid, support);
            }
            UpdateMode::ContiguousRegion => {
                assign_contiguous(&mut self.grid, self.ghost.position());
                let support = self.config.constraint_layer.then_some(&self.constraints);
                renormalize(&mut self.grid, support);
            }
        }
    }

    /// Relocate the ghost when it was found or the inquiry's neighbourhood is
    /// mostly explored. A move invalidates all accumulated evidence.
    fn check_relocation(&mut self, at: Position, distance: usize) -> bool {
        let found = distance == 0;
        let crowded = self.grid.inquired_fraction(at.0, at.1, TRIGGER_RADIUS)
            >= self.config.relocation_threshold;
        if !found && !crowded {
            return false;
        }

        if !self.ghost.relocate(&self.grid, &mut self.rng) {
            return false;
        }

        self.relocations += 1;
        self.constraints.reset(self.grid.size());
        self.recompute_beliefs();
        true
    }

    fn recompute_beliefs(&mut self) {
        self.grid.reset_probabilities();
        match self.config.update_mode {
            UpdateMode::Bayesian => {}
            UpdateMode::RegionWeighting(region) => {
                region.reweight(&mut self.grid, self.ghost.position());
            }
            UpdateMode::ContiguousRegion => {
                assign_contiguous(&mut self.grid, self.ghost.position());
            }
        }
        let support = self.config.constraint_layer.then_some(&self.constraints);
        renormalize(&mut self.grid, support);
    }

    /// Enter burst mode. No-op unless the game is in inquiry mode.
    pub fn switch_to_burst_mode(&mut self) {
        if self.mode == Mode::Inquiry {
            self.mode = Mode::Burst;
            debug!(inquiries = self.inquiries, "burst mode activated");
        }
    }

    /// The one burst attempt. Returns `true` iff the ghost was caught.
    ///
    /// Only valid in burst mode; otherwise, or for out-of-range
    /// coordinates, nothing happens and `false` is returned.
    pub fn burst_attempt(&mut self, row: usize, col: usize) -> bool {
        match self.submit_burst(row, col) {
            Ok(outcome) => outcome == Outcome::Won,
            Err(err) => {
                debug!(row, col, %err, "burst attempt rejected");
                false
            }
        }
    }

    /// Fallible form of [`GameEngine::burst_attempt`].
    pub fn submit_burst(&mut self, row: usize, col: usize) -> Result<Outcome> {
        if self.mode != Mode::Burst {
            return Err(Error::WrongMode {
                operation: "attempt a burst",
                mode: self.mode,
            });
        }
        let size = self.grid.size();
        if !self.grid.contains(row, col) {
            return Err(Error::OutOfBounds { row, col, size });
        }

        let outcome = if (row, col) == self.ghost.position() {
            Outcome::Won
        } else {
            Outcome::Lost
        };
        self.mode = Mode::Terminal(outcome);
        info!(
            guess = ?(row, col),
            ghost = ?self.ghost.position(),
            result = %self.mode,
            "burst attempt resolved"
        );
        Ok(outcome)
    }

    /// Snapshot of the game for presentation. Never mutates state.
    pub fn status(&self) -> Status {
        let grid = self
            .grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| CellStatus {
                        inquired: cell.is_inquired(),
                        signal: cell.signal(),
                        probability: round_to(cell.probability(), STATUS_DECIMALS),
                    })
                    .collect()
            })
            .collect();

        Status {
            mode: self.mode,
            agent_position: (self.mode != Mode::Inquiry).then(|| self.ghost.position()),
            moves_left: self.ghost.moves_left(),
            grid,
        }
    }

    /// Start over with a fresh grid and a newly placed ghost, keeping the
    /// configuration and the random stream.
    pub fn restart(&mut self) {
        let size = self.config.grid_size;
        self.grid.reset();
        self.ghost = Ghost::place(size, self.config.move_budget, &mut self.rng);
        self.constraints.reset(size);
        self.mode = Mode::Inquiry;
        self.inquiries = 0;
        self.relocations = 0;
        debug!(ghost = ?self.ghost.position(), "game restarted");
    }
}
