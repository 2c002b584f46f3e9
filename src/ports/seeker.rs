//! Seeker port - abstraction over automated play strategies

use crate::{GameEngine, types::Position};

/// Strategy that plays the seeker's side of a game.
///
/// A seeker sees the engine the same way a player does: through the grid's
/// inquiry results and probabilities. It must not consult
/// [`GameEngine::ghost`].
///
/// # Examples
///
/// ```
/// use ghostbuster::{GameEngine, ports::Seeker, types::Position};
///
/// /// Sweeps the grid row by row, then guesses the most likely cell.
/// struct Sweep;
///
/// impl Seeker for Sweep {
///     fn name(&self) -> &str {
///         "sweep"
///     }
///
///     fn next_inquiry(&mut self, engine: &GameEngine) -> Option<Position> {
///         if engine.inquiries() >= 10 {
///             return None;
///         }
///         engine.grid().all().find(|cell| !cell.is_inquired()).map(|cell| cell.position())
///     }
///
///     fn burst_target(&mut self, engine: &GameEngine) -> Position {
///         engine.most_likely()
///     }
/// }
/// ```
pub trait Seeker: Send {
    /// Short name used in reports.
    fn name(&self) -> &str;

    /// Next cell to inquire, or `None` to switch to burst mode.
    ///
    /// Must return an uninquired, in-range cell when it returns `Some`.
    fn next_inquiry(&mut self, engine: &GameEngine) -> Option<Position>;

    /// The single burst guess.
    fn burst_target(&mut self, engine: &GameEngine) -> Position;

    /// Called before each new game. Stateless seekers need not override it.
    fn reset(&mut self) {}
}
