//! Observer port - abstraction for simulation observation and data collection
//!
//! Observers are notified as a batch of games is played, allowing progress
//! display and record export without coupling the runner to any output
//! format.

use crate::{Result, simulation::GameRecord};

/// Observer trait for monitoring a simulation.
///
/// # Event Sequence
///
/// 1. `on_simulation_start(total_games)` - Once at the beginning
/// 2. `on_game_end(record)` - After every finished game
/// 3. `on_simulation_end()` - Once at the end
///
/// # Examples
///
/// ```
/// use ghostbuster::{ports::Observer, simulation::GameRecord};
///
/// struct CountWins {
///     wins: usize,
/// }
///
/// impl Observer for CountWins {
///     fn on_game_end(&mut self, record: &GameRecord) -> ghostbuster::Result<()> {
///         if record.won() {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when the simulation starts.
    fn on_simulation_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each game reaches a terminal state.
    fn on_game_end(&mut self, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called once all games have been played.
    fn on_simulation_end(&mut self) -> Result<()> {
        Ok(())
    }
}
