//! Automated play: run a seeker against a batch of sessions.
//!
//! The runner owns no output logic. Observers receive one [`GameRecord`] per
//! finished game and the caller gets a [`SimulationSummary`] at the end.

pub mod observers;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, info};

pub use observers::{CsvObserver, ProgressObserver};

use crate::{
    GameEngine, Mode, Outcome, Result,
    app::App,
    ports::{Observer, Seeker},
};

/// Confidence level of the reported win-rate interval.
const CONFIDENCE: f64 = 0.95;

/// Outcome of one automated game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game number, starting at 1
    pub game: usize,
    pub outcome: Outcome,
    pub inquiries: usize,
    pub relocations: usize,
    /// Belief entropy (nats) when the burst was taken
    pub final_entropy: f64,
    /// Ghost row when the game ended
    pub ghost_row: usize,
    /// Ghost column when the game ended
    pub ghost_col: usize,
}

impl GameRecord {
    pub fn won(&self) -> bool {
        self.outcome == Outcome::Won
    }
}

/// Play one game to completion.
///
/// The seeker inquires until it asks to burst (or no cells remain) and then
/// takes the single burst attempt. An inquiry the engine rejects aborts the
/// game with that error.
pub fn play_game(
    game: usize,
    engine: &mut GameEngine,
    seeker: &mut dyn Seeker,
) -> Result<GameRecord> {
    while engine.mode() == Mode::Inquiry {
        match seeker.next_inquiry(engine) {
            Some((row, col)) => {
                engine.submit_inquiry(row, col)?;
            }
            None => engine.switch_to_burst_mode(),
        }
    }

    let final_entropy = engine.belief_entropy();
    let (row, col) = seeker.burst_target(engine);
    let outcome = engine.submit_burst(row, col)?;
    let (ghost_row, ghost_col) = engine.ghost().position();

    debug!(
        game,
        won = outcome == Outcome::Won,
        inquiries = engine.inquiries(),
        "game finished"
    );
    Ok(GameRecord {
        game,
        outcome,
        inquiries: engine.inquiries(),
        relocations: engine.relocations(),
        final_entropy,
        ghost_row,
        ghost_col,
    })
}

/// Aggregate results of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub seeker: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub mean_inquiries: f64,
    pub mean_relocations: f64,
    /// Wilson score interval for the win rate
    pub win_rate_interval: (f64, f64),
}

impl SimulationSummary {
    /// Summarize a set of finished games.
    pub fn from_records(seeker: &str, records: &[GameRecord]) -> Self {
        let games = records.len();
        let wins = records.iter().filter(|record| record.won()).count();
        let mean = |value: fn(&GameRecord) -> usize| {
            if games == 0 {
                0.0
            } else {
                records.iter().map(value).sum::<usize>() as f64 / games as f64
            }
        };

        Self {
            seeker: seeker.to_string(),
            games,
            wins,
            losses: games - wins,
            win_rate: if games == 0 { 0.0 } else { wins as f64 / games as f64 },
            mean_inquiries: mean(|record: &GameRecord| record.inquiries),
            mean_relocations: mean(|record: &GameRecord| record.relocations),
            win_rate_interval: wilson_interval(wins, games, CONFIDENCE),
        }
    }
}

/// Wilson score interval for `successes` out of `trials`.
///
/// Returns `(0.0, 1.0)` when there are no trials.
pub fn wilson_interval(successes: usize, trials: usize, confidence: f64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }
    let z = Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
        .unwrap_or(1.96);
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;
    let centre = (p + z2 / (2.0 * n)) / (1.0 + z2 / n);
    let half = z / (1.0 + z2 / n) * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
    ((centre - half).max(0.0), (centre + half).min(1.0))
}

/// Play `games` sessions from `app` with `seeker`, notifying `observers`.
pub fn run(
    app: &App,
    seeker: &mut dyn Seeker,
    games: usize,
    observers: &mut [Box<dyn Observer>],
) -> Result<SimulationSummary> {
    info!(games, seeker = seeker.name(), "simulation started");
    for observer in observers.iter_mut() {
        observer.on_simulation_start(games)?;
    }

    let mut records = Vec::with_capacity(games);
    for game in 1..=games {
        let mut engine = app.new_session()?;
        seeker.reset();
        let record = play_game(game, &mut engine, seeker)?;
        for observer in observers.iter_mut() {
            observer.on_game_end(&record)?;
        }
        records.push(record);
    }

    for observer in observers.iter_mut() {
        observer.on_simulation_end()?;
    }

    let summary = SimulationSummary::from_records(seeker.name(), &records);
    info!(
        wins = summary.wins,
        win_rate = summary.win_rate,
        "simulation finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, adapters::GreedySeeker};

    #[test]
    fn wilson_interval_brackets_the_rate() {
        let (low, high) = wilson_interval(50, 100, 0.95);
        assert!(low < 0.5 && 0.5 < high);
        assert!((low - 0.4038).abs() < 1e-3);
        assert!((high - 0.5962).abs() < 1e-3);
    }

    #[test]
    fn wilson_interval_stays_in_unit_range() {
        assert_eq!(wilson_interval(0, 0, 0.95), (0.0, 1.0));
        let (low, high) = wilson_interval(10, 10, 0.95);
        assert!(low > 0.6);
        assert!(high <= 1.0);
    }

    #[test]
    fn greedy_seeker_wins_against_a_static_ghost() {
        let mut engine = GameEngine::builder()
            .config(GameConfig::default().with_move_budget(0))
            .seed(8)
            .ghost_at((3, 6))
            .build()
            .unwrap();
        let mut seeker = GreedySeeker::new(0.99, 100);

        let record = play_game(1, &mut engine, &mut seeker).unwrap();

        assert!(record.won());
        assert_eq!((record.ghost_row, record.ghost_col), (3, 6));
        assert!(engine.mode().is_terminal());
    }

    #[test]
    fn run_plays_every_game() {
        let app = App::for_testing()
            .with_config(GameConfig::default().with_grid_size(5))
            .with_default_seed(1)
            .build();
        let mut seeker = GreedySeeker::new(0.9, 8);

        let summary = run(&app, &mut seeker, 12, &mut []).unwrap();

        assert_eq!(summary.games, 12);
        assert_eq!(summary.wins + summary.losses, 12);
        assert!(summary.mean_inquiries <= 8.0);
        assert_eq!(app.sessions_created(), 12);
    }
}
