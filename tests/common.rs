//! Common test utilities for the ghostbuster test suite.

#![allow(dead_code)]

use ghostbuster::{GameConfig, GameEngine, Position};

/// Tolerance for comparing probability sums.
pub const EPS: f64 = 1e-9;

/// Engine with a fixed seed and the ghost on a known cell.
pub fn engine_with_ghost(config: GameConfig, ghost: Position) -> GameEngine {
    GameEngine::builder()
        .config(config)
        .seed(2024)
        .ghost_at(ghost)
        .build()
        .expect("test engine should build")
}

/// A 10x10 game whose ghost never moves.
pub fn static_game(ghost: Position) -> GameEngine {
    engine_with_ghost(GameConfig::default().with_move_budget(0), ghost)
}

pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Probability of a cell, panicking on out-of-range coordinates.
pub fn probability_at(engine: &GameEngine, (row, col): Position) -> f64 {
    engine
        .grid()
        .get(row, col)
        .expect("position in range")
        .probability()
}
