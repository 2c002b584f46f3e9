//! Ghostbuster: a hidden-ghost search game engine
//!
//! This crate provides:
//! - A turn-based engine where a seeker inquires cells of a square grid and
//!   receives color-coded proximity signals about a hidden ghost
//! - Bayesian belief tracking over the ghost's location, with an optional
//!   hard constraint layer and a region-weighting alternative
//! - An evasive ghost that relocates a limited number of times
//! - Automated seekers and a batch simulation runner
//!
//! # Example
//!
//! ```
//! use ghostbuster::{GameConfig, GameEngine, Mode, Outcome};
//!
//! let mut engine = GameEngine::builder()
//!     .config(GameConfig::default().with_move_budget(0))
//!     .seed(1)
//!     .ghost_at((5, 5))
//!     .build()?;
//!
//! engine.inquire(5, 5);
//! let target = engine.most_likely();
//! engine.switch_to_burst_mode();
//! assert!(engine.burst_attempt(target.0, target.1));
//! assert_eq!(engine.mode(), Mode::Terminal(Outcome::Won));
//! # Ok::<(), ghostbuster::Error>(())
//! ```

pub mod adapters;
pub mod app;
pub mod beliefs;
pub mod cli;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod ghost;
pub mod grid;
pub mod observation;
pub mod ports;
pub mod simulation;
pub mod types;
pub mod utils;

pub use app::{App, GameConfig};
pub use beliefs::{RegionWeighting, UpdateMode};
pub use engine::{
    CellStatus, GameEngine, GameEngineBuilder, InquiryReport, Mode, Outcome, Status,
};
pub use error::{Error, Result};
pub use types::{Position, Signal, SignalScheme};
