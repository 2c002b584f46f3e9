//! Session factory for game engines.
//!
//! Sessions share no mutable state: each call to [`App::new_session`] builds
//! a fresh engine with its own grid, ghost and random source.

use std::sync::atomic::{AtomicU64, Ordering};

use super::config::GameConfig;
use crate::{GameEngine, Result};

/// Factory for independent game sessions.
///
/// # Examples
///
/// ```
/// use ghostbuster::app::App;
///
/// let app = App::new();
/// let session = app.new_session()?;
/// assert_eq!(session.grid().size(), 10);
/// # Ok::<(), ghostbuster::Error>(())
/// ```
#[derive(Debug)]
pub struct App {
    /// Configuration applied to every session
    config: GameConfig,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
    /// Sessions created so far; offsets the default seed
    sessions: AtomicU64,
}

impl App {
    /// Create a new app with default configuration and no default seed.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Create an app handing out sessions with the given configuration.
    pub fn with_config(config: GameConfig) -> Self {
        Self {
            config,
            default_seed: None,
            sessions: AtomicU64::new(0),
        }
    }

    /// Create a builder for constructing an app with custom settings.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of sessions created so far.
    pub fn sessions_created(&self) -> u64 {
        self.sessions.load(Ordering::Relaxed)
    }

    /// Build an independent game session.
    ///
    /// A seed in the configuration wins over the app default. With a default
    /// seed, session `i` is seeded with `default_seed + i`, so a run of
    /// sessions is reproducible while each game differs.
    pub fn new_session(&self) -> Result<GameEngine> {
        let index = self.sessions.fetch_add(1, Ordering::Relaxed);
        let mut config = self.config.clone();
        if config.seed.is_none()
            && let Some(seed) = self.default_seed
        {
            config.seed = Some(seed.wrapping_add(index));
        }
        GameEngine::new(config)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom settings.
#[derive(Debug, Default)]
pub struct AppBuilder {
    config: Option<GameConfig>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base configuration for every session.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a default random seed for all sessions created by this app.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn build(self) -> App {
        let mut app = App::with_config(self.config.unwrap_or_default());
        app.default_seed = self.default_seed;
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_creates_session() {
        let app = App::new();
        assert!(app.new_session().is_ok());
        assert_eq!(app.sessions_created(), 1);
    }

    #[test]
    fn test_default_seed_makes_runs_reproducible() {
        let first = App::for_testing().with_default_seed(42).build();
        let second = App::for_testing().with_default_seed(42).build();
        for _ in 0..5 {
            let a = first.new_session().unwrap();
            let b = second.new_session().unwrap();
            assert_eq!(a.ghost().position(), b.ghost().position());
        }
    }

    #[test]
    fn test_sessions_get_distinct_seeds() {
        let app = App::for_testing().with_default_seed(7).build();
        let positions: Vec<_> = (0..20)
            .map(|_| app.new_session().unwrap().ghost().position())
            .collect();
        assert!(positions.iter().any(|&pos| pos != positions[0]));
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing()
            .with_config(GameConfig::default().with_seed(123))
            .with_default_seed(42)
            .build();
        let a = app.new_session().unwrap();
        let b = app.new_session().unwrap();
        assert_eq!(a.ghost().position(), b.ghost().position());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let app = App::for_testing().with_default_seed(1).build();
        let mut a = app.new_session().unwrap();
        let b = app.new_session().unwrap();
        a.inquire(0, 0);
        a.switch_to_burst_mode();
        assert_eq!(b.inquiries(), 0);
        assert_eq!(b.grid().inquired_count(), 0);
        assert_eq!(b.mode(), crate::Mode::Inquiry);
    }
}
