//! Application layer: session configuration and the session factory.
//!
//! Every game session is an independent [`crate::GameEngine`]; the [`App`]
//! hands them out with a shared base configuration and reproducible seeds.
//!
//! # Usage
//!
//! ```
//! use ghostbuster::app::{App, GameConfig};
//!
//! let app = App::for_testing()
//!     .with_config(GameConfig::default().with_grid_size(8))
//!     .with_default_seed(42)
//!     .build();
//! let mut session = app.new_session()?;
//! session.inquire(0, 0);
//! # Ok::<(), ghostbuster::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::GameConfig;
pub use container::{App, AppBuilder};
