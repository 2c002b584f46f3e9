//! Ports (trait boundaries) between the engine and the code that drives or
//! watches it.
//!
//! Automated seekers implement [`Seeker`]; simulation consumers implement
//! [`Observer`]. Concrete strategies live in [`crate::adapters`] and
//! concrete observers in [`crate::simulation::observers`].

pub mod observer;
pub mod seeker;

pub use observer::Observer;
pub use seeker::Seeker;
