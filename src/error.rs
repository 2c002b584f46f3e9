//! Error types for the ghostbuster crate

use thiserror::Error;

use crate::engine::Mode;

/// Main error type for the ghostbuster crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position ({row}, {col}) is out of bounds for a {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) has already been inquired")]
    AlreadyInquired { row: usize, col: usize },

    #[error("cannot {operation} while the game is in {mode} mode")]
    WrongMode { operation: &'static str, mode: Mode },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid signal table: {message}")]
    InvalidSignalTable { message: String },

    #[error("invalid signal scheme '{input}'. Expected one of: {expected}")]
    ParseSignalScheme { input: String, expected: String },

    #[error("invalid update mode '{input}'. Expected one of: {expected}")]
    ParseUpdateMode { input: String, expected: String },

    #[error("invalid seeker '{input}'. Expected one of: {expected}")]
    ParseSeeker { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
