//! Error types for caltile.

use thiserror::Error;

/// Errors that can occur in caltile operations.
#[derive(Error, Debug)]
pub enum CalTileError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for caltile operations.
pub type CalTileResult<T> = Result<T, CalTileError>;
