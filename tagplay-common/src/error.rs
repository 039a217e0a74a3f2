//! Common error types for tagplay

use thiserror::Error;

/// Common result type for tagplay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the tagplay crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tag reader hardware failure (fatal; the dispatch loop terminates)
    #[error("Tag reader error: {0}")]
    Reader(String),
}
