//! Error types for Prismari

use thiserror::Error;

/// Main error type for Prismari operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid band dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in band of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Band shape mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    ShapeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Prismari operations
pub type Result<T> = std::result::Result<T, Error>;
