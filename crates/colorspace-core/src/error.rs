//! Error types for colorspace-core

use crate::icc::IccError;
use thiserror::Error;

/// Result type for colorspace-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building color spaces or decoding profiles
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// ICC profile or tag could not be decoded
    #[error("ICC error: {0}")]
    Icc(#[from] IccError),

    /// Color space definition is not usable
    #[error("Invalid color space: {0}")]
    InvalidColorSpace(String),

    /// A matrix that must be inverted is singular
    #[error("Singular matrix: {0}")]
    SingularMatrix(&'static str),

    /// Component slice has the wrong length for the color space
    #[error("Component count mismatch: expected {expected}, got {actual}")]
    ComponentCount { expected: usize, actual: usize },
}
