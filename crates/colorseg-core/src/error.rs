//! Error types for colorseg-core
//!
//! Provides a unified error type for the pixel container, the packed
//! color helpers and the geometry types. Each variant captures enough
//! context for diagnostics without exposing internal layout details.

use thiserror::Error;

/// colorseg-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid samples per pixel
    #[error("invalid samples per pixel: {0}")]
    InvalidSpp(u32),

    /// Unsupported pixel depth for this operation
    #[error("unsupported pixel depth: {0} bpp")]
    UnsupportedDepth(u32),

    /// Index out of bounds
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Raw pixel data does not match the declared dimensions
    #[error("data length mismatch: expected {expected} pixels, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Color string could not be parsed
    #[error("invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),
}

/// Result type alias for colorseg-core operations
pub type Result<T> = std::result::Result<T, Error>;
