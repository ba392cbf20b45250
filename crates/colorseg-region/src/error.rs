//! Error types for colorseg-region

use thiserror::Error;

/// Errors that can occur during segmentation
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] colorseg_core::Error),

    /// The pixel buffer has no pixels
    #[error("invalid input: {width}x{height} buffer")]
    InvalidInput { width: u32, height: u32 },

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
