//! Error types for the cimbar codec pipeline.

use thiserror::Error;

/// Errors surfaced across the encode/decode pipeline.
///
/// Most recoverable conditions (a bad Reed-Solomon block, a fountain slot
/// eviction, a duplicate block, a malformed chunk) are handled internally
/// via sentinel return values and never reach the caller as an `Err` - see
/// the module docs for `ecc` and `fountain`.
#[derive(Debug, Error)]
pub enum CimbarError {
    /// An extracted frame was handed to the decoder before being rectified,
    /// or at the wrong dimensions to have come from [`crate::extractor`].
    #[error("frame has not been rectified")]
    NotRectified,

    /// The anchor scanner could not locate three or four corner anchors.
    #[error("could not locate anchor fiducials in image")]
    AnchorsNotFound,

    /// Wraps an underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wraps an underlying image decode/encode failure.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CimbarError>;
