//! Unified error type for the swatch-core public API.

use thiserror::Error;

use crate::color::ParseColorError;

/// Errors surfaced by the sampling engine.
///
/// Empty selections, empty aggregates and degenerate zoom factors are not
/// errors: they are absorbed as a no-op, black, and a clamp respectively.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    /// The image cannot be sampled (no pixels, inconsistent buffer)
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Index-based removal past the end of a collection
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
