//! Error types for the analysis core.

use thiserror::Error;

/// Errors surfaced by the intersection and topology stages.
///
/// The core is deterministic and side-effect-free; every failure is a pure
/// function of invalid input and is reported immediately, never swallowed.
/// Parallel or collinear segments are a defined no-intersection outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A segment carries a NaN or infinite coordinate.
    #[error("segment {index} has a non-finite coordinate")]
    NonFiniteSegment {
        /// Position of the offending segment in the input sequence.
        index: usize,
    },

    /// The clustering radius is negative or not a finite number.
    #[error("clustering radius must be finite and non-negative, got {radius}")]
    InvalidRadius {
        /// The rejected radius value.
        radius: f64,
    },
}
