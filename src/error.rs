//! Error types for trellis-viz operations.

use thiserror::Error;

use crate::grammar::Aesthetic;
use crate::scale::ScaleCategory;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a layered plot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A scale was attached to an aesthetic slot it cannot drive.
    #[error("Invalid scale for aesthetic '{aesthetic}': expected {expected} scale, got {found}")]
    InvalidAestheticKind {
        /// Slot the scale was assigned to.
        aesthetic: Aesthetic,
        /// Category the slot requires.
        expected: ScaleCategory,
        /// Category of the supplied scale.
        found: ScaleCategory,
    },

    /// An aesthetic key outside the fixed slot set.
    #[error("Unknown aesthetic '{0}'")]
    UnknownAesthetic(String),

    /// The shape palette ran out of symbols.
    #[error("Too many distinct values in column '{column}' for a shape scale (palette holds {palette_size})")]
    Overflow {
        /// Column mapped to shape.
        column: String,
        /// Number of symbols available.
        palette_size: usize,
    },

    /// Scale domain error (e.g., normalizing a text column).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Malformed layer sequence or trellis specification.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Column length does not match the frame's row count.
    #[error("Data length mismatch: column '{column}' has {actual} elements, frame has {expected} rows")]
    DataLengthMismatch {
        /// Column being added.
        column: String,
        /// Row count of the frame.
        expected: usize,
        /// Length of the rejected column.
        actual: usize,
    },

    /// Row index past the end of a frame.
    #[error("Row {row} out of bounds for frame with {nrow} rows")]
    RowOutOfBounds {
        /// Requested row.
        row: usize,
        /// Rows in the frame.
        nrow: usize,
    },
}
