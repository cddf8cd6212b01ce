//! Grid-specific error types.

use std::error::Error;
use std::fmt;

use ncell_core::Dims;

/// Errors that can occur during grid construction or grid operations.
///
/// No operation that returns a `GridError` has modified either buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A position, mask, cell or configuration is malformed for this grid
    /// (wrong dimensionality, attribute presence or count disagreement,
    /// inconsistent dimension vectors).
    InvalidParameter {
        /// What went wrong.
        reason: String,
    },
    /// A position or box falls outside the addressable range.
    OutOfRange {
        /// The offending position.
        position: Vec<usize>,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A bulk array's shape disagrees with the grid.
    ShapeMismatch {
        /// Shape the grid requires.
        expected: Dims,
        /// Shape that was supplied.
        actual: Dims,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { reason } => write!(f, "invalid parameter: {reason}"),
            Self::OutOfRange { position, bounds } => {
                write!(f, "position {position:?} out of range: {bounds}")
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "shape mismatch: expected {:?}, got {:?}",
                    expected.as_slice(),
                    actual.as_slice()
                )
            }
        }
    }
}

impl Error for GridError {}
