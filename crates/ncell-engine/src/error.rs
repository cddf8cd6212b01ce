//! Errors raised while stepping an automaton.

use std::error::Error;
use std::fmt;

use ncell_core::{Coord, RuleError};
use ncell_grid::GridError;

/// Errors from [`Automaton::next_step`](crate::Automaton::next_step) and
/// its parallel variant.
///
/// Any error aborts the step. Cells already written during the aborted
/// sweep stay in the write buffer; the read buffer (the previous
/// generation) is intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A grid operation failed (mask extraction or cell update).
    Grid(GridError),
    /// The transition rule failed for one cell.
    RuleFailed {
        /// Name of the failing rule.
        rule: String,
        /// Interior position being updated.
        position: Coord,
        /// The underlying rule error.
        reason: RuleError,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::RuleFailed {
                rule,
                position,
                reason,
            } => {
                write!(
                    f,
                    "rule '{rule}' failed at {:?}: {reason}",
                    position.as_slice()
                )
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::RuleFailed { reason, .. } => Some(reason),
        }
    }
}

impl From<GridError> for StepError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
