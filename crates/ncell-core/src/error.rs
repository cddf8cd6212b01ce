//! Errors raised by rules and neighborhood construction.

use std::error::Error;
use std::fmt;

use crate::types::State;

/// Errors from rule construction, neighborhood construction, or a
/// rule's transition function.
///
/// Returned by [`Rule::apply`](crate::Rule::apply) and wrapped by the
/// engine into its step error together with the failing position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// A neighborhood or mask definition is malformed (empty mask,
    /// shape/cell-count disagreement, zero dimensions, ...).
    InvalidNeighborhood {
        /// What went wrong.
        reason: String,
    },
    /// A rule parameter is outside its valid domain.
    InvalidParameter {
        /// What went wrong.
        reason: String,
    },
    /// The neighborhood handed to the rule contains a state the rule
    /// does not understand.
    StateOutOfRange {
        /// The offending state.
        state: State,
        /// Human-readable description of the accepted range.
        valid: String,
    },
    /// The transition function failed for another reason.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNeighborhood { reason } => write!(f, "invalid neighborhood: {reason}"),
            Self::InvalidParameter { reason } => write!(f, "invalid rule parameter: {reason}"),
            Self::StateOutOfRange { state, valid } => {
                write!(f, "state {state} out of range (expected {valid})")
            }
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for RuleError {}
