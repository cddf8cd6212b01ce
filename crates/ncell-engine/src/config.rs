//! Automaton configuration, validation, and error types.
//!
//! [`AutomatonConfig`] is the builder input for
//! [`Automaton::from_config`](crate::Automaton::from_config).
//! [`validate()`](AutomatonConfig::validate) checks that the descriptor,
//! the rule's neighborhood and the grid shape agree before any buffer is
//! allocated.

use std::error::Error;
use std::fmt;

use ncell_core::{CellInformation, Mask, Offset, Rule, RuleError};
use ncell_grid::{GridConfig, GridError};

// ── StepMode ───────────────────────────────────────────────────────

/// How [`Automaton::run`](crate::Automaton::run) sweeps the interior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepMode {
    /// One thread, positions in row-major order.
    #[default]
    Sequential,
    /// Axis-0 slabs swept concurrently on a rayon pool.
    Parallel {
        /// Size of a dedicated pool. `None` uses the global rayon pool.
        threads: Option<usize>,
    },
}

impl StepMode {
    /// Whether this mode sweeps on rayon.
    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Parallel { .. })
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating or building an automaton.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Grid configuration is invalid.
    Grid(GridError),
    /// The rule's neighborhood could not be built.
    Neighborhood(RuleError),
    /// Mask dimensionality differs from the grid's.
    MaskRank {
        /// Dimensions of the mask.
        mask: usize,
        /// Dimensions of the grid.
        grid: usize,
    },
    /// Offset length differs from the grid's dimensionality.
    OffsetRank {
        /// Length of the offset vector.
        offset: usize,
        /// Dimensions of the grid.
        grid: usize,
    },
    /// The mask reaches past the border on some axis.
    BorderTooNarrow {
        /// Axis on which the mask overhangs.
        axis: usize,
        /// Configured border width on that axis.
        border: usize,
        /// Width the mask needs on that axis.
        required: usize,
    },
    /// Descriptor and grid disagree on the number of attributes.
    AttributeCountMismatch {
        /// Attributes declared by the descriptor.
        descriptor: usize,
        /// Attributes allocated by the grid.
        grid: usize,
    },
    /// The cell descriptor is inconsistent.
    InvalidDescriptor {
        /// Description of the inconsistency.
        reason: String,
    },
    /// The step mode cannot be honored.
    InvalidStepMode {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Neighborhood(e) => write!(f, "neighborhood: {e}"),
            Self::MaskRank { mask, grid } => {
                write!(f, "mask has {mask} dimensions, grid has {grid}")
            }
            Self::OffsetRank { offset, grid } => {
                write!(f, "offset has {offset} components, grid has {grid} dimensions")
            }
            Self::BorderTooNarrow {
                axis,
                border,
                required,
            } => write!(
                f,
                "border width {border} on axis {axis} is narrower than the mask reach {required}"
            ),
            Self::AttributeCountMismatch { descriptor, grid } => write!(
                f,
                "descriptor declares {descriptor} attributes, grid holds {grid}"
            ),
            Self::InvalidDescriptor { reason } => write!(f, "invalid cell descriptor: {reason}"),
            Self::InvalidStepMode { reason } => write!(f, "invalid step mode: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Neighborhood(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<RuleError> for ConfigError {
    fn from(e: RuleError) -> Self {
        Self::Neighborhood(e)
    }
}

// ── AutomatonConfig ────────────────────────────────────────────────

/// Complete configuration for constructing an automaton.
///
/// Passed to [`Automaton::from_config`](crate::Automaton::from_config).
/// `validate()` checks all structural invariants without allocating the
/// grid.
pub struct AutomatonConfig {
    /// Cell taxonomy: states, names, defaults.
    pub cell_information: Box<dyn CellInformation>,
    /// Transition rule, including its neighborhood.
    pub rule: Box<dyn Rule>,
    /// Grid shape.
    pub grid: GridConfig,
    /// Optional display name.
    pub name: Option<String>,
    /// Sweep strategy used by `run`. Default: sequential.
    pub step_mode: StepMode,
}

impl AutomatonConfig {
    /// Configuration with a sequential step mode and no name.
    pub fn new(
        cell_information: Box<dyn CellInformation>,
        rule: Box<dyn Rule>,
        grid: GridConfig,
    ) -> Self {
        Self {
            cell_information,
            rule,
            grid,
            name: None,
            step_mode: StepMode::Sequential,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let neighborhood = self.rule.neighborhood();
        validate_parts(
            &*self.cell_information,
            &neighborhood.mask(),
            &neighborhood.offset(),
            &self.grid,
        )?;
        validate_step_mode(self.step_mode)
    }
}

impl fmt::Debug for AutomatonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutomatonConfig")
            .field("rule", &self.rule.name())
            .field("states", &self.cell_information.states())
            .field("grid", &self.grid)
            .field("name", &self.name)
            .field("step_mode", &self.step_mode)
            .finish()
    }
}

// ── validation ─────────────────────────────────────────────────────

/// Check that descriptor, mask, offset and grid fit together.
///
/// Order: grid shape, descriptor consistency, attribute count, mask rank,
/// offset rank, border reach.
pub(crate) fn validate_parts(
    cell_information: &dyn CellInformation,
    mask: &Mask,
    offset: &Offset,
    grid: &GridConfig,
) -> Result<(), ConfigError> {
    grid.validate()?;
    validate_descriptor(cell_information)?;

    let declared = cell_information.attribute_count();
    if declared != grid.attribute_count {
        return Err(ConfigError::AttributeCountMismatch {
            descriptor: declared,
            grid: grid.attribute_count,
        });
    }

    let ndim = grid.ndim();
    if mask.ndim() != ndim {
        return Err(ConfigError::MaskRank {
            mask: mask.ndim(),
            grid: ndim,
        });
    }
    if offset.len() != ndim {
        return Err(ConfigError::OffsetRank {
            offset: offset.len(),
            grid: ndim,
        });
    }

    // The mask box of interior cell p spans
    // [p + offset, p + offset + shape - 1]; it stays inside the full grid
    // iff -offset <= border and offset + shape - 1 <= border.
    for axis in 0..ndim {
        let border = grid.border_widths[axis];
        let low = offset[axis];
        let high = low.saturating_add_unsigned(mask.shape()[axis] - 1);
        let required = low.min(0).unsigned_abs().max(high.max(0).unsigned_abs());
        if required > border {
            return Err(ConfigError::BorderTooNarrow {
                axis,
                border,
                required,
            });
        }
    }
    Ok(())
}

fn validate_descriptor(cell_information: &dyn CellInformation) -> Result<(), ConfigError> {
    let states = cell_information.states();
    if states.is_empty() {
        return Err(ConfigError::InvalidDescriptor {
            reason: "no states declared".into(),
        });
    }
    let default = cell_information.default_state();
    if !states.contains(&default) {
        return Err(ConfigError::InvalidDescriptor {
            reason: format!("default state {default} is not a declared state"),
        });
    }
    let k = cell_information.attribute_count();
    match (cell_information.default_attributes(), k) {
        (None, 0) => Ok(()),
        (Some(a), k) if k > 0 && a.len() == k => Ok(()),
        (Some(_), 0) => Err(ConfigError::InvalidDescriptor {
            reason: "no attributes declared but a default attribute list given".into(),
        }),
        (None, k) => Err(ConfigError::InvalidDescriptor {
            reason: format!("{k} attributes declared but no default values given"),
        }),
        (Some(a), k) => Err(ConfigError::InvalidDescriptor {
            reason: format!("{k} attributes declared but {} default values given", a.len()),
        }),
    }
}

pub(crate) fn validate_step_mode(mode: StepMode) -> Result<(), ConfigError> {
    if let StepMode::Parallel { threads: Some(0) } = mode {
        return Err(ConfigError::InvalidStepMode {
            reason: "a dedicated pool needs at least one thread".into(),
        });
    }
    Ok(())
}
