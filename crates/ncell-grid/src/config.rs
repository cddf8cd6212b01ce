//! Grid shape configuration.

use ncell_core::types::checked_volume;
use ncell_core::Dims;

use crate::error::GridError;

/// Shape parameters for a [`GridStore`](crate::GridStore).
///
/// Validated at construction; the shape is immutable afterwards.
///
/// # Examples
///
/// ```
/// use ncell_grid::GridConfig;
///
/// let config = GridConfig::new(&[40, 40], &[1, 1], 0);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.full_dimensions().as_slice(), &[42, 42]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Extent of the updatable region along each axis.
    ///
    /// An axis of extent 0 is allowed and yields an empty interior.
    pub interior_dimensions: Dims,

    /// Border (halo) width on each side of each axis.
    ///
    /// Must be at least the reach of the neighborhood the grid will be
    /// used with; the automaton checks this when it is built.
    pub border_widths: Dims,

    /// Real-valued attributes per cell. 0 disables attribute storage.
    pub attribute_count: usize,
}

impl GridConfig {
    /// Create a config from interior extents, border widths and an
    /// attribute count.
    pub fn new(interior_dimensions: &[usize], border_widths: &[usize], attribute_count: usize) -> Self {
        Self {
            interior_dimensions: Dims::from_slice(interior_dimensions),
            border_widths: Dims::from_slice(border_widths),
            attribute_count,
        }
    }

    /// A config with the same border width on every axis.
    pub fn uniform_border(interior_dimensions: &[usize], border: usize, attribute_count: usize) -> Self {
        Self {
            interior_dimensions: Dims::from_slice(interior_dimensions),
            border_widths: smallvec::smallvec![border; interior_dimensions.len()],
            attribute_count,
        }
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.interior_dimensions.len()
    }

    /// `interior + 2 * border` per axis.
    ///
    /// Saturates on overflow; [`validate`](Self::validate) rejects such
    /// configs before any storage is sized from them.
    pub fn full_dimensions(&self) -> Dims {
        self.interior_dimensions
            .iter()
            .zip(&self.border_widths)
            .map(|(&d, &b)| d.saturating_add(b.saturating_mul(2)))
            .collect()
    }

    /// Check structural invariants.
    ///
    /// Returns `Err(GridError::InvalidParameter)` if the dimension vectors
    /// disagree in length or if the full grid (times the attribute count)
    /// does not fit in memory indexing.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.interior_dimensions.len() != self.border_widths.len() {
            return Err(GridError::InvalidParameter {
                reason: format!(
                    "interior has {} dimensions but border widths have {}",
                    self.interior_dimensions.len(),
                    self.border_widths.len()
                ),
            });
        }
        let mut full = Dims::with_capacity(self.ndim());
        for (&d, &b) in self.interior_dimensions.iter().zip(&self.border_widths) {
            let extent = b
                .checked_mul(2)
                .and_then(|twice| twice.checked_add(d))
                .ok_or_else(|| GridError::InvalidParameter {
                    reason: format!("axis extent {d} with border {b} overflows usize"),
                })?;
            full.push(extent);
        }
        checked_volume(&full)
            .and_then(|cells| cells.checked_mul(self.attribute_count.max(1)))
            .ok_or_else(|| GridError::InvalidParameter {
                reason: format!(
                    "grid {:?} with {} attributes per cell is too large",
                    full.as_slice(),
                    self.attribute_count
                ),
            })?;
        Ok(())
    }
}
