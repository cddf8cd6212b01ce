//! Shape bookkeeping shared by the store and its buffer views.

use ncell_core::types::{checked_volume, row_major_strides};
use ncell_core::{Cell, Dims, State};

use crate::config::GridConfig;
use crate::error::GridError;
use crate::positions::InteriorPositions;

/// Validated grid shape with precomputed full extents and strides.
#[derive(Clone, Debug)]
pub(crate) struct Layout {
    pub(crate) config: GridConfig,
    pub(crate) full: Dims,
    pub(crate) strides: Dims,
    pub(crate) volume: usize,
}

impl Layout {
    pub(crate) fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let full = config.full_dimensions();
        let strides = row_major_strides(&full);
        let volume = checked_volume(&full).ok_or_else(|| GridError::InvalidParameter {
            reason: format!("grid {:?} overflows usize", full.as_slice()),
        })?;
        Ok(Self {
            config,
            full,
            strides,
            volume,
        })
    }

    pub(crate) fn ndim(&self) -> usize {
        self.full.len()
    }

    pub(crate) fn attribute_count(&self) -> usize {
        self.config.attribute_count
    }

    pub(crate) fn check_rank(&self, what: &str, rank: usize) -> Result<(), GridError> {
        if rank != self.ndim() {
            return Err(GridError::InvalidParameter {
                reason: format!("{what} has {rank} dimensions, grid has {}", self.ndim()),
            });
        }
        Ok(())
    }

    /// Flat index of a full-grid position, bounds-checked.
    pub(crate) fn flat_index(&self, position: &[usize]) -> Result<usize, GridError> {
        self.check_rank("position", position.len())?;
        let mut index = 0;
        for ((&p, &extent), &stride) in position.iter().zip(&self.full).zip(&self.strides) {
            if p >= extent {
                return Err(GridError::OutOfRange {
                    position: position.to_vec(),
                    bounds: format!("full dimensions {:?}", self.full.as_slice()),
                });
            }
            index += p * stride;
        }
        Ok(index)
    }

    /// Flat index of a position already known to be in bounds.
    pub(crate) fn flat_unchecked(&self, position: &[usize]) -> usize {
        position.iter().zip(&self.strides).map(|(&p, &s)| p * s).sum()
    }

    pub(crate) fn is_interior(&self, position: &[usize]) -> bool {
        position.len() == self.ndim()
            && position
                .iter()
                .zip(&self.config.interior_dimensions)
                .zip(&self.config.border_widths)
                .all(|((&p, &d), &b)| p >= b && p - b < d)
    }

    pub(crate) fn check_interior(&self, position: &[usize]) -> Result<(), GridError> {
        if !self.is_interior(position) {
            return Err(GridError::OutOfRange {
                position: position.to_vec(),
                bounds: format!(
                    "interior {:?} behind border {:?}",
                    self.config.interior_dimensions.as_slice(),
                    self.config.border_widths.as_slice()
                ),
            });
        }
        Ok(())
    }

    /// Check that a box of `extent` at `origin` lies within the full grid.
    pub(crate) fn check_box(&self, origin: &[usize], extent: &[usize]) -> Result<(), GridError> {
        self.check_rank("position", origin.len())?;
        self.check_rank("box", extent.len())?;
        for ((&o, &e), &full) in origin.iter().zip(extent).zip(&self.full) {
            match o.checked_add(e) {
                Some(end) if end <= full => {}
                _ => {
                    return Err(GridError::OutOfRange {
                        position: origin.to_vec(),
                        bounds: format!(
                            "box of extent {extent:?} exceeds full dimensions {:?}",
                            self.full.as_slice()
                        ),
                    })
                }
            }
        }
        Ok(())
    }

    /// Check attribute presence and length against the grid.
    pub(crate) fn check_cell(&self, cell: &Cell) -> Result<(), GridError> {
        let k = self.attribute_count();
        match (&cell.attributes, k) {
            (None, 0) => Ok(()),
            (Some(a), k) if k > 0 && a.len() == k => Ok(()),
            (None, k) => Err(GridError::InvalidParameter {
                reason: format!("cell has no attributes, grid expects {k}"),
            }),
            (Some(a), 0) => Err(GridError::InvalidParameter {
                reason: format!("cell has {} attributes, grid has none", a.len()),
            }),
            (Some(a), k) => Err(GridError::InvalidParameter {
                reason: format!("cell has {} attributes, grid expects {k}", a.len()),
            }),
        }
    }

    pub(crate) fn interior_positions(&self) -> InteriorPositions {
        InteriorPositions::new(&self.config.interior_dimensions, &self.config.border_widths)
    }

    pub(crate) fn interior_volume(&self) -> usize {
        self.interior_positions().len()
    }
}

/// Store `cell` at flat index `flat`. The cell must already have passed
/// [`Layout::check_cell`].
pub(crate) fn write_cell(
    states: &mut [State],
    attributes: Option<&mut [f64]>,
    attribute_count: usize,
    flat: usize,
    cell: &Cell,
) {
    states[flat] = cell.state;
    if let (Some(dst), Some(src)) = (attributes, cell.attributes.as_deref()) {
        let start = flat * attribute_count;
        dst[start..start + attribute_count].copy_from_slice(src);
    }
}
