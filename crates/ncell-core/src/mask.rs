//! Boolean N-dimensional neighborhood kernels.

use crate::error::RuleError;
use crate::types::{checked_volume, row_major_strides, Coord, Dims};

/// A boolean kernel laid over the grid to select a cell's neighbors.
///
/// `cells` is stored row-major over `shape` (last axis fastest), the
/// same order in which the grid store flattens the extracted block.
/// A `true` entry means the cell at that relative position influences
/// the transition.
///
/// # Examples
///
/// ```
/// use ncell_core::Mask;
///
/// // 3x3 Moore mask without the center.
/// let mask = Mask::from_fn(&[3, 3], |c| c != [1, 1]).unwrap();
/// assert_eq!(mask.ndim(), 2);
/// assert_eq!(mask.len(), 9);
/// assert_eq!(mask.selected_count(), 8);
/// assert!(!mask.get(&[1, 1]).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mask {
    shape: Dims,
    cells: Vec<bool>,
    selected: usize,
}

impl Mask {
    /// Build a mask from a shape and row-major cell flags.
    ///
    /// Returns `Err(RuleError::InvalidNeighborhood)` if the shape has
    /// zero dimensions, any extent is zero, or `cells.len()` does not
    /// equal the shape's volume.
    pub fn new(shape: &[usize], cells: Vec<bool>) -> Result<Self, RuleError> {
        if shape.is_empty() {
            return Err(RuleError::InvalidNeighborhood {
                reason: "mask must have at least one dimension".into(),
            });
        }
        if shape.contains(&0) {
            return Err(RuleError::InvalidNeighborhood {
                reason: format!("mask shape {shape:?} has a zero extent"),
            });
        }
        let volume = checked_volume(shape).ok_or_else(|| RuleError::InvalidNeighborhood {
            reason: format!("mask shape {shape:?} overflows usize"),
        })?;
        if cells.len() != volume {
            return Err(RuleError::InvalidNeighborhood {
                reason: format!(
                    "mask shape {shape:?} needs {volume} cells, got {}",
                    cells.len()
                ),
            });
        }
        let selected = cells.iter().filter(|&&c| c).count();
        Ok(Self {
            shape: Dims::from_slice(shape),
            cells,
            selected,
        })
    }

    /// Build a mask by evaluating `f` at every relative coordinate of
    /// `shape`, in row-major order.
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> bool) -> Result<Self, RuleError> {
        let volume = checked_volume(shape).ok_or_else(|| RuleError::InvalidNeighborhood {
            reason: format!("mask shape {shape:?} overflows usize"),
        })?;
        let mut cells = Vec::with_capacity(volume);
        let mut coord: Coord = smallvec::smallvec![0; shape.len()];
        if !shape.is_empty() && !shape.contains(&0) {
            loop {
                cells.push(f(&coord));
                if !advance(&mut coord, shape) {
                    break;
                }
            }
        }
        Self::new(shape, cells)
    }

    /// A mask of the given shape with every cell selected.
    pub fn full(shape: &[usize]) -> Result<Self, RuleError> {
        Self::from_fn(shape, |_| true)
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Extent along each axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of kernel cells (selected or not).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects zero extents.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of selected (`true`) cells. Every neighborhood this mask
    /// extracts has this length.
    pub fn selected_count(&self) -> usize {
        self.selected
    }

    /// Row-major cell flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Flag at a relative coordinate, or `None` if out of bounds.
    pub fn get(&self, coord: &[usize]) -> Option<bool> {
        if coord.len() != self.shape.len() {
            return None;
        }
        let strides = row_major_strides(&self.shape);
        let mut index = 0;
        for ((&c, &extent), &stride) in coord.iter().zip(&self.shape).zip(&strides) {
            if c >= extent {
                return None;
            }
            index += c * stride;
        }
        Some(self.cells[index])
    }

    /// Relative coordinates of the selected cells, row-major.
    pub fn selected_coords(&self) -> Vec<Coord> {
        let mut out = Vec::with_capacity(self.selected);
        let mut coord: Coord = smallvec::smallvec![0; self.shape.len()];
        for &flag in &self.cells {
            if flag {
                out.push(coord.clone());
            }
            advance(&mut coord, &self.shape);
        }
        out
    }
}

/// Row-major odometer increment. Returns `false` after the last coordinate.
fn advance(coord: &mut [usize], shape: &[usize]) -> bool {
    for axis in (0..shape.len()).rev() {
        coord[axis] += 1;
        if coord[axis] < shape[axis] {
            return true;
        }
        coord[axis] = 0;
    }
    false
}
