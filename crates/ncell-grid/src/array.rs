//! Owned N-dimensional arrays exchanged with a grid, and grid snapshots.
//!
//! These are the bulk boundary of the grid: extraction (`get_states`,
//! `get_attributes`) produces them and bulk assignment
//! (`set_values_from_configuration`) consumes them.

use ncell_core::types::{checked_volume, row_major_strides};
use ncell_core::{Dims, State};

use crate::config::GridConfig;
use crate::error::GridError;

// ── StateArray ─────────────────────────────────────────────────────

/// Row-major array of cell states.
///
/// # Examples
///
/// ```
/// use ncell_grid::StateArray;
///
/// let a = StateArray::new(&[2, 3], vec![0, 1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(a.get(&[1, 0]), Some(3));
/// assert_eq!(a.len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawArray<State>")
)]
pub struct StateArray {
    shape: Dims,
    data: Vec<State>,
}

impl StateArray {
    /// Wrap row-major `data` of the given shape.
    ///
    /// Returns `Err(GridError::ShapeMismatch)` if `data.len()` is not the
    /// shape's volume (reported as a flat length in `actual`).
    pub fn new(shape: &[usize], data: Vec<State>) -> Result<Self, GridError> {
        let volume = volume_of(shape)?;
        if data.len() != volume {
            return Err(GridError::ShapeMismatch {
                expected: Dims::from_slice(&[volume]),
                actual: Dims::from_slice(&[data.len()]),
            });
        }
        Ok(Self {
            shape: Dims::from_slice(shape),
            data,
        })
    }

    /// Wrap data whose length is known to match `shape`.
    pub(crate) fn from_parts(shape: &[usize], data: Vec<State>) -> Self {
        debug_assert_eq!(checked_volume(shape), Some(data.len()));
        Self {
            shape: Dims::from_slice(shape),
            data,
        }
    }

    /// An array of the given shape with every element set to `state`.
    pub fn filled(shape: &[usize], state: State) -> Result<Self, GridError> {
        let volume = volume_of(shape)?;
        Ok(Self {
            shape: Dims::from_slice(shape),
            data: vec![state; volume],
        })
    }

    /// Extent along each axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if some axis has extent 0.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major element slice.
    pub fn as_slice(&self) -> &[State] {
        &self.data
    }

    /// Mutable row-major element slice.
    pub fn as_mut_slice(&mut self) -> &mut [State] {
        &mut self.data
    }

    /// Consume into the row-major element vector.
    pub fn into_vec(self) -> Vec<State> {
        self.data
    }

    /// Element at `coord`, or `None` if out of bounds or of the wrong rank.
    pub fn get(&self, coord: &[usize]) -> Option<State> {
        flat_index(&self.shape, coord).map(|i| self.data[i])
    }

    /// Overwrite the element at `coord`. Returns `false` if out of bounds.
    pub fn set(&mut self, coord: &[usize], state: State) -> bool {
        match flat_index(&self.shape, coord) {
            Some(i) => {
                self.data[i] = state;
                true
            }
            None => false,
        }
    }

    /// Number of elements equal to `state`.
    pub fn count(&self, state: State) -> usize {
        self.data.iter().filter(|&&s| s == state).count()
    }
}

// ── AttributeArray ─────────────────────────────────────────────────

/// Row-major array of cell attributes.
///
/// The shape is the cell shape followed by one trailing axis of length
/// `attribute_count`, so the attribute index varies fastest.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawArray<f64>")
)]
pub struct AttributeArray {
    shape: Dims,
    data: Vec<f64>,
}

impl AttributeArray {
    /// Wrap row-major `data` of the given full shape (cell axes plus the
    /// trailing attribute axis).
    ///
    /// Returns `Err(GridError::InvalidParameter)` for a shape without a
    /// trailing attribute axis and `Err(GridError::ShapeMismatch)` if the
    /// data length is not the shape's volume.
    pub fn new(shape: &[usize], data: Vec<f64>) -> Result<Self, GridError> {
        if shape.is_empty() {
            return Err(GridError::InvalidParameter {
                reason: "attribute array needs a trailing attribute axis".into(),
            });
        }
        let volume = volume_of(shape)?;
        if data.len() != volume {
            return Err(GridError::ShapeMismatch {
                expected: Dims::from_slice(&[volume]),
                actual: Dims::from_slice(&[data.len()]),
            });
        }
        Ok(Self {
            shape: Dims::from_slice(shape),
            data,
        })
    }

    pub(crate) fn from_parts(shape: &[usize], data: Vec<f64>) -> Self {
        debug_assert_eq!(checked_volume(shape), Some(data.len()));
        Self {
            shape: Dims::from_slice(shape),
            data,
        }
    }

    /// An array over `cell_shape` with every cell carrying `values`.
    pub fn filled(cell_shape: &[usize], values: &[f64]) -> Result<Self, GridError> {
        let mut shape = Dims::from_slice(cell_shape);
        shape.push(values.len());
        let cells = volume_of(cell_shape)?;
        let mut data = Vec::with_capacity(cells.saturating_mul(values.len()));
        for _ in 0..cells {
            data.extend_from_slice(values);
        }
        Self::new(&shape, data)
    }

    /// Full shape including the trailing attribute axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Shape of the cell axes (the full shape without the attribute axis).
    pub fn cell_shape(&self) -> &[usize] {
        &self.shape[..self.shape.len() - 1]
    }

    /// Length of the trailing attribute axis.
    pub fn attribute_count(&self) -> usize {
        self.shape[self.shape.len() - 1]
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if there are no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major value slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume into the row-major value vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Attribute values of the cell at `coord`.
    pub fn cell(&self, coord: &[usize]) -> Option<&[f64]> {
        let k = self.attribute_count();
        let i = flat_index(self.cell_shape(), coord)?;
        self.data.get(i * k..(i + 1) * k)
    }

    /// Arithmetic mean of attribute `index` over all cells.
    ///
    /// Returns `None` if `index` is out of range, `Some(0.0)` if there are
    /// no cells.
    pub fn mean(&self, index: usize) -> Option<f64> {
        let k = self.attribute_count();
        if index >= k {
            return None;
        }
        let cells = self.data.len() / k;
        if cells == 0 {
            return Some(0.0);
        }
        let sum: f64 = self.data.iter().skip(index).step_by(k).sum();
        Some(sum / cells as f64)
    }
}

// ── GridSnapshot ───────────────────────────────────────────────────

/// A self-contained copy of one buffer's interior plus the grid shape.
///
/// Enough to rebuild an equivalent grid with
/// [`GridStore::from_snapshot`](crate::GridStore::from_snapshot).
/// Border contents are not captured.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    /// Shape of the grid the snapshot was taken from.
    pub config: GridConfig,
    /// Interior states, shaped like `config.interior_dimensions`.
    pub states: StateArray,
    /// Interior attributes, `None` iff `config.attribute_count == 0`.
    pub attributes: Option<AttributeArray>,
}

// ── Deserialization ────────────────────────────────────────────────

/// Unchecked wire form; decoding routes it through the validating
/// constructors so a decoded array always holds `volume(shape)` elements.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawArray<T> {
    shape: Dims,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawArray<State>> for StateArray {
    type Error = GridError;

    fn try_from(raw: RawArray<State>) -> Result<Self, GridError> {
        Self::new(&raw.shape, raw.data)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawArray<f64>> for AttributeArray {
    type Error = GridError;

    fn try_from(raw: RawArray<f64>) -> Result<Self, GridError> {
        Self::new(&raw.shape, raw.data)
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn volume_of(shape: &[usize]) -> Result<usize, GridError> {
    checked_volume(shape).ok_or_else(|| GridError::InvalidParameter {
        reason: format!("shape {shape:?} overflows usize"),
    })
}

fn flat_index(shape: &[usize], coord: &[usize]) -> Option<usize> {
    if coord.len() != shape.len() {
        return None;
    }
    let strides = row_major_strides(shape);
    let mut index = 0;
    for ((&c, &extent), &stride) in coord.iter().zip(shape).zip(&strides) {
        if c >= extent {
            return None;
        }
        index += c * stride;
    }
    Some(index)
}
