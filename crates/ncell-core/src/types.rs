//! Vector type aliases shared across the workspace.

use smallvec::SmallVec;

/// The value a cell holds. States are small integers (`0` = dead in
/// life-like automata, `0..k` for k-state Wolfram automata).
pub type State = i32;

/// Per-axis sizes (interior extent, border widths, mask shape).
///
/// Uses `SmallVec<[usize; 4]>` to avoid heap allocation for grids of up
/// to four dimensions. Higher-dimensional grids spill to the heap.
pub type Dims = SmallVec<[usize; 4]>;

/// A position in a grid's full (border-inclusive) index space.
///
/// Grid positions are never negative: the border absorbs every offset a
/// neighborhood can produce.
pub type Coord = SmallVec<[usize; 4]>;

/// Signed per-axis displacement from a cell to the origin of its
/// neighborhood mask.
pub type Offset = SmallVec<[isize; 4]>;

/// Real-valued attributes carried by a single cell.
pub type Attributes = SmallVec<[f64; 4]>;

/// Product of all extents in `dims`.
///
/// The product over zero axes is 1 (a zero-dimensional grid holds one
/// cell). Returns `None` on overflow.
pub fn checked_volume(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Row-major strides for `dims`: the last axis is contiguous.
pub fn row_major_strides(dims: &[usize]) -> Dims {
    let mut strides: Dims = smallvec::smallvec![1; dims.len()];
    for i in (0..dims.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}
