//! Grid content fixtures.

use ncell_core::State;
use ncell_grid::StateArray;

/// Live cells of a south-east glider, relative to its bounding box.
///
/// ```text
/// . # .
/// . . #
/// # # #
/// ```
///
/// Under B3/S23 it reappears translated by `(1, 1)` every four generations.
pub const GLIDER: [(usize, usize); 5] = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

/// Set the glider's live cells to `1` with its bounding box at `origin`.
///
/// Panics if the array is not two-dimensional or the glider does not fit.
pub fn place_glider(states: &mut StateArray, origin: (usize, usize)) {
    assert_eq!(states.shape().len(), 2, "glider needs a 2-D array");
    for (r, c) in GLIDER {
        let placed = states.set(&[origin.0 + r, origin.1 + c], 1);
        assert!(placed, "glider at {origin:?} leaves the array");
    }
}

/// A dead `rows x cols` array holding one glider at `origin`.
pub fn glider_states(rows: usize, cols: usize, origin: (usize, usize)) -> StateArray {
    let mut states = StateArray::filled(&[rows, cols], 0).expect("valid shape");
    place_glider(&mut states, origin);
    states
}

/// The glider's 3x3 bounding box alone, for stamping into a region.
pub fn glider_pattern() -> StateArray {
    glider_states(3, 3, (0, 0))
}

/// One-dimensional array `[0, 1, ..., len - 1]`.
pub fn numbered_line(len: usize) -> StateArray {
    let data = (0..len as State).collect();
    StateArray::new(&[len], data).expect("length matches shape")
}
