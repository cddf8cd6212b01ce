//! Reproducible random initial configurations.
//!
//! Every generator takes an explicit `u64` seed and draws from
//! `ChaCha8Rng`, so the same seed yields the same array on every platform.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use ncell_core::types::checked_volume;
use ncell_core::State;
use ncell_grid::{GridError, StateArray};

fn volume_of(shape: &[usize]) -> Result<usize, GridError> {
    checked_volume(shape).ok_or_else(|| GridError::InvalidParameter {
        reason: format!("shape {shape:?} overflows usize"),
    })
}

/// An array of `shape` whose cells are drawn uniformly from `states`.
///
/// Returns `Err(GridError::InvalidParameter)` if `states` is empty and the
/// shape has at least one cell.
///
/// # Examples
///
/// ```
/// use ncell_engine::seed::random_states;
///
/// let a = random_states(&[8, 8], &[0, 1, 2], 7).unwrap();
/// let b = random_states(&[8, 8], &[0, 1, 2], 7).unwrap();
/// assert_eq!(a, b);
/// assert!(a.as_slice().iter().all(|s| (0..3).contains(s)));
/// ```
pub fn random_states(shape: &[usize], states: &[State], seed: u64) -> Result<StateArray, GridError> {
    let volume = volume_of(shape)?;
    if states.is_empty() && volume > 0 {
        return Err(GridError::InvalidParameter {
            reason: "cannot draw from an empty state list".into(),
        });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = (0..volume)
        .map(|_| states[rng.random_range(0..states.len())])
        .collect();
    StateArray::new(shape, data)
}

/// An array of `shape` where each cell is `alive` with probability
/// `density` and `dead` otherwise.
///
/// Returns `Err(GridError::InvalidParameter)` unless `density` is in
/// `[0.0, 1.0]`.
pub fn bernoulli_states(
    shape: &[usize],
    dead: State,
    alive: State,
    density: f64,
    seed: u64,
) -> Result<StateArray, GridError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(GridError::InvalidParameter {
            reason: format!("density must be in [0.0, 1.0], got {density}"),
        });
    }
    let volume = volume_of(shape)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = (0..volume)
        .map(|_| {
            if rng.random::<f64>() < density {
                alive
            } else {
                dead
            }
        })
        .collect();
    StateArray::new(shape, data)
}
