//! Reusable rule test fixtures.
//!
//! Four standard rules for automaton testing:
//!
//! - [`IdentityRule`] copies the cell being updated.
//! - [`ConstRule`] writes a constant cell.
//! - [`SumRule`] sums the neighborhood states modulo `k` and averages
//!   attributes, over an arbitrary mask.
//! - [`FailingRule`] fails deterministically after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use ncell_core::{Attributes, Cell, Mask, Neighborhood, NeighborhoodView, Offset, Rule, RuleError, State};

/// Neighborhood with an explicit mask and offset.
#[derive(Clone, Debug)]
pub struct FixedNeighborhood {
    pub mask: Mask,
    pub offset: Offset,
}

impl FixedNeighborhood {
    pub fn new(mask: Mask, offset: &[isize]) -> Self {
        Self {
            mask,
            offset: Offset::from_slice(offset),
        }
    }

    /// Single-cell mask at offset zero: the neighborhood is the cell itself.
    pub fn point(ndim: usize) -> Self {
        let mask = Mask::full(&vec![1; ndim]).expect("point mask needs ndim >= 1");
        Self::new(mask, &vec![0; ndim])
    }

    /// Full hypercube of side `2r + 1` centered on the cell.
    pub fn cube(ndim: usize, radius: usize) -> Self {
        let mask = Mask::full(&vec![2 * radius + 1; ndim]).expect("cube mask needs ndim >= 1");
        Self::new(mask, &vec![-(radius as isize); ndim])
    }
}

impl Neighborhood for FixedNeighborhood {
    fn mask(&self) -> Mask {
        self.mask.clone()
    }

    fn offset(&self) -> Offset {
        self.offset.clone()
    }
}

fn first_cell(n: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
    let state = *n.states().first().ok_or_else(|| RuleError::InvalidNeighborhood {
        reason: "empty neighborhood".into(),
    })?;
    Ok(Cell {
        state,
        attributes: n.attributes_of(0).map(Attributes::from_slice),
    })
}

/// Copies the cell itself (point neighborhood).
///
/// Useful for testing the double-buffer discipline: every step must leave
/// the grid unchanged.
pub struct IdentityRule {
    pub neighborhood: FixedNeighborhood,
}

impl IdentityRule {
    pub fn new(ndim: usize) -> Self {
        Self {
            neighborhood: FixedNeighborhood::point(ndim),
        }
    }
}

impl Rule for IdentityRule {
    fn name(&self) -> &str {
        "identity"
    }

    fn neighborhood(&self) -> &dyn Neighborhood {
        &self.neighborhood
    }

    fn apply(&self, n: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
        first_cell(n)
    }
}

/// Writes the same cell everywhere (point neighborhood, input ignored).
pub struct ConstRule {
    pub neighborhood: FixedNeighborhood,
    pub cell: Cell,
}

impl ConstRule {
    pub fn new(ndim: usize, cell: Cell) -> Self {
        Self {
            neighborhood: FixedNeighborhood::point(ndim),
            cell,
        }
    }
}

impl Rule for ConstRule {
    fn name(&self) -> &str {
        "const"
    }

    fn neighborhood(&self) -> &dyn Neighborhood {
        &self.neighborhood
    }

    fn apply(&self, _n: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
        Ok(self.cell.clone())
    }
}

/// Sum of the neighborhood states modulo `modulus`; attributes become the
/// per-index mean over the neighborhood.
///
/// Sensitive to every input cell, so any read of the wrong buffer shows up
/// in the result.
pub struct SumRule {
    pub neighborhood: FixedNeighborhood,
    pub modulus: State,
}

impl SumRule {
    pub fn new(neighborhood: FixedNeighborhood, modulus: State) -> Self {
        Self {
            neighborhood,
            modulus,
        }
    }
}

impl Rule for SumRule {
    fn name(&self) -> &str {
        "sum"
    }

    fn neighborhood(&self) -> &dyn Neighborhood {
        &self.neighborhood
    }

    fn apply(&self, n: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
        if self.modulus <= 0 {
            return Err(RuleError::InvalidParameter {
                reason: format!("modulus must be positive, got {}", self.modulus),
            });
        }
        let sum = n
            .states()
            .iter()
            .fold(0 as State, |acc, &s| (acc + s.rem_euclid(self.modulus)) % self.modulus);
        let attributes = n.attributes().map(|_| {
            let k = n.attribute_count();
            let count = n.len().max(1) as f64;
            (0..k)
                .map(|a| {
                    (0..n.len())
                        .filter_map(|i| n.attributes_of(i).map(|v| v[a]))
                        .sum::<f64>()
                        / count
                })
                .collect::<Attributes>()
        });
        Ok(Cell {
            state: sum,
            attributes,
        })
    }
}

/// Copies the cell itself, then fails deterministically once
/// `succeed_count` calls have succeeded.
///
/// Uses `AtomicUsize` for the call counter so it satisfies `Sync`.
pub struct FailingRule {
    pub neighborhood: FixedNeighborhood,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingRule {
    /// Create a rule that succeeds `succeed_count` times then fails.
    pub fn new(ndim: usize, succeed_count: usize) -> Self {
        Self {
            neighborhood: FixedNeighborhood::point(ndim),
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `apply()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Rule for FailingRule {
    fn name(&self) -> &str {
        "failing"
    }

    fn neighborhood(&self) -> &dyn Neighborhood {
        &self.neighborhood
    }

    fn apply(&self, n: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
        let calls = self.call_count.fetch_add(1, Ordering::Relaxed);
        if calls >= self.succeed_count {
            return Err(RuleError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        first_cell(n)
    }
}
