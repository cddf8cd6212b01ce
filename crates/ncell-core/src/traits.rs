//! Collaborator traits: [`CellInformation`], [`Neighborhood`] and [`Rule`].
//!
//! The engine is generic over these. Concrete variants live in
//! `ncell-rules`; mocks live in `ncell-test-utils`.

use crate::cell::Cell;
use crate::error::RuleError;
use crate::mask::Mask;
use crate::neighborhood::NeighborhoodView;
use crate::types::{Attributes, Offset, State};

/// Describes the cell taxonomy of an automaton.
///
/// Consulted for defaults, reporting (density ordering, names) and
/// configuration round-tripping. Never consulted inside the update sweep.
pub trait CellInformation: Send + Sync {
    /// Every state a cell may hold, in reporting order.
    fn states(&self) -> Vec<State>;

    /// Attributes per cell (0 means attribute-less).
    fn attribute_count(&self) -> usize;

    /// State of a freshly reset cell.
    fn default_state(&self) -> State;

    /// Attributes of a freshly reset cell. `None` iff
    /// [`attribute_count`](Self::attribute_count) is 0.
    fn default_attributes(&self) -> Option<Attributes>;

    /// Display name of a state, if it has one.
    fn state_name(&self, state: State) -> Option<String>;

    /// Display name of the attribute at `index`, if it has one.
    fn attribute_name(&self, index: usize) -> Option<String>;

    /// The default cell: default state plus default attributes.
    fn default_cell(&self) -> Cell {
        Cell {
            state: self.default_state(),
            attributes: self.default_attributes(),
        }
    }
}

/// A neighborhood shape: a boolean mask and the offset from a cell to
/// the mask's origin.
///
/// For a cell at `p` the mask origin is `p + offset()`. A Moore
/// neighborhood of radius 1 in 2-D has a 3x3 mask and offset `[-1, -1]`.
pub trait Neighborhood: Send + Sync {
    /// The selection kernel.
    fn mask(&self) -> Mask;

    /// Per-axis displacement from the cell to the mask origin.
    fn offset(&self) -> Offset;
}

/// A cellular automaton transition rule.
///
/// # Contract
///
/// - `apply()` MUST be a pure function of its input. The sequential and
///   parallel sweeps rely on this to produce identical results.
/// - `neighborhood()` is queried once when an automaton is built and is
///   fixed for that automaton's lifetime.
/// - `apply()` returns a cell whose attribute presence and length match
///   the grid's attribute count; the grid rejects anything else.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores the rule as
/// `Box<dyn Rule>`.
///
/// # Examples
///
/// ```
/// use ncell_core::{Cell, Mask, Neighborhood, NeighborhoodView, Offset, Rule, RuleError};
///
/// struct Pair;
///
/// impl Neighborhood for Pair {
///     fn mask(&self) -> Mask { Mask::full(&[2]).unwrap() }
///     fn offset(&self) -> Offset { Offset::from_slice(&[0]) }
/// }
///
/// struct Sum(Pair);
///
/// impl Rule for Sum {
///     fn name(&self) -> &str { "sum" }
///     fn neighborhood(&self) -> &dyn Neighborhood { &self.0 }
///     fn apply(&self, n: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
///         Ok(Cell::new(n.states().iter().sum()))
///     }
/// }
///
/// let states = [2, 3];
/// let rule = Sum(Pair);
/// let next = rule.apply(&NeighborhoodView::new(&states, None, 0)).unwrap();
/// assert_eq!(next.state, 5);
/// ```
pub trait Rule: Send + Sync {
    /// Human-readable name for error reporting and logging.
    fn name(&self) -> &str;

    /// The neighborhood this rule reads.
    fn neighborhood(&self) -> &dyn Neighborhood;

    /// Compute the next value of one cell from its extracted neighborhood.
    fn apply(&self, neighborhood: &NeighborhoodView<'_>) -> Result<Cell, RuleError>;
}
