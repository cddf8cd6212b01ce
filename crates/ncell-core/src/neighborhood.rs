//! Extracted neighborhood buffers handed to transition rules.
//!
//! The grid store fills a [`Neighbors`] buffer from its read buffer; the
//! automaton lends it to the rule as a [`NeighborhoodView`]. States are
//! flattened in the mask's row-major order; attributes follow the same
//! cell order with `attribute_count` values per cell.

use crate::types::State;

/// Owned, reusable neighborhood buffer.
///
/// Reusing one `Neighbors` across every cell of a step keeps the update
/// sweep allocation-free after the first cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Neighbors {
    /// Selected neighbor states, mask order.
    pub states: Vec<State>,
    /// Selected neighbor attributes (cell-major), or `None` for
    /// attribute-less grids.
    pub attributes: Option<Vec<f64>>,
    /// Attributes per cell (0 when `attributes` is `None`).
    pub attribute_count: usize,
}

impl Neighbors {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `cells` neighbors of `attribute_count`
    /// attributes each.
    pub fn with_capacity(cells: usize, attribute_count: usize) -> Self {
        Self {
            states: Vec::with_capacity(cells),
            attributes: (attribute_count > 0)
                .then(|| Vec::with_capacity(cells * attribute_count)),
            attribute_count,
        }
    }

    /// Clear contents and set the attribute layout for the next fill.
    pub fn reset(&mut self, attribute_count: usize) {
        self.states.clear();
        self.attribute_count = attribute_count;
        if attribute_count == 0 {
            self.attributes = None;
        } else {
            self.attributes.get_or_insert_with(Vec::new).clear();
        }
    }

    /// Borrow as a read-only view for a rule.
    pub fn view(&self) -> NeighborhoodView<'_> {
        NeighborhoodView {
            states: &self.states,
            attributes: self.attributes.as_deref(),
            attribute_count: self.attribute_count,
        }
    }
}

/// Read-only view of one cell's neighborhood.
///
/// # Examples
///
/// ```
/// use ncell_core::NeighborhoodView;
///
/// let states = [0, 1, 1];
/// let attrs = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
/// let view = NeighborhoodView::new(&states, Some(&attrs), 2);
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.attributes_of(1), Some(&[1.5, 2.0][..]));
/// assert_eq!(view.center_state(), Some(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborhoodView<'a> {
    states: &'a [State],
    attributes: Option<&'a [f64]>,
    attribute_count: usize,
}

impl<'a> NeighborhoodView<'a> {
    /// Construct a view over borrowed buffers.
    ///
    /// Mostly useful for exercising rules directly in tests; the engine
    /// obtains views from [`Neighbors::view`].
    pub fn new(states: &'a [State], attributes: Option<&'a [f64]>, attribute_count: usize) -> Self {
        Self {
            states,
            attributes,
            attribute_count: if attributes.is_some() { attribute_count } else { 0 },
        }
    }

    /// Selected neighbor states in mask order.
    pub fn states(&self) -> &'a [State] {
        self.states
    }

    /// All neighbor attributes, cell-major, or `None` for attribute-less
    /// grids.
    pub fn attributes(&self) -> Option<&'a [f64]> {
        self.attributes
    }

    /// Attributes per neighbor cell.
    pub fn attribute_count(&self) -> usize {
        self.attribute_count
    }

    /// Number of neighbor cells.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// `true` if the mask selected no cells.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Attribute values of the `i`-th neighbor.
    pub fn attributes_of(&self, i: usize) -> Option<&'a [f64]> {
        let attrs = self.attributes?;
        let start = i.checked_mul(self.attribute_count)?;
        attrs.get(start..start + self.attribute_count)
    }

    /// State at the middle of the neighborhood.
    ///
    /// For symmetric inclusive neighborhoods (odd extent on every axis,
    /// center selected) this is the cell being updated.
    pub fn center_state(&self) -> Option<State> {
        self.states.get(self.states.len() / 2).copied()
    }
}
