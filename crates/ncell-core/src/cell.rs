//! The [`Cell`] value type.

use crate::types::{Attributes, State};

/// The value held by one grid cell: a state plus optional attributes.
///
/// `attributes` is `None` exactly when the owning grid was built with
/// zero attributes per cell. Grids with attributes always carry a
/// vector of the configured length.
///
/// # Examples
///
/// ```
/// use ncell_core::Cell;
///
/// let alive = Cell::new(1);
/// assert_eq!(alive.state, 1);
/// assert!(alive.attributes.is_none());
///
/// let warm = Cell::with_attributes(0, [21.5, 0.3]);
/// assert_eq!(warm.attribute_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Integer state.
    pub state: State,
    /// Attribute vector, or `None` for attribute-less grids.
    pub attributes: Option<Attributes>,
}

impl Cell {
    /// A cell with the given state and no attributes.
    pub fn new(state: State) -> Self {
        Self {
            state,
            attributes: None,
        }
    }

    /// A cell with the given state and attribute values.
    pub fn with_attributes(state: State, attributes: impl IntoIterator<Item = f64>) -> Self {
        Self {
            state,
            attributes: Some(attributes.into_iter().collect()),
        }
    }

    /// Number of attributes carried (0 when `attributes` is `None`).
    pub fn attribute_count(&self) -> usize {
        self.attributes.as_ref().map_or(0, |a| a.len())
    }

    /// Attribute values as a slice (empty when `attributes` is `None`).
    pub fn attribute_slice(&self) -> &[f64] {
        self.attributes.as_deref().unwrap_or(&[])
    }
}

impl From<State> for Cell {
    fn from(state: State) -> Self {
        Self::new(state)
    }
}
