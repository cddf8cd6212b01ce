//! Configuration snapshots: everything needed to restore an automaton's
//! cell contents, independent of any encoding.

use indexmap::IndexMap;

use ncell_core::{Attributes, CellInformation, State};
use ncell_grid::GridSnapshot;

// ── CellMetadata ───────────────────────────────────────────────────

/// Owned copy of a cell descriptor's metadata.
///
/// Captured by [`Automaton::save_configuration`](crate::Automaton::save_configuration)
/// and itself a [`CellInformation`], so a saved configuration can rebuild
/// an automaton without the original descriptor type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMetadata {
    /// Declared states in order, with their names if any.
    pub states: IndexMap<State, Option<String>>,
    /// State of a freshly reset cell.
    pub default_state: State,
    /// Attribute names by index (`None` for unnamed attributes).
    pub attribute_names: Vec<Option<String>>,
    /// Attribute values of a freshly reset cell, `None` iff there are no
    /// attributes.
    pub default_attributes: Option<Attributes>,
}

impl CellMetadata {
    /// Copy the metadata out of any descriptor.
    pub fn from_information(info: &dyn CellInformation) -> Self {
        Self {
            states: info
                .states()
                .into_iter()
                .map(|s| (s, info.state_name(s)))
                .collect(),
            default_state: info.default_state(),
            attribute_names: (0..info.attribute_count())
                .map(|i| info.attribute_name(i))
                .collect(),
            default_attributes: info.default_attributes(),
        }
    }
}

impl CellInformation for CellMetadata {
    fn states(&self) -> Vec<State> {
        self.states.keys().copied().collect()
    }

    fn attribute_count(&self) -> usize {
        self.attribute_names.len()
    }

    fn default_state(&self) -> State {
        self.default_state
    }

    fn default_attributes(&self) -> Option<Attributes> {
        self.default_attributes.clone()
    }

    fn state_name(&self, state: State) -> Option<String> {
        self.states.get(&state).cloned().flatten()
    }

    fn attribute_name(&self, index: usize) -> Option<String> {
        self.attribute_names.get(index).cloned().flatten()
    }
}

// ── Configuration ──────────────────────────────────────────────────

/// A saved automaton configuration: name, cell metadata and one buffer's
/// interior contents.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// Automaton name at save time.
    pub name: Option<String>,
    /// Descriptor metadata at save time.
    pub cells: CellMetadata,
    /// Grid shape and interior contents.
    pub grid: GridSnapshot,
}

impl Configuration {
    /// Interior extents of the saved grid.
    pub fn interior_dimensions(&self) -> &[usize] {
        &self.grid.config.interior_dimensions
    }

    /// Fraction of interior cells in `state`, `0.0` for an empty interior.
    pub fn density_of_state(&self, state: State) -> f64 {
        let states = &self.grid.states;
        if states.is_empty() {
            0.0
        } else {
            states.count(state) as f64 / states.len() as f64
        }
    }
}
