//! Test utilities and mock types for ncell development.
//!
//! Provides mock implementations of the collaborator traits
//! ([`CellInformation`](ncell_core::CellInformation),
//! [`Neighborhood`](ncell_core::Neighborhood), [`Rule`](ncell_core::Rule))
//! and grid fixtures for engine tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod rules;

use ncell_core::{Attributes, CellInformation, State};

pub use fixtures::{glider_pattern, glider_states, numbered_line, place_glider};
pub use rules::{ConstRule, FailingRule, FixedNeighborhood, IdentityRule, SumRule};

/// Descriptor with a configurable state list and `attribute_count`
/// attributes named `attr0`, `attr1`, ...
///
/// The default state is the first declared state; default attributes are
/// all `0.0`.
#[derive(Clone, Debug)]
pub struct MockCellInformation {
    pub states: Vec<State>,
    pub attribute_count: usize,
}

impl MockCellInformation {
    pub fn new(states: Vec<State>, attribute_count: usize) -> Self {
        Self {
            states,
            attribute_count,
        }
    }

    /// Two states (0 and 1), no attributes.
    pub fn binary() -> Self {
        Self::new(vec![0, 1], 0)
    }
}

impl CellInformation for MockCellInformation {
    fn states(&self) -> Vec<State> {
        self.states.clone()
    }

    fn attribute_count(&self) -> usize {
        self.attribute_count
    }

    fn default_state(&self) -> State {
        self.states.first().copied().unwrap_or(0)
    }

    fn default_attributes(&self) -> Option<Attributes> {
        (self.attribute_count > 0).then(|| Attributes::from_elem(0.0, self.attribute_count))
    }

    fn state_name(&self, state: State) -> Option<String> {
        self.states
            .contains(&state)
            .then(|| format!("state{state}"))
    }

    fn attribute_name(&self, index: usize) -> Option<String> {
        (index < self.attribute_count).then(|| format!("attr{index}"))
    }
}
