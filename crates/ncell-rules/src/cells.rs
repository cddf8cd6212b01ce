//! Reference cell descriptors.

use indexmap::IndexMap;

use ncell_core::{Attributes, CellInformation, RuleError, State};

// ── StandardCell ───────────────────────────────────────────────────

/// General-purpose descriptor: an ordered set of states, optionally
/// named, a default state, and named attributes with default values.
///
/// # Examples
///
/// ```
/// use ncell_core::CellInformation;
/// use ncell_rules::StandardCell;
///
/// let cell = StandardCell::from_range(0, 6, 2, 0)
///     .unwrap()
///     .with_state_names([(0, "empty"), (4, "full")])
///     .unwrap()
///     .with_attribute("temperature", 20.0);
/// assert_eq!(cell.states(), vec![0, 2, 4]);
/// assert_eq!(cell.state_name(4).as_deref(), Some("full"));
/// assert_eq!(cell.state_name(2), None);
/// assert_eq!(cell.attribute_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StandardCell {
    states: IndexMap<State, Option<String>>,
    default_state: State,
    attributes: IndexMap<String, f64>,
}

impl StandardCell {
    /// Descriptor over the given states, in order.
    ///
    /// Returns `Err(RuleError::InvalidParameter)` if `states` is empty,
    /// contains duplicates, or does not contain `default_state`.
    pub fn new(states: impl IntoIterator<Item = State>, default_state: State) -> Result<Self, RuleError> {
        let mut map = IndexMap::new();
        for state in states {
            if map.insert(state, None).is_some() {
                return Err(RuleError::InvalidParameter {
                    reason: format!("state {state} declared twice"),
                });
            }
        }
        if map.is_empty() {
            return Err(RuleError::InvalidParameter {
                reason: "a cell needs at least one state".into(),
            });
        }
        if !map.contains_key(&default_state) {
            return Err(RuleError::InvalidParameter {
                reason: format!("default state {default_state} is not a declared state"),
            });
        }
        Ok(Self {
            states: map,
            default_state,
            attributes: IndexMap::new(),
        })
    }

    /// Descriptor over `start, start + step, ...` below `end`.
    ///
    /// Returns `Err(RuleError::InvalidParameter)` if `step` is not
    /// positive, the range is empty, or `default_state` is not in it.
    pub fn from_range(start: State, end: State, step: State, default_state: State) -> Result<Self, RuleError> {
        let step = usize::try_from(step)
            .ok()
            .filter(|&s| s > 0)
            .ok_or_else(|| RuleError::InvalidParameter {
                reason: format!("state step must be positive, got {step}"),
            })?;
        Self::new((start..end).step_by(step), default_state)
    }

    /// Name some of the declared states.
    ///
    /// Returns `Err(RuleError::StateOutOfRange)` for an undeclared state.
    pub fn with_state_names<'a>(
        mut self,
        names: impl IntoIterator<Item = (State, &'a str)>,
    ) -> Result<Self, RuleError> {
        for (state, name) in names {
            if !self.states.contains_key(&state) {
                return Err(RuleError::StateOutOfRange {
                    state,
                    valid: format!("{:?}", self.states.keys().collect::<Vec<_>>()),
                });
            }
            self.states.insert(state, Some(name.to_owned()));
        }
        Ok(self)
    }

    /// Append a named attribute with its default value. Re-adding a name
    /// replaces its default in place.
    pub fn with_attribute(mut self, name: impl Into<String>, default: f64) -> Self {
        self.attributes.insert(name.into(), default);
        self
    }
}

impl CellInformation for StandardCell {
    fn states(&self) -> Vec<State> {
        self.states.keys().copied().collect()
    }

    fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    fn default_state(&self) -> State {
        self.default_state
    }

    fn default_attributes(&self) -> Option<Attributes> {
        if self.attributes.is_empty() {
            None
        } else {
            Some(self.attributes.values().copied().collect())
        }
    }

    fn state_name(&self, state: State) -> Option<String> {
        self.states.get(&state).cloned().flatten()
    }

    fn attribute_name(&self, index: usize) -> Option<String> {
        self.attributes.get_index(index).map(|(name, _)| name.clone())
    }
}

// ── LifeLikeCell ───────────────────────────────────────────────────

/// Two-state descriptor for life-like automata: `0` is "dead", `1` is
/// "alive", no attributes, default dead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeLikeCell;

impl CellInformation for LifeLikeCell {
    fn states(&self) -> Vec<State> {
        vec![0, 1]
    }

    fn attribute_count(&self) -> usize {
        0
    }

    fn default_state(&self) -> State {
        0
    }

    fn default_attributes(&self) -> Option<Attributes> {
        None
    }

    fn state_name(&self, state: State) -> Option<String> {
        match state {
            0 => Some("dead".into()),
            1 => Some("alive".into()),
            _ => None,
        }
    }

    fn attribute_name(&self, _index: usize) -> Option<String> {
        None
    }
}

// ── WolframCell ────────────────────────────────────────────────────

/// Descriptor for k-state Wolfram automata: states `0..k` named by their
/// value, no attributes, default `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WolframCell {
    states: u32,
}

impl WolframCell {
    /// Descriptor with `states` states.
    ///
    /// Returns `Err(RuleError::InvalidParameter)` if `states < 2` or the
    /// largest state does not fit a [`State`].
    pub fn new(states: u32) -> Result<Self, RuleError> {
        if states < 2 || State::try_from(states).is_err() {
            return Err(RuleError::InvalidParameter {
                reason: format!("state count must be in 2..={}, got {states}", State::MAX),
            });
        }
        Ok(Self { states })
    }

    /// Number of states `k`.
    pub fn state_count(&self) -> u32 {
        self.states
    }
}

impl CellInformation for WolframCell {
    fn states(&self) -> Vec<State> {
        // `new` checked that the count fits State.
        (0..self.states as State).collect()
    }

    fn attribute_count(&self) -> usize {
        0
    }

    fn default_state(&self) -> State {
        0
    }

    fn default_attributes(&self) -> Option<Attributes> {
        None
    }

    fn state_name(&self, state: State) -> Option<String> {
        u32::try_from(state)
            .ok()
            .filter(|&s| s < self.states)
            .map(|s| s.to_string())
    }

    fn attribute_name(&self, _index: usize) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_cell_validation() {
        assert!(StandardCell::new([], 0).is_err());
        assert!(StandardCell::new([0, 1, 0], 0).is_err());
        assert!(StandardCell::new([0, 1], 2).is_err());
        assert!(StandardCell::from_range(0, 4, 0, 0).is_err());
        assert!(StandardCell::from_range(0, 4, -1, 0).is_err());
        assert!(StandardCell::new([0, 1], 0)
            .unwrap()
            .with_state_names([(3, "nope")])
            .is_err());
    }

    #[test]
    fn standard_cell_preserves_declaration_order() {
        let cell = StandardCell::new([5, 1, 3], 3).unwrap();
        assert_eq!(cell.states(), vec![5, 1, 3]);
        assert_eq!(cell.default_cell().state, 3);
    }

    #[test]
    fn standard_cell_attributes() {
        let cell = StandardCell::new([0, 1], 0)
            .unwrap()
            .with_attribute("speed", 1.5)
            .with_attribute("mass", 2.0)
            .with_attribute("speed", 3.0);
        assert_eq!(cell.attribute_count(), 2);
        assert_eq!(cell.attribute_name(0).as_deref(), Some("speed"));
        assert_eq!(cell.attribute_name(1).as_deref(), Some("mass"));
        assert_eq!(cell.attribute_name(2), None);
        assert_eq!(
            cell.default_attributes().map(|a| a.to_vec()),
            Some(vec![3.0, 2.0])
        );
    }

    #[test]
    fn life_like_cell() {
        let cell = LifeLikeCell;
        assert_eq!(cell.states(), vec![0, 1]);
        assert_eq!(cell.state_name(1).as_deref(), Some("alive"));
        assert_eq!(cell.state_name(2), None);
        assert!(cell.default_attributes().is_none());
    }

    #[test]
    fn wolfram_cell() {
        let cell = WolframCell::new(3).unwrap();
        assert_eq!(cell.states(), vec![0, 1, 2]);
        assert_eq!(cell.state_name(2).as_deref(), Some("2"));
        assert_eq!(cell.state_name(3), None);
        assert!(WolframCell::new(1).is_err());
    }
}
