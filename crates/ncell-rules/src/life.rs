//! Life-like totalistic rules in B/S notation.

use std::fmt;
use std::str::FromStr;

use ncell_core::{Cell, Neighborhood, NeighborhoodView, Rule, RuleError};

use crate::neighborhoods::MooreNeighborhood;

/// Outer totalistic birth/survival rule over a Moore neighborhood.
///
/// A cell is alive when its state is non-zero. Each step counts the live
/// cells in the inclusive Moore neighborhood, excluding the center (the
/// middle element). A dead cell becomes alive (state 1) if the count is in
/// the birth set; a live cell stays alive if the count is in the survival
/// set; every other cell becomes dead (state 0).
///
/// The rule produces attribute-less cells, so it runs on grids with an
/// attribute count of 0.
///
/// # Examples
///
/// ```
/// use ncell_core::{NeighborhoodView, Rule};
/// use ncell_rules::LifeLikeRule;
///
/// let life = LifeLikeRule::parse("B3/S23").unwrap();
/// assert_eq!(life.name(), "B3/S23");
///
/// // Dead center with three live neighbors is born.
/// let states = [1, 1, 1, 0, 0, 0, 0, 0, 0];
/// let next = life.apply(&NeighborhoodView::new(&states, None, 0)).unwrap();
/// assert_eq!(next.state, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeLikeRule {
    birth: Vec<bool>,
    survival: Vec<bool>,
    neighborhood: MooreNeighborhood,
    name: String,
}

impl LifeLikeRule {
    /// Build a rule from birth and survival counts.
    ///
    /// Returns `Err(RuleError::InvalidParameter)` if a count exceeds the
    /// number of neighbors (`(2r + 1)^D - 1`), and the neighborhood error
    /// for zero dimensions.
    pub fn new(
        birth: impl IntoIterator<Item = usize>,
        survival: impl IntoIterator<Item = usize>,
        dimensions: usize,
        radius: usize,
    ) -> Result<Self, RuleError> {
        let neighborhood = MooreNeighborhood::new(dimensions, radius, true)?;
        let neighbors = neighborhood.mask().selected_count() - 1;
        let birth = count_table(birth, neighbors, "birth")?;
        let survival = count_table(survival, neighbors, "survival")?;
        let name = notation(&birth, &survival);
        Ok(Self {
            birth,
            survival,
            neighborhood,
            name,
        })
    }

    /// Conway's Game of Life: B3/S23 in two dimensions, radius 1.
    pub fn conway() -> Result<Self, RuleError> {
        Self::new([3], [2, 3], 2, 1)
    }

    /// Parse `"B<digits>/S<digits>"` (case-insensitive) as a
    /// two-dimensional, radius-1 rule.
    ///
    /// Returns `Err(RuleError::InvalidParameter)` for malformed notation.
    pub fn parse(notation: &str) -> Result<Self, RuleError> {
        Self::parse_with(notation, 2, 1)
    }

    /// Parse B/S notation for a neighborhood of the given dimensionality
    /// and radius. Counts are single digits.
    pub fn parse_with(notation: &str, dimensions: usize, radius: usize) -> Result<Self, RuleError> {
        let invalid = |why: &str| RuleError::InvalidParameter {
            reason: format!("bad B/S notation {notation:?}: {why}"),
        };
        let (b, s) = notation
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid("missing '/'"))?;
        let birth = strip_prefix_ci(b, 'b').ok_or_else(|| invalid("expected 'B' before the birth counts"))?;
        let survival =
            strip_prefix_ci(s, 's').ok_or_else(|| invalid("expected 'S' before the survival counts"))?;
        let digits = |part: &str| -> Result<Vec<usize>, RuleError> {
            part.chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as usize)
                        .ok_or_else(|| invalid(&format!("{c:?} is not a digit")))
                })
                .collect()
        };
        Self::new(digits(birth)?, digits(survival)?, dimensions, radius)
    }

    /// `true` if a dead cell with `count` live neighbors is born.
    pub fn is_birth(&self, count: usize) -> bool {
        self.birth.get(count).copied().unwrap_or(false)
    }

    /// `true` if a live cell with `count` live neighbors survives.
    pub fn is_survival(&self, count: usize) -> bool {
        self.survival.get(count).copied().unwrap_or(false)
    }
}

impl FromStr for LifeLikeRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LifeLikeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Rule for LifeLikeRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn neighborhood(&self) -> &dyn Neighborhood {
        &self.neighborhood
    }

    fn apply(&self, neighborhood: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
        let states = neighborhood.states();
        if states.len() != self.birth.len() {
            return Err(RuleError::InvalidNeighborhood {
                reason: format!(
                    "expected {} cells, got {}",
                    self.birth.len(),
                    states.len()
                ),
            });
        }
        let center = states.len() / 2;
        let alive = states[center] != 0;
        let count = states
            .iter()
            .enumerate()
            .filter(|&(i, &s)| i != center && s != 0)
            .count();
        let next = if alive {
            self.is_survival(count)
        } else {
            self.is_birth(count)
        };
        Ok(Cell::new(i32::from(next)))
    }
}

/// Lookup table indexed by neighbor count, `neighbors + 1` entries.
fn count_table(
    counts: impl IntoIterator<Item = usize>,
    neighbors: usize,
    which: &str,
) -> Result<Vec<bool>, RuleError> {
    let mut table = vec![false; neighbors + 1];
    for count in counts {
        match table.get_mut(count) {
            Some(slot) => *slot = true,
            None => {
                return Err(RuleError::InvalidParameter {
                    reason: format!("{which} count {count} exceeds {neighbors} neighbors"),
                })
            }
        }
    }
    Ok(table)
}

fn notation(birth: &[bool], survival: &[bool]) -> String {
    let digits = |table: &[bool]| -> String {
        table
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(n, _)| n.to_string())
            .collect()
    };
    format!("B{}/S{}", digits(birth), digits(survival))
}

fn strip_prefix_ci(s: &str, prefix: char) -> Option<&str> {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.eq_ignore_ascii_case(&prefix) => Some(chars.as_str()),
        _ => None,
    }
}
