//! Elementary and k-state one-dimensional rules in Wolfram code.

use ncell_core::{Cell, Neighborhood, NeighborhoodView, Rule, RuleError, State};

use crate::line::LineNeighborhood;

/// One-dimensional rule identified by its Wolfram code.
///
/// The neighborhood is the `2 * radius + 1` cells centered on the cell.
/// Reading the neighborhood states left to right as a base-`k` number
/// (leftmost digit most significant) gives an index `i`; the new state is
/// digit `i` of `rule_number` written in base `k`, counting from the least
/// significant digit.
///
/// # Examples
///
/// ```
/// use ncell_core::{NeighborhoodView, Rule};
/// use ncell_rules::WolframCodeRule;
///
/// let rule30 = WolframCodeRule::new(30, 2, 1).unwrap();
/// assert_eq!(rule30.max_rule_number(), Some(255));
///
/// let states = [1, 0, 0];
/// let next = rule30.apply(&NeighborhoodView::new(&states, None, 0)).unwrap();
/// assert_eq!(next.state, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WolframCodeRule {
    rule_number: u128,
    states: u32,
    radius: usize,
    width: usize,
    table_len: usize,
    neighborhood: LineNeighborhood,
    name: String,
}

impl WolframCodeRule {
    /// Build a rule with `states` cell states and the given neighborhood
    /// radius.
    ///
    /// Returns `Err(RuleError::InvalidParameter)` if `states < 2`, if the
    /// largest state `states - 1` does not fit [`State`], if the
    /// number of neighborhood configurations (`states^(2r + 1)`) does not
    /// fit in `usize`, or if `rule_number` exceeds
    /// [`max_rule_number`](Self::max_rule_number).
    pub fn new(rule_number: u128, states: u32, radius: usize) -> Result<Self, RuleError> {
        if states < 2 {
            return Err(RuleError::InvalidParameter {
                reason: format!("a Wolfram rule needs at least 2 states, got {states}"),
            });
        }
        if State::try_from(states - 1).is_err() {
            return Err(RuleError::InvalidParameter {
                reason: format!("{states} states exceed the state range"),
            });
        }
        let neighborhood = LineNeighborhood::both_sides(radius, radius, true)?;
        let width = neighborhood.mask().len();
        let table_len = u32::try_from(width)
            .ok()
            .and_then(|w| (states as usize).checked_pow(w))
            .ok_or_else(|| RuleError::InvalidParameter {
                reason: format!("{states}^{width} neighborhood configurations overflow usize"),
            })?;
        let rule = Self {
            rule_number,
            states,
            radius,
            width,
            table_len,
            neighborhood,
            name: format!("wolfram {rule_number} (k={states}, r={radius})"),
        };
        if let Some(max) = rule.max_rule_number() {
            if rule_number > max {
                return Err(RuleError::InvalidParameter {
                    reason: format!("rule number {rule_number} exceeds maximum {max}"),
                });
            }
        }
        Ok(rule)
    }

    /// The rule's Wolfram code.
    pub fn rule_number(&self) -> u128 {
        self.rule_number
    }

    /// Number of cell states `k`.
    pub fn states(&self) -> u32 {
        self.states
    }

    /// Neighborhood radius.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Number of distinct neighborhood configurations, `k^(2r + 1)`.
    pub fn table_len(&self) -> usize {
        self.table_len
    }

    /// Largest valid rule number, `k^(k^(2r + 1)) - 1`, or `None` when it
    /// exceeds `u128` (every `u128` is then a valid rule number).
    pub fn max_rule_number(&self) -> Option<u128> {
        let exp = u32::try_from(self.table_len).ok()?;
        u128::from(self.states).checked_pow(exp).map(|n| n - 1)
    }

    /// Digits of `number` in base `k`, most significant first, left-padded
    /// with zeros to [`table_len`](Self::table_len) digits.
    ///
    /// Numbers needing more digits are returned in full.
    pub fn base_representation(&self, number: u128) -> Vec<State> {
        let k = u128::from(self.states);
        let mut digits = Vec::with_capacity(self.table_len);
        let mut rest = number;
        while rest > 0 {
            // Digit < k, and `k - 1` fits State (checked in `new`).
            digits.push((rest % k) as State);
            rest /= k;
        }
        if digits.len() < self.table_len {
            digits.resize(self.table_len, 0);
        }
        digits.reverse();
        digits
    }

    /// Interpret `digits` (most significant first) as a base-`k` number.
    ///
    /// Returns `Err(RuleError::StateOutOfRange)` for a digit outside
    /// `0..k` and `Err(RuleError::InvalidParameter)` on overflow.
    pub fn base_representation_to_int(&self, digits: &[State]) -> Result<u128, RuleError> {
        let k = u128::from(self.states);
        digits.iter().try_fold(0u128, |acc, &d| {
            let digit = self.check_state(d)?;
            acc.checked_mul(k)
                .and_then(|n| n.checked_add(digit))
                .ok_or_else(|| RuleError::InvalidParameter {
                    reason: format!("{} base-{k} digits overflow u128", digits.len()),
                })
        })
    }

    fn check_state(&self, state: State) -> Result<u128, RuleError> {
        u128::try_from(state)
            .ok()
            .filter(|&s| s < u128::from(self.states))
            .ok_or_else(|| RuleError::StateOutOfRange {
                state,
                valid: format!("0..{}", self.states),
            })
    }

    /// Digit `index` (least significant first) of the rule number.
    fn digit(&self, index: u128) -> State {
        let k = u128::from(self.states);
        let place = u32::try_from(index).ok().and_then(|i| k.checked_pow(i));
        match place {
            // Below `k`, and `k - 1` fits State (checked in `new`).
            Some(p) => ((self.rule_number / p) % k) as State,
            None => 0,
        }
    }
}

impl Rule for WolframCodeRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn neighborhood(&self) -> &dyn Neighborhood {
        &self.neighborhood
    }

    fn apply(&self, neighborhood: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
        let states = neighborhood.states();
        if states.len() != self.width {
            return Err(RuleError::InvalidNeighborhood {
                reason: format!("expected {} cells, got {}", self.width, states.len()),
            });
        }
        let index = self.base_representation_to_int(states)?;
        Ok(Cell::new(self.digit(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(rule: &WolframCodeRule, states: &[State]) -> State {
        rule.apply(&NeighborhoodView::new(states, None, 0)).unwrap().state
    }

    #[test]
    fn neighborhood_is_centered_line() {
        let rule = WolframCodeRule::new(0, 2, 1).unwrap();
        let mask = rule.neighborhood().mask();
        assert_eq!(mask.as_slice(), &[true, true, true]);
        assert_eq!(rule.neighborhood().offset().as_slice(), &[-1]);
    }

    #[test]
    fn max_rule_numbers() {
        assert_eq!(WolframCodeRule::new(0, 2, 1).unwrap().max_rule_number(), Some(255));
        assert_eq!(
            WolframCodeRule::new(0, 3, 1).unwrap().max_rule_number(),
            Some(7_625_597_484_986)
        );
        // 2^(2^7) overflows u128.
        assert_eq!(WolframCodeRule::new(0, 2, 3).unwrap().max_rule_number(), None);
    }

    #[test]
    fn base_representation_pads_to_table_length() {
        let ternary = WolframCodeRule::new(0, 3, 1).unwrap();
        let mut expected = vec![0; 22];
        expected.extend([1, 1, 1, 2, 0]);
        assert_eq!(ternary.base_representation(123), expected);

        let binary = WolframCodeRule::new(0, 2, 1).unwrap();
        assert_eq!(binary.base_representation(123), vec![0, 1, 1, 1, 1, 0, 1, 1]);
    }

    #[test]
    fn base_representation_to_int_cases() {
        let binary = WolframCodeRule::new(0, 2, 1).unwrap();
        assert_eq!(binary.base_representation_to_int(&[1, 0, 1]).unwrap(), 5);
        let quinary = WolframCodeRule::new(0, 5, 1).unwrap();
        assert_eq!(quinary.base_representation_to_int(&[1, 1, 1]).unwrap(), 31);
        let quaternary = WolframCodeRule::new(0, 4, 2).unwrap();
        assert_eq!(quaternary.base_representation_to_int(&[0, 0, 1, 1, 0]).unwrap(), 20);
    }

    #[test]
    fn rule_30_truth_table() {
        let rule = WolframCodeRule::new(30, 2, 1).unwrap();
        let table = [
            ([1, 1, 1], 0),
            ([1, 1, 0], 0),
            ([1, 0, 1], 0),
            ([1, 0, 0], 1),
            ([0, 1, 1], 1),
            ([0, 1, 0], 1),
            ([0, 0, 1], 1),
            ([0, 0, 0], 0),
        ];
        for (states, expected) in table {
            assert_eq!(step(&rule, &states), expected, "neighborhood {states:?}");
        }
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(WolframCodeRule::new(256, 2, 1).is_err());
        assert!(WolframCodeRule::new(0, 1, 1).is_err());
        assert!(WolframCodeRule::new(255, 2, 1).is_ok());
    }

    #[test]
    fn state_count_must_fit_state_range() {
        let widest = State::MAX as u32 + 1;
        let rule = WolframCodeRule::new(u128::from(widest - 1), widest, 0).unwrap();
        assert_eq!(step(&rule, &[0]), State::MAX);
        assert!(matches!(
            WolframCodeRule::new(0, widest + 1, 0),
            Err(RuleError::InvalidParameter { .. })
        ));
        assert!(WolframCodeRule::new(0, u32::MAX, 0).is_err());
    }

    #[test]
    fn out_of_range_state_is_reported() {
        let rule = WolframCodeRule::new(30, 2, 1).unwrap();
        assert!(matches!(
            rule.apply(&NeighborhoodView::new(&[0, 2, 0], None, 0)),
            Err(RuleError::StateOutOfRange { state: 2, .. })
        ));
        assert!(matches!(
            rule.apply(&NeighborhoodView::new(&[0, -1, 0], None, 0)),
            Err(RuleError::StateOutOfRange { state: -1, .. })
        ));
    }

    #[test]
    fn three_state_rule_reads_base_three_digits() {
        // Rule 123 in base 3 has digit 2 at index 1 and digit 1 at index 2.
        let rule = WolframCodeRule::new(123, 3, 1).unwrap();
        assert_eq!(step(&rule, &[0, 0, 0]), 0);
        assert_eq!(step(&rule, &[0, 0, 1]), 2);
        assert_eq!(step(&rule, &[0, 0, 2]), 1);
    }
}
