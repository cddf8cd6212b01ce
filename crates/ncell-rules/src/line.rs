//! One-dimensional neighborhood families.
//!
//! Every family spans `left` cells to the left of the center and `right`
//! cells to the right, giving a mask of length `left + right + 1` with
//! offset `-left`. The families differ in which of those cells they
//! select; `inclusive` decides the center.
//!
//! | family | selected cells | offset |
//! |---|---|---|
//! | `left_cell(r)` | the cell `r` to the left | `-r` |
//! | `right_cell(r)` | the cell `r` to the right | `0` |
//! | `interval(l, r)` | the cells `l` left and `r` right | `-l` |
//! | `left_side(r)` | all `r` cells to the left | `-r` |
//! | `right_side(r)` | all `r` cells to the right | `0` |
//! | `both_sides(l, r)` | all `l` left and `r` right cells | `-l` |

use ncell_core::{Mask, Neighborhood, Offset, RuleError};

/// Which cells of the span a [`LineNeighborhood`] selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineShape {
    /// The single cell `radius` to the left.
    LeftCell {
        /// Distance to the selected cell.
        radius: usize,
    },
    /// The single cell `radius` to the right.
    RightCell {
        /// Distance to the selected cell.
        radius: usize,
    },
    /// The two cells `left` to the left and `right` to the right.
    Interval {
        /// Distance to the left endpoint.
        left: usize,
        /// Distance to the right endpoint.
        right: usize,
    },
    /// Every cell up to `radius` to the left.
    LeftSide {
        /// Number of cells selected.
        radius: usize,
    },
    /// Every cell up to `radius` to the right.
    RightSide {
        /// Number of cells selected.
        radius: usize,
    },
    /// Every cell up to `left` to the left and up to `right` to the right.
    BothSides {
        /// Cells selected on the left.
        left: usize,
        /// Cells selected on the right.
        right: usize,
    },
}

impl LineShape {
    fn span(self) -> (usize, usize) {
        match self {
            Self::LeftCell { radius } | Self::LeftSide { radius } => (radius, 0),
            Self::RightCell { radius } | Self::RightSide { radius } => (0, radius),
            Self::Interval { left, right } | Self::BothSides { left, right } => (left, right),
        }
    }

    /// Whether the non-center cell at index `i` of the span is selected.
    fn selects(self, i: usize, left: usize, len: usize) -> bool {
        match self {
            Self::LeftCell { .. } => i == 0,
            Self::RightCell { .. } => i == len - 1,
            Self::Interval { .. } => i == 0 || i == len - 1,
            Self::LeftSide { .. } => i < left,
            Self::RightSide { .. } => i > left,
            Self::BothSides { .. } => true,
        }
    }
}

/// A one-dimensional neighborhood.
///
/// # Examples
///
/// ```
/// use ncell_core::Neighborhood;
/// use ncell_rules::LineNeighborhood;
///
/// let n = LineNeighborhood::interval(3, 4, true).unwrap();
/// let flags: Vec<bool> = n.mask().as_slice().to_vec();
/// assert_eq!(flags, [true, false, false, true, false, false, false, true]);
/// assert_eq!(n.offset().as_slice(), &[-3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineNeighborhood {
    shape: LineShape,
    inclusive: bool,
    mask: Mask,
}

impl LineNeighborhood {
    /// Build a neighborhood of the given shape.
    ///
    /// Returns `Err(RuleError::InvalidNeighborhood)` if the span overflows
    /// or the mask would select no cells.
    pub fn new(shape: LineShape, inclusive: bool) -> Result<Self, RuleError> {
        let (left, right) = shape.span();
        let len = left
            .checked_add(right)
            .and_then(|n| n.checked_add(1))
            .filter(|&n| isize::try_from(n).is_ok())
            .ok_or_else(|| RuleError::InvalidNeighborhood {
                reason: format!("span {left} + {right} is too large"),
            })?;
        let cells: Vec<bool> = (0..len)
            .map(|i| if i == left { inclusive } else { shape.selects(i, left, len) })
            .collect();
        if !cells.contains(&true) {
            return Err(RuleError::InvalidNeighborhood {
                reason: format!("{shape:?} (inclusive: {inclusive}) selects no cells"),
            });
        }
        let mask = Mask::new(&[len], cells)?;
        Ok(Self {
            shape,
            inclusive,
            mask,
        })
    }

    /// The cell `radius` to the left (plus the center if inclusive).
    pub fn left_cell(radius: usize, inclusive: bool) -> Result<Self, RuleError> {
        Self::new(LineShape::LeftCell { radius }, inclusive)
    }

    /// The cell `radius` to the right (plus the center if inclusive).
    pub fn right_cell(radius: usize, inclusive: bool) -> Result<Self, RuleError> {
        Self::new(LineShape::RightCell { radius }, inclusive)
    }

    /// The cells `left` to the left and `right` to the right.
    pub fn interval(left: usize, right: usize, inclusive: bool) -> Result<Self, RuleError> {
        Self::new(LineShape::Interval { left, right }, inclusive)
    }

    /// Every cell up to `radius` to the left.
    pub fn left_side(radius: usize, inclusive: bool) -> Result<Self, RuleError> {
        Self::new(LineShape::LeftSide { radius }, inclusive)
    }

    /// Every cell up to `radius` to the right.
    pub fn right_side(radius: usize, inclusive: bool) -> Result<Self, RuleError> {
        Self::new(LineShape::RightSide { radius }, inclusive)
    }

    /// Every cell up to `left` to the left and `right` to the right.
    pub fn both_sides(left: usize, right: usize, inclusive: bool) -> Result<Self, RuleError> {
        Self::new(LineShape::BothSides { left, right }, inclusive)
    }

    /// The shape this neighborhood was built from.
    pub fn shape(&self) -> LineShape {
        self.shape
    }

    /// Whether the center cell is selected.
    pub fn inclusive(&self) -> bool {
        self.inclusive
    }
}

impl Neighborhood for LineNeighborhood {
    fn mask(&self) -> Mask {
        self.mask.clone()
    }

    fn offset(&self) -> Offset {
        let (left, _) = self.shape.span();
        // `new` checked that the span fits in isize.
        smallvec::smallvec![-(left as isize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(n: &LineNeighborhood) -> Vec<u8> {
        n.mask().as_slice().iter().map(|&b| u8::from(b)).collect()
    }

    fn offset(n: &LineNeighborhood) -> isize {
        n.offset()[0]
    }

    #[test]
    fn left_cell() {
        assert_eq!(flags(&LineNeighborhood::left_cell(4, false).unwrap()), [1, 0, 0, 0, 0]);
        let n = LineNeighborhood::left_cell(3, true).unwrap();
        assert_eq!(flags(&n), [1, 0, 0, 1]);
        assert_eq!(offset(&n), -3);
    }

    #[test]
    fn right_cell() {
        let n = LineNeighborhood::right_cell(4, false).unwrap();
        assert_eq!(flags(&n), [0, 0, 0, 0, 1]);
        assert_eq!(offset(&n), 0);
        assert_eq!(flags(&LineNeighborhood::right_cell(3, true).unwrap()), [1, 0, 0, 1]);
    }

    #[test]
    fn interval() {
        let n = LineNeighborhood::interval(4, 3, false).unwrap();
        assert_eq!(flags(&n), [1, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(offset(&n), -4);
        let n = LineNeighborhood::interval(3, 4, true).unwrap();
        assert_eq!(flags(&n), [1, 0, 0, 1, 0, 0, 0, 1]);
        assert_eq!(offset(&n), -3);
    }

    #[test]
    fn left_side() {
        let n = LineNeighborhood::left_side(4, false).unwrap();
        assert_eq!(flags(&n), [1, 1, 1, 1, 0]);
        assert_eq!(offset(&n), -4);
        assert_eq!(flags(&LineNeighborhood::left_side(3, true).unwrap()), [1, 1, 1, 1]);
    }

    #[test]
    fn right_side() {
        let n = LineNeighborhood::right_side(4, false).unwrap();
        assert_eq!(flags(&n), [0, 1, 1, 1, 1]);
        assert_eq!(offset(&n), 0);
        assert_eq!(flags(&LineNeighborhood::right_side(3, true).unwrap()), [1, 1, 1, 1]);
    }

    #[test]
    fn both_sides() {
        let n = LineNeighborhood::both_sides(4, 3, false).unwrap();
        assert_eq!(flags(&n), [1, 1, 1, 1, 0, 1, 1, 1]);
        assert_eq!(offset(&n), -4);
        let n = LineNeighborhood::both_sides(3, 4, true).unwrap();
        assert_eq!(flags(&n), [1; 8]);
        assert_eq!(offset(&n), -3);
    }

    #[test]
    fn empty_selection_rejected() {
        assert!(LineNeighborhood::left_side(0, false).is_err());
        assert!(LineNeighborhood::both_sides(0, 0, false).is_err());
        assert_eq!(flags(&LineNeighborhood::both_sides(0, 0, true).unwrap()), [1]);
    }
}
