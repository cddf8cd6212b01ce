//! Row-major iteration over the interior of a bordered grid.

use std::iter::FusedIterator;

use ncell_core::types::checked_volume;
use ncell_core::{Coord, Dims};

/// Iterator over every interior position of a bordered grid.
///
/// Positions are full-grid coordinates (border included in the index
/// space) and are yielded in row-major order, last axis fastest. This is
/// the full-extent row-major order with border coordinates skipped.
///
/// The iterator holds no reference to a grid; build a new one (for
/// example with [`GridStore::positions`](crate::GridStore::positions))
/// to restart.
///
/// # Examples
///
/// ```
/// use ncell_grid::InteriorPositions;
///
/// let positions: Vec<Vec<usize>> = InteriorPositions::new(&[2, 2], &[1, 1])
///     .map(|c| c.to_vec())
///     .collect();
/// assert_eq!(positions, vec![vec![1, 1], vec![1, 2], vec![2, 1], vec![2, 2]]);
/// ```
#[derive(Clone, Debug)]
pub struct InteriorPositions {
    origin: Coord,
    extent: Dims,
    next: Coord,
    remaining: usize,
}

impl InteriorPositions {
    /// Iterate the interior of a grid with the given interior extents and
    /// border widths.
    ///
    /// `interior` and `border` must have the same length; extra entries in
    /// the longer one are ignored.
    pub fn new(interior: &[usize], border: &[usize]) -> Self {
        let rank = interior.len().min(border.len());
        Self::from_box(&border[..rank], &interior[..rank])
    }

    /// Iterate the axis-aligned box `[origin[i], origin[i] + extent[i])`.
    ///
    /// The yield count saturates at `usize::MAX` for boxes whose volume
    /// does not fit; grids never build such boxes.
    pub fn from_box(origin: &[usize], extent: &[usize]) -> Self {
        let rank = origin.len().min(extent.len());
        Self {
            origin: Coord::from_slice(&origin[..rank]),
            extent: Dims::from_slice(&extent[..rank]),
            next: Coord::from_slice(&origin[..rank]),
            remaining: checked_volume(&extent[..rank]).unwrap_or(usize::MAX),
        }
    }

    fn advance(&mut self) {
        for axis in (0..self.extent.len()).rev() {
            self.next[axis] += 1;
            if self.next[axis] < self.origin[axis] + self.extent[axis] {
                return;
            }
            self.next[axis] = self.origin[axis];
        }
    }
}

impl Iterator for InteriorPositions {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next.clone();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InteriorPositions {}

impl FusedIterator for InteriorPositions {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_extent_axis_is_empty() {
        let mut it = InteriorPositions::new(&[3, 0, 2], &[1, 1, 1]);
        assert_eq!(it.len(), 0);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn zero_border_covers_whole_grid() {
        let all: Vec<Coord> = InteriorPositions::new(&[2, 3], &[0, 0]).collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].as_slice(), &[0, 0]);
        assert_eq!(all[5].as_slice(), &[1, 2]);
    }

    #[test]
    fn zero_dimensional_yields_one_empty_coordinate() {
        let all: Vec<Coord> = InteriorPositions::new(&[], &[]).collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }

    #[test]
    fn fused_after_exhaustion() {
        let mut it = InteriorPositions::new(&[1], &[2]);
        assert_eq!(it.next().map(|c| c.to_vec()), Some(vec![2]));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn exact_size_counts_down() {
        let mut it = InteriorPositions::new(&[2, 2], &[1, 1]);
        assert_eq!(it.len(), 4);
        it.next();
        assert_eq!(it.len(), 3);
    }

    proptest! {
        #[test]
        fn visits_exactly_the_interior(
            dims in proptest::collection::vec((0usize..5, 0usize..3), 1..4)
        ) {
            let interior: Vec<usize> = dims.iter().map(|&(d, _)| d).collect();
            let border: Vec<usize> = dims.iter().map(|&(_, b)| b).collect();
            let expected: usize = interior.iter().product();

            let visited: Vec<Coord> = InteriorPositions::new(&interior, &border).collect();
            prop_assert_eq!(visited.len(), expected);

            for pos in &visited {
                for axis in 0..interior.len() {
                    prop_assert!(pos[axis] >= border[axis]);
                    prop_assert!(pos[axis] < border[axis] + interior[axis]);
                }
            }
            // Strictly increasing in row-major order implies no duplicates.
            for pair in visited.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}
