//! Axis-aligned subregions of a grid.

use ncell_core::types::checked_volume;
use ncell_core::{Coord, Dims};

use crate::positions::InteriorPositions;

/// An axis-aligned box `[origin[i], origin[i] + extent[i])` in full-grid
/// coordinates (border included in the index space).
///
/// # Examples
///
/// ```
/// use ncell_grid::Region;
///
/// let r = Region::new(&[1, 1], &[2, 3]);
/// assert_eq!(r.volume(), 6);
/// assert!(r.contains(&[2, 3]));
/// assert!(!r.contains(&[3, 1]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Minimum corner (inclusive).
    pub origin: Coord,
    /// Extent along each axis.
    pub extent: Dims,
}

impl Region {
    /// Build a region from its minimum corner and extent.
    pub fn new(origin: &[usize], extent: &[usize]) -> Self {
        Self {
            origin: Coord::from_slice(origin),
            extent: Dims::from_slice(extent),
        }
    }

    /// Build a region from inclusive-exclusive `(start, end)` bounds per
    /// axis. Reversed bounds produce an empty axis.
    pub fn from_bounds(bounds: &[(usize, usize)]) -> Self {
        Self {
            origin: bounds.iter().map(|&(start, _)| start).collect(),
            extent: bounds.iter().map(|&(start, end)| end.saturating_sub(start)).collect(),
        }
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.origin.len()
    }

    /// Number of positions covered (saturating).
    pub fn volume(&self) -> usize {
        checked_volume(&self.extent).unwrap_or(usize::MAX)
    }

    /// `true` if `position` lies inside the region.
    pub fn contains(&self, position: &[usize]) -> bool {
        position.len() == self.origin.len()
            && position
                .iter()
                .zip(&self.origin)
                .zip(&self.extent)
                .all(|((&p, &o), &e)| p >= o && p - o < e)
    }

    /// Exclusive upper corner, or `None` on overflow.
    pub fn end(&self) -> Option<Coord> {
        self.origin
            .iter()
            .zip(&self.extent)
            .map(|(&o, &e)| o.checked_add(e))
            .collect()
    }

    /// Positions in the region, row-major.
    pub fn positions(&self) -> InteriorPositions {
        InteriorPositions::from_box(&self.origin, &self.extent)
    }
}
