//! N-dimensional ball neighborhoods.
//!
//! Each neighborhood is the set of cells within `radius` of the center
//! under some metric, laid out as a hypercube mask of side `2 * radius + 1`
//! with offset `-radius` on every axis. `inclusive` controls whether the
//! center cell itself is selected.

use ncell_core::{Mask, Neighborhood, Offset, RuleError};

/// Distance metric used to carve a ball out of the bounding hypercube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Metric {
    Chebyshev,
    Manhattan,
    Euclidean,
}

impl Metric {
    fn within(self, coord: &[usize], radius: usize) -> bool {
        let deltas = coord.iter().map(|&c| c.abs_diff(radius));
        match self {
            Self::Chebyshev => deltas.max().unwrap_or(0) <= radius,
            Self::Manhattan => deltas.sum::<usize>() <= radius,
            Self::Euclidean => deltas.map(|d| d * d).sum::<usize>() <= radius * radius,
        }
    }
}

fn ball(dimensions: usize, radius: usize, inclusive: bool, metric: Metric) -> Result<Mask, RuleError> {
    if dimensions == 0 {
        return Err(RuleError::InvalidNeighborhood {
            reason: "neighborhood needs at least one dimension".into(),
        });
    }
    if radius == 0 && !inclusive {
        return Err(RuleError::InvalidNeighborhood {
            reason: "an exclusive neighborhood of radius 0 selects no cells".into(),
        });
    }
    let side = radius
        .checked_mul(2)
        .and_then(|s| s.checked_add(1))
        .ok_or_else(|| RuleError::InvalidNeighborhood {
            reason: format!("radius {radius} is too large"),
        })?;
    let shape = vec![side; dimensions];
    Mask::from_fn(&shape, |c| {
        let center = c.iter().all(|&x| x == radius);
        if center {
            inclusive
        } else {
            metric.within(c, radius)
        }
    })
}

fn centered_offset(dimensions: usize, radius: usize) -> Offset {
    // Radius fits in isize: `ball` already built a mask of side 2r + 1.
    smallvec::smallvec![-(radius as isize); dimensions]
}

macro_rules! ball_neighborhood {
    ($(#[$doc:meta])* $name:ident, $metric:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            dimensions: usize,
            radius: usize,
            inclusive: bool,
            mask: Mask,
        }

        impl $name {
            /// Build the neighborhood.
            ///
            /// Returns `Err(RuleError::InvalidNeighborhood)` for zero
            /// dimensions or an exclusive neighborhood of radius 0.
            pub fn new(dimensions: usize, radius: usize, inclusive: bool) -> Result<Self, RuleError> {
                let mask = ball(dimensions, radius, inclusive, $metric)?;
                Ok(Self {
                    dimensions,
                    radius,
                    inclusive,
                    mask,
                })
            }

            /// Number of axes.
            pub fn dimensions(&self) -> usize {
                self.dimensions
            }

            /// Ball radius.
            pub fn radius(&self) -> usize {
                self.radius
            }

            /// Whether the center cell is selected.
            pub fn inclusive(&self) -> bool {
                self.inclusive
            }
        }

        impl Neighborhood for $name {
            fn mask(&self) -> Mask {
                self.mask.clone()
            }

            fn offset(&self) -> Offset {
                centered_offset(self.dimensions, self.radius)
            }
        }
    };
}

ball_neighborhood!(
    /// Chebyshev ball: the full hypercube of side `2 * radius + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ncell_core::Neighborhood;
    /// use ncell_rules::MooreNeighborhood;
    ///
    /// let n = MooreNeighborhood::new(2, 1, false).unwrap();
    /// assert_eq!(n.mask().selected_count(), 8);
    /// assert_eq!(n.offset().as_slice(), &[-1, -1]);
    /// ```
    MooreNeighborhood,
    Metric::Chebyshev
);

ball_neighborhood!(
    /// Manhattan ball: cells with `sum |d_i| <= radius`.
    ///
    /// In 2-D with radius 1 this is the plus-shaped cross.
    VonNeumannNeighborhood,
    Metric::Manhattan
);

ball_neighborhood!(
    /// Euclidean ball: cells with `sum d_i^2 <= radius^2`.
    EuclideanNeighborhood,
    Metric::Euclidean
);
