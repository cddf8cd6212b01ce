//! Reference neighborhoods, rules and cell descriptors for ncell.
//!
//! - Neighborhoods: [`MooreNeighborhood`], [`VonNeumannNeighborhood`] and
//!   [`EuclideanNeighborhood`] in any dimension, plus the one-dimensional
//!   [`LineNeighborhood`] families.
//! - Rules: [`LifeLikeRule`] (B/S notation) and [`WolframCodeRule`].
//! - Descriptors: [`StandardCell`], [`LifeLikeCell`] and [`WolframCell`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cells;
pub mod life;
pub mod line;
pub mod neighborhoods;
pub mod wolfram;

pub use cells::{LifeLikeCell, StandardCell, WolframCell};
pub use life::LifeLikeRule;
pub use line::{LineNeighborhood, LineShape};
pub use neighborhoods::{EuclideanNeighborhood, MooreNeighborhood, VonNeumannNeighborhood};
pub use wolfram::WolframCodeRule;
