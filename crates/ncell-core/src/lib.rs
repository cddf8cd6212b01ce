//! Core types and traits for the ncell cellular automaton engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the grid store, the reference rules and the
//! automaton orchestrator: dimension and coordinate vectors, the
//! [`Cell`] value type, neighborhood [`Mask`]s, and the three
//! collaborator traits ([`CellInformation`], [`Neighborhood`], [`Rule`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod mask;
pub mod neighborhood;
pub mod traits;
pub mod types;

pub use cell::Cell;
pub use error::RuleError;
pub use mask::Mask;
pub use neighborhood::{NeighborhoodView, Neighbors};
pub use traits::{CellInformation, Neighborhood, Rule};
pub use types::{Attributes, Coord, Dims, Offset, State};
