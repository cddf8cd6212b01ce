//! ncell: a generic N-dimensional cellular automaton engine.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! ncell sub-crates. For most users, adding `ncell` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ncell::prelude::*;
//!
//! // A 40×40 Game of Life with a dead border one cell wide.
//! let config = AutomatonConfig::new(
//!     Box::new(LifeLikeCell),
//!     Box::new(LifeLikeRule::parse("B3/S23").unwrap()),
//!     GridConfig::uniform_border(&[40, 40], 1, 0),
//! );
//! let mut life = Automaton::from_config(config).unwrap();
//!
//! // Seed a blinker; the next step reads it.
//! let mut states = StateArray::filled(&[40, 40], 0).unwrap();
//! for col in 10..13 {
//!     states.set(&[20, col], 1);
//! }
//! life.grid_mut().set_values_from_configuration(&states, None).unwrap();
//!
//! life.run(2).unwrap();
//! assert_eq!(life.current_states(), states);
//! assert_eq!(life.densities_of_states()[&1], 3.0 / 1600.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ncell-core` | Coordinates, cells, masks, collaborator traits |
//! | [`grid`] | `ncell-grid` | Double-buffered bordered grid store |
//! | [`rules`] | `ncell-rules` | Reference neighborhoods, rules and descriptors |
//! | [`engine`] | `ncell-engine` | Automaton, configurations, hashing, seeding |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`ncell-core`).
///
/// Contains [`types::Cell`], [`types::Mask`] and the collaborator traits
/// ([`types::CellInformation`], [`types::Neighborhood`], [`types::Rule`]).
pub use ncell_core as types;

/// Grid storage (`ncell-grid`).
///
/// [`grid::GridStore`] owns the two buffers; [`grid::InteriorPositions`]
/// enumerates the updatable cells.
pub use ncell_grid as grid;

/// Reference neighborhoods, rules and cell descriptors (`ncell-rules`).
pub use ncell_rules as rules;

/// Automaton orchestration (`ncell-engine`).
///
/// Besides [`engine::Automaton`], holds [`engine::hash`] for determinism
/// checks and [`engine::seed`] for reproducible random states.
pub use ncell_engine as engine;

/// Common imports for typical ncell usage.
///
/// ```rust
/// use ncell::prelude::*;
/// ```
///
/// This imports the most frequently used types: the automaton and its
/// configuration, grid types, core traits and the reference rules.
pub mod prelude {
    // Core types and traits
    pub use ncell_core::{
        Attributes, Cell, CellInformation, Coord, Dims, Mask, Neighborhood, NeighborhoodView,
        Offset, Rule, State,
    };

    // Errors
    pub use ncell_core::RuleError;
    pub use ncell_engine::{ConfigError, StepError};
    pub use ncell_grid::GridError;

    // Grid
    pub use ncell_grid::{
        AttributeArray, BufferRole, GridConfig, GridSnapshot, GridStore, Region, StateArray,
    };

    // Reference rules
    pub use ncell_rules::{
        LifeLikeCell, LifeLikeRule, MooreNeighborhood, StandardCell, VonNeumannNeighborhood,
        WolframCell, WolframCodeRule,
    };

    // Engine
    pub use ncell_engine::{
        Automaton, AutomatonConfig, CellMetadata, Configuration, StepMetrics, StepMode,
    };
}
