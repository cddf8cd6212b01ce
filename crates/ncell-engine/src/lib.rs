//! Automaton orchestration for ncell.
//!
//! [`Automaton`] owns a [`GridStore`](ncell_grid::GridStore), a
//! [`Rule`](ncell_core::Rule) and a
//! [`CellInformation`](ncell_core::CellInformation) descriptor, and advances
//! the grid one generation per [`next_step`](Automaton::next_step) under the
//! double-buffer discipline: every new value is computed only from the
//! previous generation.
//!
//! Supporting modules:
//! - [`config`]: [`AutomatonConfig`], [`StepMode`], [`ConfigError`].
//! - [`configuration`]: saved [`Configuration`] snapshots.
//! - [`metrics`]: per-step [`StepMetrics`].
//! - [`hash`]: FNV-1a interior hashes for determinism checks.
//! - [`seed`]: reproducible random initial states.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod automaton;
pub mod config;
pub mod configuration;
pub mod error;
pub mod hash;
pub mod metrics;
pub mod seed;

pub use automaton::Automaton;
pub use config::{AutomatonConfig, ConfigError, StepMode};
pub use configuration::{CellMetadata, Configuration};
pub use error::StepError;
pub use metrics::StepMetrics;
