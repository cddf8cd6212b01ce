//! Benchmark profiles and utilities for the ncell engine.
//!
//! Provides pre-built automata for benchmarking:
//!
//! - [`life_profile`]: Conway's Life on a square grid, randomly seeded
//! - [`wolfram_profile`]: an elementary automaton on a long line
//! - [`euclidean_profile`]: a 3-D life-like rule over a Euclidean ball

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ncell_core::{Neighborhood, NeighborhoodView, Rule, RuleError};
use ncell_core::{Cell, Mask, Offset};
use ncell_engine::seed::bernoulli_states;
use ncell_engine::{Automaton, AutomatonConfig, ConfigError, StepMode};
use ncell_grid::GridConfig;
use ncell_rules::{EuclideanNeighborhood, LifeLikeCell, LifeLikeRule, WolframCell, WolframCodeRule};

/// Initial live-cell density of the random profiles.
pub const SEED_DENSITY: f64 = 0.3;

fn seeded(mut automaton: Automaton, seed: u64) -> Result<Automaton, ConfigError> {
    let interior = automaton.grid().interior_dimensions().to_vec();
    let states = bernoulli_states(&interior, 0, 1, SEED_DENSITY, seed)?;
    automaton
        .grid_mut()
        .set_values_from_configuration(&states, None)?;
    Ok(automaton)
}

/// Conway's Life on a `side x side` grid with a dead border, 30% alive.
pub fn life_profile(side: usize, seed: u64, step_mode: StepMode) -> Result<Automaton, ConfigError> {
    let mut config = AutomatonConfig::new(
        Box::new(LifeLikeCell),
        Box::new(LifeLikeRule::conway()?),
        GridConfig::uniform_border(&[side, side], 1, 0),
    );
    config.name = Some(format!("life-{side}"));
    config.step_mode = step_mode;
    seeded(Automaton::from_config(config)?, seed)
}

/// Rule 110 on a line of `len` cells, 30% alive.
pub fn wolfram_profile(len: usize, seed: u64) -> Result<Automaton, ConfigError> {
    let config = AutomatonConfig::new(
        Box::new(WolframCell::new(2)?),
        Box::new(WolframCodeRule::new(110, 2, 1)?),
        GridConfig::uniform_border(&[len], 1, 0),
    );
    seeded(Automaton::from_config(config)?, seed)
}

/// Outer-totalistic rule over a radius-2 Euclidean ball.
///
/// Alive next iff 4..=8 of the 32 surrounding cells are alive (the center
/// itself is excluded from the count).
pub struct EuclideanLife {
    neighborhood: EuclideanNeighborhood,
}

impl EuclideanLife {
    /// Rule over a `dimensions`-D ball of radius 2.
    pub fn new(dimensions: usize) -> Result<Self, RuleError> {
        Ok(Self {
            neighborhood: EuclideanNeighborhood::new(dimensions, 2, false)?,
        })
    }
}

impl Rule for EuclideanLife {
    fn name(&self) -> &str {
        "euclidean-life"
    }

    fn neighborhood(&self) -> &dyn Neighborhood {
        &self.neighborhood
    }

    fn apply(&self, n: &NeighborhoodView<'_>) -> Result<Cell, RuleError> {
        let alive = n.states().iter().filter(|&&s| s != 0).count();
        Ok(Cell::new(i32::from((4..=8).contains(&alive))))
    }
}

/// [`EuclideanLife`] on a `side^3` grid, 30% alive.
pub fn euclidean_profile(side: usize, seed: u64, step_mode: StepMode) -> Result<Automaton, ConfigError> {
    let mut config = AutomatonConfig::new(
        Box::new(LifeLikeCell),
        Box::new(EuclideanLife::new(3)?),
        GridConfig::uniform_border(&[side, side, side], 2, 0),
    );
    config.step_mode = step_mode;
    seeded(Automaton::from_config(config)?, seed)
}

/// A dense `side^ndim` mask with offset `-(side / 2)` on every axis.
pub fn dense_mask(ndim: usize, side: usize) -> Result<(Mask, Offset), RuleError> {
    let mask = Mask::full(&vec![side; ndim])?;
    let offset = std::iter::repeat(-((side / 2) as isize)).take(ndim).collect();
    Ok((mask, offset))
}
