//! The automaton: grid, rule and descriptor tied together by the
//! double-buffered step protocol.
//!
//! [`Automaton`] is the user-facing API. Each call to
//! [`next_step()`](Automaton::next_step) flips the grid's buffer roles and
//! recomputes every interior cell from the previous generation.
//!
//! # Buffer discipline
//!
//! After a step the new generation sits in the **write** buffer and the
//! previous one in the **read** buffer; the next step flips them again.
//! Statistics ([`density_of_state`](Automaton::density_of_state),
//! [`average_of_attribute`](Automaton::average_of_attribute)) read the
//! read buffer; [`current_states`](Automaton::current_states) and
//! [`save_configuration`](Automaton::save_configuration) read the write
//! buffer. [`load_configuration`](Automaton::load_configuration) writes
//! the write buffer, so the following step consumes the loaded contents.
//!
//! # Borders
//!
//! The step never touches border cells. Whatever the borders hold is the
//! boundary condition. [`reset()`](Automaton::reset) sets both buffers'
//! borders to the default cell; anything else (e.g. a periodic halo) is
//! the caller's job through [`grid_mut()`](Automaton::grid_mut).
//!
//! # Ownership model
//!
//! `Automaton` is [`Send`]: it exclusively owns its grid, rule and
//! descriptor, and every mutating method takes `&mut self`.

use std::fmt;
use std::time::Instant;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use rayon::prelude::*;

use ncell_core::{CellInformation, Coord, Mask, Neighbors, Offset, Rule, State};
use ncell_grid::{BufferReader, BufferRole, GridError, GridStore, SlabWriter, StateArray};

use crate::config::{validate_parts, validate_step_mode, AutomatonConfig, ConfigError, StepMode};
use crate::configuration::{CellMetadata, Configuration};
use crate::error::StepError;
use crate::metrics::StepMetrics;

// Compile-time assertion: Automaton is Send.
// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Automaton>();
    }
};

/// A cellular automaton over an N-dimensional bordered grid.
///
/// # Example
///
/// ```
/// use ncell_engine::Automaton;
/// use ncell_grid::{GridConfig, GridStore};
/// use ncell_rules::{LifeLikeCell, LifeLikeRule};
///
/// let grid = GridStore::new(GridConfig::uniform_border(&[16, 16], 1, 0)).unwrap();
/// let mut life = Automaton::new(
///     Box::new(LifeLikeCell),
///     Box::new(LifeLikeRule::conway().unwrap()),
///     grid,
///     Some("life".into()),
/// )
/// .unwrap();
/// life.run(10).unwrap();
/// assert_eq!(life.generation(), 10);
/// assert_eq!(life.density_of_state(1), 0.0);
/// ```
pub struct Automaton {
    name: Option<String>,
    cell_information: Box<dyn CellInformation>,
    rule: Box<dyn Rule>,
    grid: GridStore,
    mask: Mask,
    offset: Offset,
    step_mode: StepMode,
    pool: Option<rayon::ThreadPool>,
    scratch: Neighbors,
    generation: u64,
    last_metrics: StepMetrics,
}

impl Automaton {
    /// Tie a descriptor, a rule and an existing grid together.
    ///
    /// The rule's neighborhood is queried once; its mask and offset are
    /// cached for the automaton's lifetime. The grid's contents are left
    /// as they are. Step mode is sequential.
    ///
    /// Returns a [`ConfigError`] if the mask or offset rank differs from
    /// the grid's, the border is narrower than the mask reach, or the
    /// descriptor is inconsistent with itself or with the grid's
    /// attribute count.
    pub fn new(
        cell_information: Box<dyn CellInformation>,
        rule: Box<dyn Rule>,
        grid: GridStore,
        name: Option<String>,
    ) -> Result<Self, ConfigError> {
        let neighborhood = rule.neighborhood();
        let mask = neighborhood.mask();
        let offset = neighborhood.offset();
        validate_parts(&*cell_information, &mask, &offset, grid.config())?;

        debug!(
            "automaton {:?}: rule '{}', interior {:?}, border {:?}, {} attributes, {} mask cells",
            name,
            rule.name(),
            grid.interior_dimensions(),
            grid.border_widths(),
            grid.attribute_count(),
            mask.selected_count(),
        );

        Ok(Self {
            name,
            cell_information,
            rule,
            grid,
            scratch: Neighbors::with_capacity(mask.selected_count(), 0),
            mask,
            offset,
            step_mode: StepMode::Sequential,
            pool: None,
            generation: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Build the grid from `config.grid`, validate, and [`reset`](Self::reset)
    /// both buffers to the descriptor defaults.
    pub fn from_config(config: AutomatonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = GridStore::new(config.grid)?;
        let mut automaton = Self::new(config.cell_information, config.rule, grid, config.name)?;
        automaton.set_step_mode(config.step_mode)?;
        automaton.reset()?;
        Ok(automaton)
    }

    /// Rebuild an automaton from a saved configuration and a rule.
    ///
    /// The saved metadata becomes the descriptor. Both buffers hold the
    /// saved interior and both borders hold the descriptor's default cell,
    /// as after [`reset`](Self::reset), so the rebuilt automaton evolves
    /// exactly like the one the configuration was saved from.
    pub fn from_configuration(
        configuration: &Configuration,
        rule: Box<dyn Rule>,
    ) -> Result<Self, ConfigError> {
        let grid = GridStore::from_snapshot(&configuration.grid)?;
        let mut automaton = Self::new(
            Box::new(configuration.cells.clone()),
            rule,
            grid,
            configuration.name.clone(),
        )?;
        let border = automaton.cell_information.default_cell();
        for _ in 0..2 {
            automaton.grid.set_border_values(&border)?;
            automaton.grid.flip();
        }
        Ok(automaton)
    }

    /// Select how [`run`](Self::run) sweeps.
    ///
    /// `Parallel { threads: Some(n) }` builds a dedicated rayon pool of
    /// `n` threads; `threads: None` uses the global pool.
    pub fn set_step_mode(&mut self, mode: StepMode) -> Result<(), ConfigError> {
        validate_step_mode(mode)?;
        self.pool = match mode {
            StepMode::Parallel { threads: Some(n) } => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("ncell-sweep-{i}"))
                    .build()
                    .map_err(|e| ConfigError::InvalidStepMode {
                        reason: e.to_string(),
                    })?,
            ),
            _ => None,
        };
        self.step_mode = mode;
        Ok(())
    }

    // ── Stepping ───────────────────────────────────────────────────

    /// Advance one generation on the current thread.
    ///
    /// Flips the buffer roles, then for every interior position `p` in
    /// row-major order: extracts the neighborhood at `p + offset` from the
    /// read buffer, applies the rule, and writes the result at `p` in the
    /// write buffer.
    ///
    /// Any error aborts the step. The buffers stay flipped and the write
    /// buffer may be partially updated; the generation counter and the
    /// metrics are left unchanged.
    pub fn next_step(&mut self) -> Result<(), StepError> {
        self.step_with(false)
    }

    /// Advance one generation with the interior swept concurrently.
    ///
    /// The write buffer is split into axis-0 slabs swept on rayon (the
    /// dedicated pool if one is configured). Results are bit-identical to
    /// [`next_step`](Self::next_step). When several cells fail, which
    /// error is returned is unspecified.
    pub fn next_step_parallel(&mut self) -> Result<(), StepError> {
        self.step_with(true)
    }

    /// Run `steps` generations in the configured [`StepMode`], stopping
    /// at the first error.
    pub fn run(&mut self, steps: usize) -> Result<(), StepError> {
        let parallel = self.step_mode.is_parallel();
        for _ in 0..steps {
            self.step_with(parallel)?;
        }
        Ok(())
    }

    fn step_with(&mut self, parallel: bool) -> Result<(), StepError> {
        let start = Instant::now();
        self.grid.flip();

        let sweep_start = Instant::now();
        let result = if parallel {
            self.sweep_parallel()
        } else {
            self.sweep_sequential()
        };
        let sweep_us = sweep_start.elapsed().as_micros() as u64;

        match result {
            Ok(cells_updated) => {
                self.generation += 1;
                self.last_metrics = StepMetrics {
                    total_us: start.elapsed().as_micros() as u64,
                    sweep_us,
                    cells_updated,
                    parallel,
                };
                trace!(
                    "generation {}: {} cells in {}us (parallel: {})",
                    self.generation,
                    cells_updated,
                    self.last_metrics.total_us,
                    parallel,
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    "step to generation {} aborted: {e}",
                    self.generation + 1
                );
                Err(e)
            }
        }
    }

    fn sweep_sequential(&mut self) -> Result<usize, StepError> {
        let Self {
            grid,
            rule,
            mask,
            offset,
            scratch,
            ..
        } = self;
        let mut origin = Coord::new();
        let mut updated = 0;
        for position in grid.positions() {
            mask_origin(&position, offset, &mut origin)?;
            grid.apply_mask_into(&origin, mask, scratch)?;
            let cell = rule
                .apply(&scratch.view())
                .map_err(|reason| StepError::RuleFailed {
                    rule: rule.name().to_owned(),
                    position: position.clone(),
                    reason,
                })?;
            grid.update_cell(&position, &cell)?;
            updated += 1;
        }
        Ok(updated)
    }

    fn sweep_parallel(&mut self) -> Result<usize, StepError> {
        let rule: &dyn Rule = &*self.rule;
        let mask = &self.mask;
        let offset = &self.offset;
        let (reader, slabs) = self.grid.split_for_update();
        let sweep = move || {
            slabs
                .into_par_iter()
                .map(|mut slab| sweep_slab(reader, &mut slab, rule, mask, offset))
                .try_reduce(|| 0, |a, b| Ok(a + b))
        };
        match &self.pool {
            Some(pool) => pool.install(sweep),
            None => sweep(),
        }
    }

    // ── Initialization ─────────────────────────────────────────────

    /// Fill interior and border of both buffers with the descriptor's
    /// default cell and reset the generation counter.
    ///
    /// Buffer roles are the same afterwards as before.
    pub fn reset(&mut self) -> Result<(), GridError> {
        let cell = self.cell_information.default_cell();
        for _ in 0..2 {
            self.grid.flip();
            self.grid.set_values_from(&cell)?;
            self.grid.set_border_values(&cell)?;
        }
        self.generation = 0;
        self.last_metrics = StepMetrics::default();
        debug!("automaton {:?}: reset to state {}", self.name, cell.state);
        Ok(())
    }

    // ── Statistics (read buffer) ───────────────────────────────────

    /// Fraction of interior cells of the read buffer in `state`.
    ///
    /// `0.0` for an empty interior.
    pub fn density_of_state(&self, state: State) -> f64 {
        let total = self.grid.interior_cell_count();
        if total == 0 {
            return 0.0;
        }
        self.grid.reader(BufferRole::Read).count_state(state) as f64 / total as f64
    }

    /// [`density_of_state`](Self::density_of_state) for every declared
    /// state, in declaration order.
    pub fn densities_of_states(&self) -> IndexMap<State, f64> {
        self.cell_information
            .states()
            .into_iter()
            .map(|s| (s, self.density_of_state(s)))
            .collect()
    }

    /// Mean of attribute `index` over the interior of the read buffer.
    ///
    /// `None` if the grid has no attribute `index`; `Some(0.0)` for an
    /// empty interior.
    pub fn average_of_attribute(&self, index: usize) -> Option<f64> {
        self.grid.get_attributes()?.mean(index)
    }

    /// Mean of every attribute over the interior of the read buffer, in
    /// index order. Empty for attribute-less grids.
    pub fn averages_of_attributes(&self) -> Vec<f64> {
        match self.grid.get_attributes() {
            Some(attrs) => (0..attrs.attribute_count())
                .filter_map(|i| attrs.mean(i))
                .collect(),
            None => Vec::new(),
        }
    }

    // ── Configurations (write buffer) ──────────────────────────────

    /// Interior states of the most recent generation.
    pub fn current_states(&self) -> StateArray {
        self.grid.get_states_of(BufferRole::Write)
    }

    /// Snapshot the most recent generation together with the name and
    /// descriptor metadata.
    pub fn save_configuration(&self) -> Configuration {
        Configuration {
            name: self.name.clone(),
            cells: CellMetadata::from_information(&*self.cell_information),
            grid: self.grid.snapshot(BufferRole::Write),
        }
    }

    /// Write a saved configuration's interior into the write buffer.
    ///
    /// The next step reads the loaded contents. Returns `ShapeMismatch`
    /// if the saved interior or attribute layout differs from this grid's;
    /// nothing is written on error.
    pub fn load_configuration(&mut self, configuration: &Configuration) -> Result<(), GridError> {
        self.grid.set_values_from_configuration(
            &configuration.grid.states,
            configuration.grid.attributes.as_ref(),
        )?;
        debug!(
            "automaton {:?}: loaded configuration {:?}",
            self.name, configuration.name
        );
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The cell descriptor.
    pub fn cell_information(&self) -> &dyn CellInformation {
        &*self.cell_information
    }

    /// The transition rule.
    pub fn rule(&self) -> &dyn Rule {
        &*self.rule
    }

    /// The grid.
    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Mutable access to the grid, for border refresh and seeding.
    pub fn grid_mut(&mut self) -> &mut GridStore {
        &mut self.grid
    }

    /// The cached neighborhood mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// The cached neighborhood offset.
    pub fn offset(&self) -> &[isize] {
        &self.offset
    }

    /// The configured step mode.
    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    /// Completed steps since construction or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Metrics of the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("name", &self.name)
            .field("rule", &self.rule.name())
            .field("interior", &self.grid.interior_dimensions())
            .field("border", &self.grid.border_widths())
            .field("attribute_count", &self.grid.attribute_count())
            .field("step_mode", &self.step_mode)
            .field("generation", &self.generation)
            .finish()
    }
}

// ── helpers ────────────────────────────────────────────────────────

/// `origin = position + offset`, componentwise.
///
/// A negative component is reported as `OutOfRange`; construction-time
/// border validation makes that unreachable for interior positions.
fn mask_origin(position: &[usize], offset: &[isize], origin: &mut Coord) -> Result<(), GridError> {
    origin.clear();
    for (&p, &o) in position.iter().zip(offset) {
        let shifted = p.checked_add_signed(o).ok_or_else(|| GridError::OutOfRange {
            position: position.to_vec(),
            bounds: format!("mask offset {offset:?} leaves the grid"),
        })?;
        origin.push(shifted);
    }
    Ok(())
}

fn sweep_slab(
    reader: BufferReader<'_>,
    slab: &mut SlabWriter<'_>,
    rule: &dyn Rule,
    mask: &Mask,
    offset: &[isize],
) -> Result<usize, StepError> {
    let mut scratch = Neighbors::new();
    let mut origin = Coord::new();
    let mut updated = 0;
    for position in slab.positions() {
        mask_origin(&position, offset, &mut origin)?;
        reader.apply_mask_into(&origin, mask, &mut scratch)?;
        let cell = rule
            .apply(&scratch.view())
            .map_err(|reason| StepError::RuleFailed {
                rule: rule.name().to_owned(),
                position: position.clone(),
                reason,
            })?;
        slab.write(&position, &cell)?;
        updated += 1;
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncell_core::Cell;
    use ncell_grid::GridConfig;
    use ncell_test_utils::{
        numbered_line, ConstRule, FailingRule, FixedNeighborhood, IdentityRule,
        MockCellInformation, SumRule,
    };

    fn line_automaton(rule: Box<dyn Rule>) -> Automaton {
        let grid = GridStore::new(GridConfig::uniform_border(&[10], 1, 0)).unwrap();
        Automaton::new(Box::new(MockCellInformation::binary()), rule, grid, None).unwrap()
    }

    #[test]
    fn step_writes_new_generation_into_write_buffer() {
        let mut a = line_automaton(Box::new(ConstRule::new(1, Cell::new(1))));
        a.next_step().unwrap();
        assert_eq!(a.current_states().count(1), 10);
        // The previous generation is still all zeros.
        assert_eq!(a.density_of_state(1), 0.0);
        a.next_step().unwrap();
        assert_eq!(a.density_of_state(1), 1.0);
        assert_eq!(a.generation(), 2);
    }

    #[test]
    fn step_never_touches_border() {
        let mut a = line_automaton(Box::new(ConstRule::new(1, Cell::new(1))));
        a.run(3).unwrap();
        for role in [BufferRole::Read, BufferRole::Write] {
            let reader = a.grid().reader(role);
            assert_eq!(reader.get_cell(&[0]).unwrap().state, 0);
            assert_eq!(reader.get_cell(&[11]).unwrap().state, 0);
        }
    }

    #[test]
    fn mask_origin_applies_offset() {
        let mut origin = Coord::new();
        mask_origin(&[3, 5], &[-1, 2], &mut origin).unwrap();
        assert_eq!(origin.as_slice(), &[2, 7]);
        assert!(matches!(
            mask_origin(&[0], &[-1], &mut origin),
            Err(GridError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rule_failure_aborts_step() {
        let mut a = line_automaton(Box::new(FailingRule::new(1, 4)));
        match a.next_step() {
            Err(StepError::RuleFailed { rule, position, .. }) => {
                assert_eq!(rule, "failing");
                // Positions are visited row-major from the first interior cell.
                assert_eq!(position.as_slice(), &[5]);
            }
            other => panic!("expected RuleFailed, got {other:?}"),
        }
        assert_eq!(a.generation(), 0);
        assert_eq!(a.last_metrics(), &StepMetrics::default());
    }

    #[test]
    fn metrics_recorded() {
        let mut a = line_automaton(Box::new(IdentityRule::new(1)));
        a.next_step().unwrap();
        assert_eq!(a.last_metrics().cells_updated, 10);
        assert!(!a.last_metrics().parallel);
        a.next_step_parallel().unwrap();
        assert_eq!(a.last_metrics().cells_updated, 10);
        assert!(a.last_metrics().parallel);
        assert!(a.last_metrics().total_us >= a.last_metrics().sweep_us);
    }

    #[test]
    fn reset_fills_both_buffers() {
        let grid = GridStore::new(GridConfig::uniform_border(&[4, 4], 1, 1)).unwrap();
        let info = MockCellInformation::new(vec![3, 0], 1);
        let mut a = Automaton::new(
            Box::new(info),
            Box::new(IdentityRule::new(2)),
            grid,
            None,
        )
        .unwrap();
        let read_before = a.grid().read_buffer_index();
        a.reset().unwrap();
        assert_eq!(a.grid().read_buffer_index(), read_before);
        for role in [BufferRole::Read, BufferRole::Write] {
            let states = a.grid().reader(role).states_with_border();
            assert!(states.as_slice().iter().all(|&s| s == 3));
        }
        assert_eq!(a.density_of_state(3), 1.0);
        assert_eq!(a.average_of_attribute(0), Some(0.0));
        assert_eq!(a.average_of_attribute(1), None);
    }

    #[test]
    fn densities_follow_declared_order() {
        let grid = GridStore::new(GridConfig::uniform_border(&[4], 0, 0)).unwrap();
        let mut a = Automaton::new(
            Box::new(MockCellInformation::new(vec![2, 0, 1], 0)),
            Box::new(IdentityRule::new(1)),
            grid,
            None,
        )
        .unwrap();
        let states = StateArray::new(&[4], vec![0, 2, 2, 1]).unwrap();
        a.grid_mut().set_values_from_configuration(&states, None).unwrap();
        a.grid_mut().flip();
        let densities = a.densities_of_states();
        assert_eq!(densities.keys().copied().collect::<Vec<_>>(), vec![2, 0, 1]);
        assert_eq!(densities[&2], 0.5);
        assert_eq!(densities[&0], 0.25);
        assert_eq!(densities[&1], 0.25);
    }

    #[test]
    fn empty_interior_statistics() {
        let grid = GridStore::new(GridConfig::new(&[0, 3], &[1, 1], 2)).unwrap();
        let mut a = Automaton::new(
            Box::new(MockCellInformation::new(vec![0, 1], 2)),
            Box::new(IdentityRule::new(2)),
            grid,
            None,
        )
        .unwrap();
        a.next_step().unwrap();
        assert_eq!(a.last_metrics().cells_updated, 0);
        assert_eq!(a.density_of_state(0), 0.0);
        assert_eq!(a.averages_of_attributes(), vec![0.0, 0.0]);
    }

    #[test]
    fn save_load_round_trip() {
        let mut a = line_automaton(Box::new(SumRule::new(FixedNeighborhood::cube(1, 1), 5)));
        a.grid_mut()
            .set_values_from_configuration(&numbered_line(10), None)
            .unwrap();
        a.next_step().unwrap();
        a.next_step().unwrap();
        let saved = a.save_configuration();
        assert_eq!(saved.grid.states, a.current_states());

        a.next_step().unwrap();
        assert_ne!(a.save_configuration(), saved);
        a.load_configuration(&saved).unwrap();
        assert_eq!(a.save_configuration(), saved);
    }

    #[test]
    fn load_rejects_other_shapes() {
        let mut a = line_automaton(Box::new(IdentityRule::new(1)));
        let mut saved = a.save_configuration();
        saved.grid.states = StateArray::filled(&[11], 1).unwrap();
        let before = a.current_states();
        assert!(matches!(
            a.load_configuration(&saved),
            Err(GridError::ShapeMismatch { .. })
        ));
        assert_eq!(a.current_states(), before);
    }

    #[test]
    fn debug_summarizes() {
        let a = line_automaton(Box::new(IdentityRule::new(1)));
        let text = format!("{a:?}");
        assert!(text.contains("identity"));
        assert!(text.contains("generation: 0"));
    }
}
