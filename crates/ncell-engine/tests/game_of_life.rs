//! Integration test: Conway's Game of Life on a bordered 2-D grid.
//!
//! A glider must reappear translated by (1, 1) after four generations,
//! and a blinker must oscillate with period two, under both sweep modes.

use ncell_engine::{Automaton, AutomatonConfig, StepMode};
use ncell_grid::{GridConfig, Region, StateArray};
use ncell_rules::{LifeLikeCell, LifeLikeRule};
use ncell_test_utils::{glider_pattern, glider_states};

fn life(rows: usize, cols: usize, mode: StepMode) -> Automaton {
    let mut config = AutomatonConfig::new(
        Box::new(LifeLikeCell),
        Box::new(LifeLikeRule::conway().unwrap()),
        GridConfig::uniform_border(&[rows, cols], 1, 0),
    );
    config.name = Some("life".into());
    config.step_mode = mode;
    Automaton::from_config(config).unwrap()
}

/// Write `states` so that the next step consumes them.
fn seed(automaton: &mut Automaton, states: &StateArray) {
    automaton
        .grid_mut()
        .set_values_from_configuration(states, None)
        .unwrap();
}

#[test]
fn glider_translates_diagonally() {
    for mode in [StepMode::Sequential, StepMode::Parallel { threads: Some(2) }] {
        let mut a = life(40, 40, mode);
        seed(&mut a, &glider_states(40, 40, (1, 1)));
        a.run(4).unwrap();
        assert_eq!(
            a.current_states(),
            glider_states(40, 40, (2, 2)),
            "mode {mode:?}"
        );
        assert_eq!(a.generation(), 4);
    }
}

#[test]
fn stamped_glider_matches_whole_grid_seed() {
    let mut stamped = life(12, 12, StepMode::Sequential);
    // Bounding box at interior (3, 4), behind a border of one.
    stamped
        .grid_mut()
        .set_region_from_configuration(&Region::new(&[4, 5], &[3, 3]), &glider_pattern(), None)
        .unwrap();
    let mut seeded = life(12, 12, StepMode::Sequential);
    seed(&mut seeded, &glider_states(12, 12, (3, 4)));
    assert_eq!(stamped.current_states(), seeded.current_states());

    stamped.run(4).unwrap();
    assert_eq!(stamped.current_states(), glider_states(12, 12, (4, 5)));
}

#[test]
fn glider_population_is_stable() {
    let mut a = life(20, 20, StepMode::Sequential);
    seed(&mut a, &glider_states(20, 20, (0, 0)));
    for _ in 0..12 {
        a.next_step().unwrap();
        assert_eq!(a.current_states().count(1), 5);
    }
}

#[test]
fn blinker_oscillates() {
    let mut horizontal = StateArray::filled(&[5, 5], 0).unwrap();
    let mut vertical = horizontal.clone();
    for i in 1..4 {
        horizontal.set(&[2, i], 1);
        vertical.set(&[i, 2], 1);
    }

    let mut a = life(5, 5, StepMode::Sequential);
    seed(&mut a, &horizontal);
    a.next_step().unwrap();
    assert_eq!(a.current_states(), vertical);
    a.next_step().unwrap();
    assert_eq!(a.current_states(), horizontal);
    // The previous generation is in the read buffer.
    assert_eq!(a.density_of_state(1), 3.0 / 25.0);
}

#[test]
fn glider_dies_against_dead_border() {
    // A dead border is absorbing: the glider hits the corner and collapses
    // into a still life.
    let mut a = life(6, 6, StepMode::Sequential);
    seed(&mut a, &glider_states(6, 6, (0, 0)));
    a.run(40).unwrap();
    let settled = a.current_states();
    a.run(2).unwrap();
    assert_eq!(a.current_states(), settled);
}
