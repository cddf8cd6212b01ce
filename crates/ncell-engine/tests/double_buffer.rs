//! Integration test: the double-buffer step discipline.
//!
//! Every value of generation N must be computed from generation N-1 only,
//! borders are never written by a step, and the parallel sweep must be
//! bit-identical to the sequential one.

use ncell_core::{Cell, CellInformation};
use ncell_engine::hash::grid_hash;
use ncell_engine::seed::{bernoulli_states, random_states};
use ncell_engine::{Automaton, AutomatonConfig, StepMode};
use ncell_grid::{AttributeArray, BufferRole, GridConfig, GridStore, StateArray};
use ncell_rules::{LifeLikeCell, LifeLikeRule};
use ncell_test_utils::{numbered_line, FixedNeighborhood, IdentityRule, MockCellInformation, SumRule};
use proptest::prelude::*;

fn sum_automaton(interior: &[usize], attribute_count: usize, modulus: i32) -> Automaton {
    let ndim = interior.len();
    let config = AutomatonConfig::new(
        Box::new(MockCellInformation::new((0..modulus).collect(), attribute_count)),
        Box::new(SumRule::new(FixedNeighborhood::cube(ndim, 1), modulus)),
        GridConfig::uniform_border(interior, 1, attribute_count),
    );
    Automaton::from_config(config).unwrap()
}

#[test]
fn density_conserved_under_identity() {
    let states = random_states(&[12, 9], &[0, 1, 2, 3], 17).unwrap();
    let grid = GridStore::new(GridConfig::uniform_border(&[12, 9], 0, 0)).unwrap();
    let info = MockCellInformation::new(vec![0, 1, 2, 3], 0);
    let mut a = Automaton::new(Box::new(info), Box::new(IdentityRule::new(2)), grid, None).unwrap();
    a.grid_mut().set_values_from_configuration(&states, None).unwrap();

    a.next_step().unwrap();
    let initial = a.densities_of_states();
    assert!((initial.values().sum::<f64>() - 1.0).abs() < 1e-12);
    for _ in 0..5 {
        a.next_step().unwrap();
        assert_eq!(a.densities_of_states(), initial);
        assert_eq!(a.current_states(), states);
    }
}

#[test]
fn attributes_conserved_under_identity() {
    let grid = GridStore::new(GridConfig::uniform_border(&[3, 3], 0, 2)).unwrap();
    let mut a = Automaton::new(
        Box::new(MockCellInformation::new(vec![0, 1], 2)),
        Box::new(IdentityRule::new(2)),
        grid,
        None,
    )
    .unwrap();
    let data = (0..18).map(f64::from).collect();
    let attrs = AttributeArray::new(&[3, 3, 2], data).unwrap();
    a.grid_mut()
        .set_values_from_configuration(&StateArray::filled(&[3, 3], 1).unwrap(), Some(&attrs))
        .unwrap();
    a.run(3).unwrap();
    // Even values at index 0, odd values at index 1.
    assert_eq!(a.averages_of_attributes(), vec![8.0, 9.0]);
    assert_eq!(a.average_of_attribute(1), Some(9.0));
}

#[test]
fn new_values_come_from_previous_generation_only() {
    // If a step read its own partial output, cell 2 would see the new
    // value of cell 1 and the sums would cascade along the line.
    let mut a = sum_automaton(&[10], 0, 1000);
    a.grid_mut()
        .set_values_from_configuration(&numbered_line(10), None)
        .unwrap();
    a.next_step().unwrap();
    let expected: Vec<i32> = (0..10)
        .map(|i: i32| (i - 1).max(0) + i + if i < 9 { i + 1 } else { 0 })
        .collect();
    assert_eq!(a.current_states().as_slice(), expected.as_slice());
}

#[test]
fn border_lives_in_one_buffer_only() {
    let mut a = sum_automaton(&[4], 0, 10);
    // Only the current write buffer gets a live border.
    a.grid_mut().set_border_values(&Cell::new(1)).unwrap();

    a.next_step().unwrap();
    assert_eq!(a.current_states().as_slice(), &[1, 0, 0, 1]);
    a.next_step().unwrap();
    // This step read the buffer whose border is still the reset default.
    assert_eq!(a.current_states().as_slice(), &[1, 1, 1, 1]);
    a.next_step().unwrap();
    assert_eq!(a.current_states().as_slice(), &[3, 3, 3, 3]);
}

#[test]
fn border_refreshed_in_both_buffers() {
    let mut a = sum_automaton(&[4], 0, 10);
    for _ in 0..2 {
        a.grid_mut().set_border_values(&Cell::new(1)).unwrap();
        a.grid_mut().flip();
    }
    a.next_step().unwrap();
    assert_eq!(a.current_states().as_slice(), &[1, 0, 0, 1]);
    a.next_step().unwrap();
    assert_eq!(a.current_states().as_slice(), &[2, 1, 1, 2]);
}

#[test]
fn parallel_matches_sequential_with_attributes() {
    let interior = [6, 5, 4];
    let mut seq = sum_automaton(&interior, 2, 7);
    let mut par = sum_automaton(&interior, 2, 7);
    par.set_step_mode(StepMode::Parallel { threads: Some(3) }).unwrap();

    let states = random_states(&interior, &(0..7).collect::<Vec<_>>(), 5).unwrap();
    let data = (0..states.len() * 2).map(|i| (i % 13) as f64 * 0.5).collect();
    let attrs = AttributeArray::new(&[6, 5, 4, 2], data).unwrap();
    for a in [&mut seq, &mut par] {
        a.grid_mut()
            .set_values_from_configuration(&states, Some(&attrs))
            .unwrap();
    }

    for _ in 0..6 {
        seq.run(1).unwrap();
        par.run(1).unwrap();
        assert_eq!(
            grid_hash(seq.grid(), BufferRole::Write),
            grid_hash(par.grid(), BufferRole::Write)
        );
    }
    assert!(par.last_metrics().parallel);
    assert_eq!(par.last_metrics().cells_updated, 120);
}

#[test]
fn failing_parallel_step_reports_rule() {
    use ncell_engine::StepError;
    use ncell_test_utils::FailingRule;

    let grid = GridStore::new(GridConfig::uniform_border(&[8, 8], 0, 0)).unwrap();
    let mut a = Automaton::new(
        Box::new(LifeLikeCell),
        Box::new(FailingRule::new(2, 10)),
        grid,
        None,
    )
    .unwrap();
    match a.next_step_parallel() {
        Err(StepError::RuleFailed { rule, .. }) => assert_eq!(rule, "failing"),
        other => panic!("expected RuleFailed, got {other:?}"),
    }
    assert_eq!(a.generation(), 0);
}

#[test]
fn reset_restores_defaults_everywhere() {
    let mut a = sum_automaton(&[5, 5], 1, 4);
    let states = random_states(&[5, 5], &[0, 1, 2, 3], 3).unwrap();
    a.grid_mut()
        .set_values_from_configuration(&states, Some(&AttributeArray::filled(&[5, 5], &[2.0]).unwrap()))
        .unwrap();
    a.run(2).unwrap();
    a.reset().unwrap();
    assert_eq!(a.generation(), 0);
    let default = a.cell_information().default_cell();
    for role in [BufferRole::Read, BufferRole::Write] {
        let reader = a.grid().reader(role);
        assert!(reader
            .states_with_border()
            .as_slice()
            .iter()
            .all(|&s| s == default.state));
    }
    assert_eq!(a.average_of_attribute(0), Some(0.0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn life_parallel_matches_sequential(
        seed in any::<u64>(),
        rows in 1usize..24,
        cols in 1usize..24,
        density in 0.0f64..1.0,
    ) {
        let states = bernoulli_states(&[rows, cols], 0, 1, density, seed).unwrap();
        let build = || {
            let grid = GridStore::new(GridConfig::uniform_border(&[rows, cols], 1, 0)).unwrap();
            let mut a = Automaton::new(
                Box::new(LifeLikeCell),
                Box::new(LifeLikeRule::conway().unwrap()),
                grid,
                None,
            )
            .unwrap();
            a.grid_mut().set_values_from_configuration(&states, None).unwrap();
            a
        };
        let mut seq = build();
        let mut par = build();
        for _ in 0..4 {
            seq.next_step().unwrap();
            par.next_step_parallel().unwrap();
            prop_assert_eq!(seq.current_states(), par.current_states());
        }
    }

    #[test]
    fn identity_preserves_random_grids(
        seed in any::<u64>(),
        len in 0usize..64,
    ) {
        let states = random_states(&[len], &[0, 1, 2], seed).unwrap();
        let grid = GridStore::new(GridConfig::uniform_border(&[len], 0, 0)).unwrap();
        let mut a = Automaton::new(
            Box::new(MockCellInformation::new(vec![0, 1, 2], 0)),
            Box::new(IdentityRule::new(1)),
            grid,
            None,
        )
        .unwrap();
        a.grid_mut().set_values_from_configuration(&states, None).unwrap();
        a.run(3).unwrap();
        prop_assert_eq!(a.current_states(), states);
    }
}
