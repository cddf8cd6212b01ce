//! Integration test: saving, restoring and rebuilding configurations.

use ncell_core::{Cell, CellInformation};
use ncell_engine::hash::{grid_hash, snapshot_hash};
use ncell_engine::seed::bernoulli_states;
use ncell_engine::{Automaton, AutomatonConfig, ConfigError, Configuration};
use ncell_grid::{BufferRole, GridConfig};
use ncell_rules::{LifeLikeRule, StandardCell};
use ncell_test_utils::{FixedNeighborhood, MockCellInformation, SumRule};

fn life_with_names() -> Automaton {
    let cells = StandardCell::new([0, 1], 0)
        .unwrap()
        .with_state_names([(0, "dead"), (1, "alive")])
        .unwrap();
    let mut config = AutomatonConfig::new(
        Box::new(cells),
        Box::new(LifeLikeRule::parse("B36/S23").unwrap()),
        GridConfig::uniform_border(&[16, 16], 1, 0),
    );
    config.name = Some("highlife".into());
    let mut a = Automaton::from_config(config).unwrap();
    let states = bernoulli_states(&[16, 16], 0, 1, 0.35, 21).unwrap();
    a.grid_mut().set_values_from_configuration(&states, None).unwrap();
    a
}

#[test]
fn saved_configuration_carries_metadata() {
    let mut a = life_with_names();
    a.run(3).unwrap();
    let saved = a.save_configuration();
    assert_eq!(saved.name.as_deref(), Some("highlife"));
    assert_eq!(saved.cells.state_name(1).as_deref(), Some("alive"));
    assert_eq!(saved.cells.states(), vec![0, 1]);
    assert_eq!(saved.interior_dimensions(), &[16, 16]);
    assert_eq!(snapshot_hash(&saved.grid), grid_hash(a.grid(), BufferRole::Write));
}

#[test]
fn rebuilt_automaton_continues_identically() {
    let mut original = life_with_names();
    original.run(5).unwrap();
    let saved = original.save_configuration();

    let mut rebuilt =
        Automaton::from_configuration(&saved, Box::new(LifeLikeRule::parse("B36/S23").unwrap()))
            .unwrap();
    assert_eq!(rebuilt.name(), Some("highlife"));
    assert_eq!(rebuilt.current_states(), original.current_states());

    for _ in 0..5 {
        original.next_step().unwrap();
        rebuilt.next_step().unwrap();
        assert_eq!(rebuilt.current_states(), original.current_states());
    }
}

#[test]
fn rebuilt_border_holds_the_default_cell() {
    // Default state 3 sits in the border and feeds every edge sum.
    let summing = || Box::new(SumRule::new(FixedNeighborhood::cube(1, 1), 10));
    let config = AutomatonConfig::new(
        Box::new(MockCellInformation::new(vec![3, 0, 1, 2], 0)),
        summing(),
        GridConfig::uniform_border(&[4], 1, 0),
    );
    let mut original = Automaton::from_config(config).unwrap();
    original.run(1).unwrap();

    let mut rebuilt = Automaton::from_configuration(&original.save_configuration(), summing()).unwrap();
    for role in [BufferRole::Read, BufferRole::Write] {
        for edge in [0, 5] {
            assert_eq!(rebuilt.grid().get_cell_of(role, &[edge]).unwrap(), Cell::new(3));
        }
    }
    for _ in 0..3 {
        original.next_step().unwrap();
        rebuilt.next_step().unwrap();
        assert_eq!(rebuilt.current_states(), original.current_states());
    }
}

#[test]
fn loading_rewinds_the_next_step() {
    let mut a = life_with_names();
    a.run(2).unwrap();
    let saved = a.save_configuration();
    a.next_step().unwrap();
    let after_one = a.current_states();

    a.run(7).unwrap();
    a.load_configuration(&saved).unwrap();
    a.next_step().unwrap();
    assert_eq!(a.current_states(), after_one);
}

#[test]
fn rebuilding_with_mismatched_rule_fails() {
    let saved: Configuration = life_with_names().save_configuration();
    let rule = LifeLikeRule::parse_with("B3/S23", 3, 1).unwrap();
    match Automaton::from_configuration(&saved, Box::new(rule)) {
        Err(ConfigError::MaskRank { mask: 3, grid: 2 }) => {}
        other => panic!("expected MaskRank, got {other:?}"),
    }
}

#[cfg(feature = "serde")]
#[test]
fn configuration_survives_json() {
    let mut a = life_with_names();
    a.run(2).unwrap();
    let saved = a.save_configuration();
    let json = serde_json::to_string(&saved).unwrap();
    let restored: Configuration = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, saved);
}

#[cfg(feature = "serde")]
#[test]
fn truncated_json_is_rejected_when_decoding() {
    let mut a = life_with_names();
    let saved = a.save_configuration();
    let mut value = serde_json::to_value(&saved).unwrap();
    value["grid"]["states"]["data"] = serde_json::json!([0, 0, 0]);
    assert!(serde_json::from_value::<Configuration>(value).is_err());

    // The automaton is untouched and still steps.
    assert_eq!(a.current_states(), saved.grid.states);
    a.next_step().unwrap();
}
