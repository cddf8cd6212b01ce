//! Integration test: elementary Wolfram automata on a 1-D grid.

use ncell_engine::Automaton;
use ncell_grid::{GridConfig, GridStore, StateArray};
use ncell_rules::{WolframCell, WolframCodeRule};

fn row(pattern: &str) -> StateArray {
    let data = pattern.bytes().map(|b| i32::from(b == b'#')).collect();
    StateArray::new(&[pattern.len()], data).unwrap()
}

fn wolfram(rule_number: u128, initial: &str) -> Automaton {
    let grid = GridStore::new(GridConfig::uniform_border(&[initial.len()], 1, 0)).unwrap();
    let mut a = Automaton::new(
        Box::new(WolframCell::new(2).unwrap()),
        Box::new(WolframCodeRule::new(rule_number, 2, 1).unwrap()),
        grid,
        None,
    )
    .unwrap();
    a.grid_mut()
        .set_values_from_configuration(&row(initial), None)
        .unwrap();
    a
}

#[test]
fn rule_30_from_single_cell() {
    let mut a = wolfram(30, "....#....");
    let expected = ["...###...", "..##..#..", ".##.####."];
    for line in expected {
        a.next_step().unwrap();
        assert_eq!(a.current_states(), row(line));
    }
}

#[test]
fn rule_90_draws_sierpinski() {
    let mut a = wolfram(90, ".......#.......");
    let expected = [
        "......#.#......",
        ".....#...#.....",
        "....#.#.#.#....",
        "...#.......#...",
    ];
    for line in expected {
        a.next_step().unwrap();
        assert_eq!(a.current_states(), row(line));
    }
}

#[test]
fn parallel_matches_sequential() {
    let mut seq = wolfram(110, "#..#.##...#.#..###.#");
    let mut par = wolfram(110, "#..#.##...#.#..###.#");
    for _ in 0..16 {
        seq.next_step().unwrap();
        par.next_step_parallel().unwrap();
        assert_eq!(seq.current_states(), par.current_states());
    }
}

#[test]
fn border_too_narrow_is_rejected() {
    let grid = GridStore::new(GridConfig::uniform_border(&[10], 1, 0)).unwrap();
    let result = Automaton::new(
        Box::new(WolframCell::new(2).unwrap()),
        Box::new(WolframCodeRule::new(30, 2, 2).unwrap()),
        grid,
        None,
    );
    assert!(result.is_err());
}
