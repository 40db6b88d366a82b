//! Integration tests for the simulation pipeline
//!
//! Load, run, tabulate: accuracy against analytical solutions, mass
//! conservation, grid conventions, repeatability and fail-fast behavior.

use kinet_rs::engine::{EulerSolver, Runner, TimeGrid};
use kinet_rs::error::KinetError;

mod common;
use common::{chain_network, decay_network, relative_error, run_default};

#[test]
fn test_decay_matches_analytical_solution() {
    let mut network = decay_network();
    let table = run_default(&mut network, 0.0, 50.0, 100);

    // S1(50) = 10 * exp(-5) ~ 0.067379
    let exact = 10.0 * (-5.0_f64).exp();
    let numeric = table.final_value("S1").unwrap();
    assert!(relative_error(numeric, exact) < 1e-6);
}

#[test]
fn test_mass_conservation_every_row() {
    let mut network = decay_network();
    let table = run_default(&mut network, 0.0, 50.0, 100);

    let s1 = table.column("S1").unwrap();
    let s2 = table.column("S2").unwrap();
    for (a, b) in s1.iter().zip(s2.iter()) {
        assert!((a + b - 10.0).abs() < 1e-9);
    }
}

#[test]
fn test_chain_observable_tracks_total_mass() {
    let mut network = chain_network();
    let grid = TimeGrid::with_steps(0.0, 30.0, 300).unwrap();
    let table = Runner::default()
        .run(&mut network, &grid, Some(&["time", "A", "C", "total"]))
        .unwrap();

    // The observable is re-evaluated per row and must stay at A+B+C = 6
    for value in table.column("total").unwrap() {
        assert!((value - 6.0).abs() < 1e-9);
    }
    // Material flows down the chain
    let a = table.column("A").unwrap();
    let c = table.column("C").unwrap();
    assert!(a.last().unwrap() < &a[0]);
    assert!(c.last().unwrap() > &c[0]);
}

#[test]
fn test_row_count_and_endpoints() {
    let mut network = decay_network();

    // 840 / 0.1 = 8400 steps, 8401 rows
    let grid = TimeGrid::with_step_size(0.0, 840.0, 0.1).unwrap();
    assert_eq!(grid.steps(), 8400);

    let table = Runner::default().run(&mut network, &grid, None).unwrap();
    assert_eq!(table.n_rows(), 8401);

    let time = table.time().unwrap();
    assert_eq!(time[0], 0.0);
    // The final time point is exact, not accumulated dt rounding
    assert_eq!(*time.last().unwrap(), 840.0);
}

#[test]
fn test_repeated_runs_are_identical() {
    let mut network = decay_network();
    let first = run_default(&mut network, 0.0, 50.0, 100);
    // The handle now holds the final state; the second run must reset
    // and reproduce the table bit-for-bit
    let second = run_default(&mut network, 0.0, 50.0, 100);

    for name in first.column_names() {
        let a = first.column(name).unwrap();
        let b = second.column(name).unwrap();
        assert_eq!(a, b, "column {} differs between runs", name);
    }
}

#[test]
fn test_parameter_change_after_reset() {
    let mut network = decay_network();
    let slow = run_default(&mut network, 0.0, 50.0, 100);

    network.set_parameter("k1", 0.2).unwrap();
    let fast = run_default(&mut network, 0.0, 50.0, 100);

    // Doubled rate constant: less S1 remaining
    assert!(fast.final_value("S1").unwrap() < slow.final_value("S1").unwrap());
}

#[test]
fn test_invalid_time_range_fails_fast() {
    assert!(matches!(
        TimeGrid::with_steps(10.0, 5.0, 100),
        Err(KinetError::InvalidRange(_))
    ));
    assert!(matches!(
        TimeGrid::with_steps(0.0, 10.0, 0),
        Err(KinetError::InvalidRange(_))
    ));
    assert!(matches!(
        TimeGrid::with_step_size(0.0, 10.0, -0.1),
        Err(KinetError::InvalidRange(_))
    ));
}

#[test]
fn test_unknown_selection_fails_before_solving() {
    let mut network = decay_network();
    let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();

    let err = Runner::default()
        .run(&mut network, &grid, Some(&["time", "S1", "ghost"]))
        .unwrap_err();
    match err {
        KinetError::UnknownColumn(name) => assert_eq!(name, "ghost"),
        other => panic!("expected UnknownColumn, got {:?}", other),
    }
}

#[test]
fn test_euler_less_accurate_than_rk4() {
    let exact = 10.0 * (-5.0_f64).exp();

    let mut network = decay_network();
    let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();

    let rk4 = Runner::default().run(&mut network, &grid, None).unwrap();
    let euler = Runner::new(Box::new(EulerSolver::new()))
        .run(&mut network, &grid, None)
        .unwrap();

    let rk4_err = (rk4.final_value("S1").unwrap() - exact).abs();
    let euler_err = (euler.final_value("S1").unwrap() - exact).abs();

    assert!(euler_err > rk4_err * 100.0);
    // Both still land in the right neighborhood
    assert!(relative_error(euler.final_value("S1").unwrap(), exact) < 0.2);
}

#[test]
fn test_stiff_rate_with_coarse_grid_diverges() {
    let mut network = decay_network();
    network.set_parameter("k1", 1000.0).unwrap();

    let grid = TimeGrid::with_steps(0.0, 100.0, 200).unwrap();
    let result = Runner::new(Box::new(EulerSolver::new())).run(&mut network, &grid, None);

    match result {
        Err(KinetError::Integration { time, .. }) => assert!(time > 0.0),
        other => panic!("expected Integration error, got {:?}", other.map(|t| t.n_rows())),
    }
}

#[test]
fn test_final_state_lands_on_handle() {
    let mut network = decay_network();
    let table = run_default(&mut network, 0.0, 50.0, 100);

    let expected = table.final_value("S1").unwrap();
    assert!((network.concentration("S1").unwrap() - expected).abs() < 1e-12);
}
