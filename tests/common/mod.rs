//! Common utilities for integration tests

use kinet_rs::engine::{ResultTable, Runner, TimeGrid};
use kinet_rs::model::{load_network, ReactionNetwork};

/// Two-species first-order decay with analytical solution
/// S1(t) = 10·exp(-0.1·t), S2(t) = 10 - S1(t).
pub const DECAY_MODEL: &str = "
    model decay
      S1 -> S2; k1 * S1
      k1 = 0.1
      S1 = 10
    end
";

/// Closed three-species chain; total mass is conserved at 6.0.
pub const CHAIN_MODEL: &str = "
    model chain
      J0: A -> B; ka * A
      J1: B -> C; kb * B
      ka = 0.3
      kb = 0.15
      A = 4
      B = 2
      total := A + B + C
    end
";

pub fn decay_network() -> ReactionNetwork {
    load_network(DECAY_MODEL).expect("decay model parses")
}

pub fn chain_network() -> ReactionNetwork {
    load_network(CHAIN_MODEL).expect("chain model parses")
}

/// Run `network` on a default RK4 runner with all species selected.
pub fn run_default(network: &mut ReactionNetwork, start: f64, end: f64, steps: usize) -> ResultTable {
    let grid = TimeGrid::with_steps(start, end, steps).expect("valid grid");
    Runner::default()
        .run(network, &grid, None)
        .expect("simulation succeeds")
}

/// Relative error |a - b| / |b|.
pub fn relative_error(a: f64, b: f64) -> f64 {
    (a - b).abs() / b.abs().max(f64::MIN_POSITIVE)
}
