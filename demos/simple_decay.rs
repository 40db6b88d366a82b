//! Example: First-Order Decay - Euler vs RK4
//!
//! Simulates the canonical two-species network
//!
//! ```text
//! S1 -> S2,  v = k1 * S1,  k1 = 0.1,  S1(0) = 10
//! ```
//!
//! over t = 0..50 with 100 output steps and compares the two fixed-step
//! solvers against the analytical solution S1(t) = 10·exp(-0.1·t).
//!
//! Also demonstrates mass conservation: the network only moves material
//! from S1 to S2, so S1 + S2 stays at 10 for every row.

use kinet_rs::{
    engine::{EulerSolver, RK4Solver, Runner, Solver, TimeGrid},
    model::load_network,
    output::{plot_timecourse, print_summary, PlotConfig},
};

const MODEL: &str = "
    model simple_decay
      S1 -> S2; k1 * S1
      k1 = 0.1
      S1 = 10
    end
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("═══════════════════════════════════════════════════════");
    println!("  First-Order Decay - Solver Comparison");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Time grid ======

    let total_time = 50.0;
    let time_steps = 100;
    let grid = TimeGrid::with_steps(0.0, total_time, time_steps)?;

    println!("Simulation:");
    println!("  Total time : {} ", total_time);
    println!("  Time steps : {}", time_steps);
    println!("  dt         : {:.4}\n", grid.dt());

    // ====== Run with both solvers ======

    let solvers: Vec<Box<dyn Solver>> = vec![
        Box::new(EulerSolver::new()),
        Box::new(RK4Solver::new()),
    ];

    let exact = 10.0 * (-0.1_f64 * total_time).exp();
    println!("Analytical S1({}) = {:.6}\n", total_time, exact);

    println!("{:<16} {:>12} {:>12} {:>12}", "Solver", "S1(final)", "Error", "S1+S2");
    println!("{:-<56}", "");

    let mut last_table = None;
    for solver in solvers {
        let mut network = load_network(MODEL)?;
        let solver_name = solver.name().to_string();

        let table = Runner::new(solver).run(&mut network, &grid, None)?;

        let s1_final = table.final_value("S1")?;
        let s2_final = table.final_value("S2")?;

        println!(
            "{:<16} {:>12.6} {:>12.2e} {:>12.6}",
            solver_name,
            s1_final,
            (s1_final - exact).abs(),
            s1_final + s2_final
        );

        last_table = Some(table);
    }

    // ====== Plot and summary (RK4 run) ======

    let table = last_table.expect("at least one solver ran");

    let tmp_dir = std::env::temp_dir();
    let plot_path = tmp_dir.join("simple_decay.png");
    let config = PlotConfig::timecourse("First-order decay: S1 -> S2");
    plot_timecourse(&table, &["S1", "S2"], &plot_path, Some(&config))?;

    println!("\nPlot written to {:?}\n", plot_path);

    print_summary(&table)?;

    Ok(())
}
