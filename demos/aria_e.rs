//! Example: ARIA-E Risk Time Course Under a Dosing Schedule
//!
//! Loads the amyloid-lowering antibody PK/PD model from
//! `demos/models/aldea_pkpd.txt` and simulates 840 days (120 weeks) of
//! treatment with a fixed step of 0.1 day.
//!
//! ARIA-E (amyloid-related imaging abnormality, edema type) is the main
//! dose-limiting side effect of this antibody class. The figure stacks
//! four panels over a shared weekly x-axis:
//!
//! 1. Central antibody concentration C, with the dose administrations
//!    overlaid as orange crosses (amount / 10, so a 1200 mg dose sits at
//!    y = 120 on the 0..150 axis)
//! 2. Vascular amyloid-beta burden
//! 3. Vascular wall damage
//! 4. BGTS severity score (bounded 0..30 by the saturating readout rule)
//!
//! Outputs land in `figures/` and `results/` next to the working
//! directory; both directories are created on demand.

use kinet_rs::{
    engine::{Runner, TimeGrid},
    model::load_network_file,
    output::{
        export_table_csv, plot_timecourse_panels, print_summary, CsvConfig, CsvMetadata,
        EventMarkers, FigureConfig, PanelSpec,
    },
};

use plotters::prelude::*;
use plotters::style::full_palette::LIGHTGREEN;

/// Administration days of the clinical schedule: two titration doses,
/// two intermediate doses, then 1200 mg roughly every four weeks.
const DOSE_TIMES: [f64; 21] = [
    0.0, 32.0, 56.0, 84.0, 102.0, 140.0, 280.0, 309.0, 336.0, 365.0, 420.0, 455.0, 483.0, 504.0,
    529.0, 560.0, 588.0, 616.0, 644.0, 675.0, 703.0,
];

/// Dose amounts [mg], matching `DOSE_TIMES` one-to-one.
const DOSE_AMOUNTS: [f64; 21] = [
    450.0, 450.0, 900.0, 900.0, 1200.0, 1200.0, 1200.0, 1200.0, 1200.0, 1200.0, 1200.0, 1200.0,
    1200.0, 1200.0, 1200.0, 1200.0, 1200.0, 1200.0, 1200.0, 1200.0, 1200.0,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("═══════════════════════════════════════════════════════");
    println!("  ARIA-E Case 1 - Antibody PK/PD Time Course");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Load model ======

    let mut network = load_network_file("demos/models/aldea_pkpd.txt")?;

    println!("Model      : {}", network.model_name().unwrap_or("unnamed"));
    println!("Species    : {:?}", network.species_ids());
    println!("Parameters : {:?}\n", network.parameter_ids());

    // ====== Simulation configuration ======

    let total_time = 840.0; // days (120 weeks)
    let dt = 0.1;
    let grid = TimeGrid::with_step_size(0.0, total_time, dt)?;

    println!("Simulation:");
    println!("  Total time : {} days ({} weeks)", total_time, total_time / 7.0);
    println!("  dt         : {} days", dt);
    println!("  Steps      : {}\n", grid.steps());

    // ====== Run ======

    let runner = Runner::default();
    let table = runner.run(
        &mut network,
        &grid,
        Some(&["time", "C", "A_beta", "VWD", "BGTS"]),
    )?;

    println!("Rows       : {}", table.n_rows());
    println!("Columns    : {:?}\n", table.column_names());

    // ====== Figure: four stacked panels over a weekly axis ======

    let doses = EventMarkers::doses(&DOSE_TIMES, &DOSE_AMOUNTS, 0.1);

    let panels = vec![
        PanelSpec::new("C", "PK [mcg/ml]")
            .color(MAGENTA)
            .y_range(0.0, 150.0)
            .y_ticks(3)
            .label("Serum concentration")
            .markers(doses),
        PanelSpec::new("A_beta", "Vascular amyloid [a.u.]")
            .color(LIGHTGREEN)
            .y_range(0.0, 5.0),
        PanelSpec::new("VWD", "Wall damage [a.u.]")
            .color(RED)
            .y_range(0.0, 1.0),
        PanelSpec::new("BGTS", "BGTS score")
            .color(CYAN)
            .y_range(0.0, 30.0),
    ];

    let mut figure = FigureConfig::default();
    figure.title = "ARIA-E case 1".to_string();
    figure.xlabel = "Weeks since first dose".to_string();
    figure.x_scale = 7.0; // simulate in days, display in weeks
    figure.x_range = Some((0.0, 120.0));
    figure.n_x_ticks = 11; // 0, 12, 24, ... 120

    let figure_path = "figures/aldea_timecourse.png";
    plot_timecourse_panels(&table, &panels, figure_path, Some(&figure))?;
    println!("Figure written to {}", figure_path);

    // ====== CSV export ======

    let metadata = CsvMetadata::from_run(
        network.model_name().unwrap_or("unnamed"),
        runner.solver_name(),
        total_time,
        grid.steps(),
    );
    let csv_config = CsvConfig::default().with_metadata(metadata);

    let csv_path = "results/aldea_timecourse.csv";
    export_table_csv(&table, csv_path, Some(&csv_config))?;
    println!("Data written to {}\n", csv_path);

    // ====== Summary ======

    print_summary(&table)?;

    Ok(())
}
