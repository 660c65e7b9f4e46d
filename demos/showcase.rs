use std::io::BufRead;
use std::path::Path;

use pncl::{GridSpec, Pencil, PencilConfig, PlotArgs};

// Walkthrough of every plot kind and every kind of update.
//
// Usage:
//   cargo run --example showcase -- [config.yaml]
//
// Opens the page in the default browser, then waits for Enter between steps:
//   1. create one plot of each kind on a fixed [2, 4, 1] grid
//   2. push a point to the line and bar plots
//   3. refresh the radar plot with new data
//   4. switch to a dynamic grid of 3 columns
// The page stays live after the last step until Ctrl+C.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => PencilConfig::load_from_path(Path::new(&path))?,
        None => PencilConfig {
            grid: GridSpec::Fixed(vec![2, 4, 1]),
            ..Default::default()
        },
    };
    let mut p = Pencil::new(config)?;
    if let Err(err) = p.open_in_browser() {
        eprintln!("[showcase] {err}; open {} manually", p.endpoint(""));
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut wait = |step: &str| {
        eprintln!("[showcase] Press Enter to {step}");
        lines.next();
    };

    wait("create the plots");
    let x: Vec<f64> = (0..10).map(f64::from).collect();
    let squares: Vec<f64> = x.iter().map(|v| v * v).collect();
    let cubes: Vec<f64> = x.iter().map(|v| v * v * v / 10.0).collect();
    let line = p.line(
        PlotArgs::xy(x.clone(), squares.clone())
            .with_series(cubes)
            .with_labels(["x²", "x³/10"])
            .with_x_label("x")
            .with_y_label("f(x)"),
    )?;
    let bar = p.bar(PlotArgs::y(squares.clone()).with_labels(["Squares"]))?;
    let radar = p.radar(
        PlotArgs::xy(["speed", "range", "armor", "cost", "agility"], [4.0, 2.0, 5.0, 3.0, 1.0])
            .with_labels(["Tank"]),
    )?;
    p.pie(PlotArgs::xy(["red", "green", "blue"], [3.0, 5.0, 2.0]))?;
    p.doughnut(PlotArgs::xy(["yes", "no", "maybe"], [12.0, 7.0, 4.0]))?;
    p.polar_area(PlotArgs::xy(["N", "E", "S", "W"], [8.0, 3.0, 6.0, 2.0]))?;
    p.scatter(PlotArgs::xy([0.5, 1.5, 2.0, 3.2, 4.1], [1.0, 0.2, 2.5, 1.8, 3.9]).with_labels(["Samples"]))?;

    wait("push new points");
    p.push(line, [10.0, 100.0, 100.0])?;
    p.push(bar, [100.0])?;

    wait("refresh the radar plot");
    p.refresh(
        radar,
        PlotArgs::xy(["speed", "range", "armor", "cost", "agility"], [1.0, 5.0, 2.0, 4.0, 5.0])
            .with_series([3.0, 3.0, 3.0, 3.0, 3.0])
            .with_labels(["Scout", "Average"]),
    )?;

    wait("switch to 3 columns");
    p.set_grid(GridSpec::Dynamic(3))?;

    // Dropping `p` keeps serving while keep_alive is set.
    Ok(())
}
