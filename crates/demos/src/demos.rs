use std::{
    convert::Infallible,
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use log::{Level, info};
use odekit_core::{Recorder, TimeSeries};
use odekit_export::{PlotScript, save_csv, save_csv_default};
use odekit_observers::{
    controllers::{AnyOf, DomainGuard, StopAtTime},
    recorders::{EveryNth, LogRecorder},
};
use odekit_solvers::{MethodKind, transient::fixed_step::Solver};
use odekit_systems::{
    CascadingWaterTanks, LaserConfigs, Lorenz, LotkaVolterra, Spring, System, SystemSolver,
    WaterTank,
};

type DemoResult = Result<(), Box<dyn Error>>;

/// A named demonstration.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn(&Context) -> DemoResult,
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "spring01",
        description: "damped spring solved with a plain closure and the Euler method",
        run: spring01,
    },
    Demo {
        name: "spring02",
        description: "damped spring solved as a system with the RK2 method",
        run: spring02,
    },
    Demo {
        name: "spring03",
        description: "damped spring with Euler, RK2 and RK4 compared to the analytic solution",
        run: spring03,
    },
    Demo {
        name: "lorenz",
        description: "orbit on the chaotic Lorenz attractor",
        run: lorenz,
    },
    Demo {
        name: "laser01",
        description: "chaotic dynamics of a modulated laser",
        run: laser01,
    },
    Demo {
        name: "laser02",
        description: "first return map of the chaotic laser",
        run: laser02,
    },
    Demo {
        name: "watertank",
        description: "water tank filled in and draining out",
        run: watertank,
    },
    Demo {
        name: "cwatertank",
        description: "cascade of water tanks, each draining into the next",
        run: cwatertank,
    },
    Demo {
        name: "volterra",
        description: "Lotka-Volterra model of prey and predator populations",
        run: volterra,
    },
];

/// Returns the demo called `name`.
pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

/// Where demo output goes and whether to plot it.
#[derive(Debug, Clone)]
pub struct Context {
    dir: PathBuf,
    plot: bool,
}

impl Context {
    pub fn new(dir: PathBuf, plot: bool) -> Self {
        Self { dir, plot }
    }

    /// Creates the output directory if needed.
    pub fn prepare(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Returns the path of the data file `out.<stem>.csv`.
    fn csv(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("out.{stem}.csv"))
    }

    /// Writes the plot script for `demo` and runs it when plotting was requested.
    fn finish(&self, demo: &str, script: PlotScript) -> DemoResult {
        let path = self.dir.join(format!("out.{demo}_plot.py"));
        script.write(&path)?;

        if self.plot {
            PlotScript::execute(&path)?;
        }
        Ok(())
    }
}

fn log_result(solver_result: Option<(f64, &[f64])>, names: &[&str]) {
    if let Some((t, x)) = solver_result {
        let state: Vec<String> = names
            .iter()
            .zip(x)
            .map(|(name, value)| format!("{name}: {value:.4}"))
            .collect();
        info!("t: {t:.2}, {}", state.join(", "));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// --- Spring ------------------------------------------------------------------

/// Solves the damped spring from a closure, with the Euler method.
fn spring01(context: &Context) -> DemoResult {
    let (k, m, a) = (2.0, 1.0, 0.1);
    let f = |_t: f64, x: &[f64]| -> Result<Vec<f64>, Infallible> {
        let (position, velocity) = (x[0], x[1]);
        Ok(vec![velocity, -position * k / m - velocity * a / m])
    };

    // Euler needs a finer step than the Runge-Kutta methods.
    let mut solver = Solver::euler();
    let mut series = TimeSeries::new();
    let iterations = solver.solve(
        &f,
        0.0,
        &[0.5, 0.0],
        0.01,
        &mut StopAtTime::new(60.0),
        &mut series,
    )?;

    info!("problem solved in {iterations} iterations");
    log_result(solver.result(), &["x", "v"]);

    let csv = context.csv("spring01_data");
    save_csv(&series, &csv, &["x", "v"])?;

    let csv = file_name(&csv);
    let script = PlotScript::new()
        .timeseries(&csv, &["x", "v"], false)
        .diagram_2d(&csv, "x", "v");
    context.finish("spring01", script)
}

/// Solves the [`Spring`] system with the RK2 method.
fn spring02(context: &Context) -> DemoResult {
    let spring = Spring::default();
    let f = |t: f64, x: &[f64]| spring.derivative(t, x);

    let input = spring.default_input().step(0.1);
    let mut solver = Solver::rk2();
    let mut series = TimeSeries::new();
    let iterations = solver.solve(
        &f,
        input.t0,
        &input.x0,
        input.step,
        &mut StopAtTime::new(input.tmax),
        &mut series,
    )?;

    info!("problem solved in {iterations} iterations");
    log_result(solver.result(), &["x", "v"]);

    let csv = context.csv("spring02_data");
    save_csv(&series, &csv, &["x", "v"])?;

    let csv = file_name(&csv);
    let script = PlotScript::new()
        .timeseries(&csv, &["x", "v"], false)
        .diagram_2d(&csv, "x", "v");
    context.finish("spring02", script)
}

/// Compares each method against the analytic position of a spring released
/// from rest.
fn spring03(context: &Context) -> DemoResult {
    let spring = Spring::new(1.4, 1.0, 0.1);
    let f = |t: f64, x: &[f64]| spring.derivative(t, x);
    let input = spring.default_input();
    let x0 = input.x0[0];

    let mut positions = Vec::new();
    let mut reference = TimeSeries::new();

    for kind in [MethodKind::Euler, MethodKind::Rk2, MethodKind::Rk4] {
        let mut series = TimeSeries::new();
        Solver::new(kind).solve(
            &f,
            input.t0,
            &input.x0,
            input.step,
            &mut StopAtTime::new(input.tmax),
            &mut series,
        )?;
        save_csv_default(&series, context.csv(&format!("spring03_simulation_{kind}")))?;

        if reference.is_empty() {
            for time in series.times() {
                reference.push(time, vec![spring.analytic_position(x0, time)]);
            }
            save_csv_default(&reference, context.csv("spring03_analytic"))?;
        }
        positions.push(series.column(0));
    }

    let mut comparison = TimeSeries::new();
    for (i, data) in reference.iter().enumerate() {
        let exact = data.state()[0];
        let simulated: Vec<f64> = positions.iter().map(|column| column[i]).collect();

        let mut row = vec![exact];
        row.extend(&simulated);
        row.extend(simulated.iter().map(|x| (x - exact).powi(2)));
        comparison.push(data.time(), row);
    }

    for (kind, index) in [("euler", 4), ("rk2", 5), ("rk4", 6)] {
        let worst = comparison.column(index).into_iter().fold(0.0, f64::max);
        info!("largest squared error with {kind}: {worst:.3e}");
    }

    let names = ["xref", "xeuler", "xrk2", "xrk4", "deuler", "drk2", "drk4"];
    let csv = context.csv("spring03_data");
    save_csv(&comparison, &csv, &names)?;

    let csv = file_name(&csv);
    let script = PlotScript::new()
        .timeseries(&csv, &["xref", "xeuler", "xrk2", "xrk4"], false)
        .timeseries(&csv, &["deuler", "drk2", "drk4"], false)
        .timeseries(&csv, &["drk2", "drk4"], false);
    context.finish("spring03", script)
}

// --- Chaotic systems ---------------------------------------------------------

/// Traces the Lorenz attractor, logging every hundredth sample at debug level.
fn lorenz(context: &Context) -> DemoResult {
    let lorenz = Lorenz::default();
    let f = |t: f64, x: &[f64]| lorenz.derivative(t, x);
    let input = lorenz.default_input();

    let mut series = TimeSeries::new();
    let mut trace = EveryNth::new(100, LogRecorder::new().at_level(Level::Debug));
    let mut recorder = |t: f64, x: &[f64]| {
        series.record(t, x);
        trace.record(t, x);
    };

    let mut solver = Solver::rk4();
    let iterations = solver.solve(
        &f,
        input.t0,
        &input.x0,
        input.step,
        &mut StopAtTime::new(input.tmax),
        &mut recorder,
    )?;

    info!("problem solved in {iterations} iterations");
    log_result(solver.result(), &["x", "y", "z"]);

    let csv = context.csv("lorenz_data");
    save_csv(&series, &csv, &["x", "y", "z"])?;

    let script = PlotScript::new().diagram_3d(file_name(&csv), "x", "y", "z");
    context.finish("lorenz", script)
}

/// Simulates the laser in its chaotic regime.
fn laser01(context: &Context) -> DemoResult {
    let configs = LaserConfigs::standard();
    let laser = *configs.get("chaos").ok_or("missing laser configuration `chaos`")?;

    let mut solver = SystemSolver::new(laser);
    solver.solve_default()?;

    let csv = context.csv("laser01_data");
    solver.save(&csv, &["L", "D", "Z"])?;

    let script = PlotScript::new().timeseries(file_name(&csv), &["L", "D"], true);
    context.finish("laser01", script)
}

/// Builds the first return map of the chaotic laser.
fn laser02(context: &Context) -> DemoResult {
    let configs = LaserConfigs::standard();
    let laser = *configs.get("chaos").ok_or("missing laser configuration `chaos`")?;

    let x0 = laser.default_input().x0;
    let map = laser.first_return_map(&x0, 100.0, 10_000)?;

    let csv = context.csv("laser02_data");
    save_csv(&map, &csv, &["L", "D", "Z"])?;

    let script = PlotScript::new().first_return_map(file_name(&csv), "L", "D");
    context.finish("laser02", script)
}

// --- Water tanks and populations ---------------------------------------------

fn watertank(context: &Context) -> DemoResult {
    let mut solver = SystemSolver::new(WaterTank::default());
    solver.solve_default()?;

    let csv = context.csv("watertank_data");
    solver.save(&csv, &["h"])?;

    let script = PlotScript::new().timeseries(file_name(&csv), &["h"], false);
    context.finish("watertank", script)
}

fn cwatertank(context: &Context) -> DemoResult {
    let cascade = CascadingWaterTanks::default();
    let names = cascade.names();

    let mut solver = SystemSolver::new(cascade);
    solver.solve_default()?;

    let csv = context.csv("cwatertank_data");
    solver.save(&csv, &names)?;

    let script = PlotScript::new().timeseries(file_name(&csv), &names, false);
    context.finish("cwatertank", script)
}

/// Solves the prey/predator model, aborting if a population dies out.
fn volterra(context: &Context) -> DemoResult {
    let system = LotkaVolterra::default();
    let f = |t: f64, x: &[f64]| system.derivative(t, x);
    let input = system.default_input();

    let mut controller = AnyOf::new()
        .with(DomainGuard::new().strict_floor(0.0))
        .with(StopAtTime::new(input.tmax));
    let mut series = TimeSeries::new();

    Solver::rk4().solve(
        &f,
        input.t0,
        &input.x0,
        input.step,
        &mut controller,
        &mut series,
    )?;

    let csv = context.csv("volterra_data");
    save_csv(&series, &csv, &["x", "y"])?;

    let csv = file_name(&csv);
    let script = PlotScript::new()
        .timeseries(&csv, &["x", "y"], true)
        .diagram_2d(&csv, "x", "y");
    context.finish("volterra", script)
}
