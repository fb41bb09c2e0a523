use std::{error::Error as StdError, path::Path};

use log::debug;
use odekit_core::TimeSeries;
use odekit_export::{ExportError, save_csv};
use odekit_observers::controllers::StopAtTime;
use odekit_solvers::{
    Rk4,
    transient::fixed_step::{Error, Solver},
};

/// A dynamical system governed by `dX/dt = f(t, X)`.
pub trait System {
    type Error: StdError + Send + Sync + 'static;

    /// Evaluates the rate of change of the state at `(t, x)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state is outside the system's domain.
    fn derivative(&self, t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error>;

    /// Returns a default set of solve parameters suited to the system.
    fn default_input(&self) -> Input;
}

/// Parameters of a single solve: initial condition, step and final time.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub t0: f64,
    pub x0: Vec<f64>,
    pub step: f64,
    pub tmax: f64,
}

impl Input {
    #[must_use]
    pub fn new(t0: f64, x0: Vec<f64>, step: f64, tmax: f64) -> Self {
        Self { t0, x0, step, tmax }
    }

    /// Sets the initial state.
    #[must_use]
    pub fn x0(self, x0: Vec<f64>) -> Self {
        Self { x0, ..self }
    }

    /// Sets the step size.
    #[must_use]
    pub fn step(self, step: f64) -> Self {
        Self { step, ..self }
    }

    /// Sets the final time.
    #[must_use]
    pub fn tmax(self, tmax: f64) -> Self {
        Self { tmax, ..self }
    }
}

/// Solves a [`System`] with RK4, stopping at `tmax` and recording every sample.
///
/// Each call to [`solve`](Self::solve) replaces the recorded series.
#[derive(Debug, Clone)]
pub struct SystemSolver<S> {
    system: S,
    solver: Solver<Rk4>,
    series: TimeSeries,
}

impl<S: System> SystemSolver<S> {
    #[must_use]
    pub fn new(system: S) -> Self {
        Self {
            system,
            solver: Solver::rk4(),
            series: TimeSeries::new(),
        }
    }

    #[must_use]
    pub fn system(&self) -> &S {
        &self.system
    }

    /// Solves the system with `input`.
    ///
    /// Returns the number of committed iterations.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the input is invalid, the derivative fails, or
    /// the run is aborted. Samples recorded before the failure are kept.
    pub fn solve(&mut self, input: &Input) -> Result<u64, Error> {
        self.series.clear();

        let system = &self.system;
        let f = |t: f64, x: &[f64]| system.derivative(t, x);
        let mut controller = StopAtTime::new(input.tmax);

        let iterations = self.solver.solve(
            &f,
            input.t0,
            &input.x0,
            input.step,
            &mut controller,
            &mut self.series,
        )?;

        debug!("number of iterations: {iterations}");
        Ok(iterations)
    }

    /// Solves the system with its [default input](System::default_input).
    ///
    /// # Errors
    ///
    /// See [`solve`](Self::solve).
    pub fn solve_default(&mut self) -> Result<u64, Error> {
        let input = self.system.default_input();
        self.solve(&input)
    }

    /// Returns the series recorded by the most recent run.
    #[must_use]
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    #[must_use]
    pub fn into_series(self) -> TimeSeries {
        self.series
    }

    /// Returns the last committed `(t, X)` of the most recent run.
    #[must_use]
    pub fn result(&self) -> Option<(f64, &[f64])> {
        self.solver.result()
    }

    /// Saves the recorded series as CSV, naming the state columns `names`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if nothing was recorded, the names do not
    /// match the state dimension, or the file cannot be written.
    pub fn save<P: AsRef<Path>, N: AsRef<str>>(
        &self,
        path: P,
        names: &[N],
    ) -> Result<(), ExportError> {
        save_csv(&self.series, path, names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use odekit_solvers::transient::fixed_step::ConfigError;

    /// Exponential decay: dx/dt = -x.
    struct Decay;

    impl System for Decay {
        type Error = Infallible;

        fn derivative(&self, _t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
            Ok(x.iter().map(|xi| -xi).collect())
        }

        fn default_input(&self) -> Input {
            Input::new(0.0, vec![1.0], 0.1, 1.0)
        }
    }

    #[test]
    fn solves_default_input() {
        let mut solver = SystemSolver::new(Decay);
        let iterations = solver.solve_default().unwrap();

        assert_eq!(iterations, 10);
        assert_eq!(solver.series().len(), 12);

        let (t, x) = solver.result().unwrap();
        assert_relative_eq!(t, 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[0], (-1.0_f64).exp(), epsilon = 1e-6);
    }

    #[test]
    fn each_solve_replaces_the_series() {
        let mut solver = SystemSolver::new(Decay);
        solver.solve_default().unwrap();

        let input = Decay.default_input().tmax(0.5);
        solver.solve(&input).unwrap();

        assert_eq!(solver.series().len(), 7);
        assert_eq!(solver.series().first().unwrap().time(), 0.0);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let mut solver = SystemSolver::new(Decay);
        let input = Decay.default_input().step(0.0);

        let err = solver.solve(&input).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::StepSize(_))));
        assert!(solver.series().is_empty());
    }

    #[test]
    fn saving_before_solving_fails() {
        let solver = SystemSolver::new(Decay);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unsolved.csv");

        let err = solver.save(&path, &["x"]).unwrap_err();
        assert!(matches!(err, ExportError::EmptySeries));
        assert!(!path.exists());
    }
}
