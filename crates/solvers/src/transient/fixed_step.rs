//! Fixed-step integration loop.
//!
//! A [`Solver`] advances an initial condition `(t0, X0)` with a constant step
//! `h` using any [`Method`], until a [`Controller`] stops the run:
//!
//! ```text
//! record(t0, X0)
//! loop:
//!     X_{n+1} = method.step(f, t_n, X_n, h)     -- failure ends the run
//!     t_{n+1} = t_n + h
//!     record(t_{n+1}, X_{n+1})
//!     controller.decide(t_{n+1}, X_{n+1})       -- error ends the run
//!                                               -- stop ends the run normally
//!     commit (t_{n+1}, X_{n+1}), iterations += 1
//! ```
//!
//! The last sample handed to the recorder on a normal stop is the one that
//! triggered the stop. It is not committed: [`Solver::result`] and the
//! returned iteration count refer to the last sample the controller accepted.
//!
//! The loop has no iteration bound of its own. A controller that never stops
//! runs forever; combine it with a bound such as a step counter when that is a
//! concern.

mod config;
mod error;

pub use config::{Config, ConfigError};
pub use error::Error;

use log::{debug, warn};
use odekit_core::{Controller, Decision, Derivative, Recorder, TimeData};

use crate::method::{Euler, Method, Rk2, Rk4};

/// A fixed-step solver driven by the step method `M`.
///
/// The solver keeps only the last committed sample of its most recent run.
/// Trajectories are captured through a [`Recorder`].
#[derive(Debug, Clone)]
pub struct Solver<M> {
    method: M,
    current: Option<TimeData>,
}

impl Solver<Euler> {
    /// Creates a solver using the explicit Euler method.
    #[must_use]
    pub fn euler() -> Self {
        Self::new(Euler)
    }
}

impl Solver<Rk2> {
    /// Creates a solver using the two-stage Runge-Kutta method.
    #[must_use]
    pub fn rk2() -> Self {
        Self::new(Rk2)
    }
}

impl Solver<Rk4> {
    /// Creates a solver using the classical fourth-order Runge-Kutta method.
    #[must_use]
    pub fn rk4() -> Self {
        Self::new(Rk4)
    }
}

impl<M: Method> Solver<M> {
    /// Creates a solver using `method`.
    #[must_use]
    pub fn new(method: M) -> Self {
        Self {
            method,
            current: None,
        }
    }

    /// Returns the step method.
    #[must_use]
    pub fn method(&self) -> &M {
        &self.method
    }

    /// Solves `dX/dt = f(t, X)` from `(t0, x0)` with step `h`.
    ///
    /// See the [module docs](self) for the exact loop. The initial condition is
    /// always recorded, even if the controller would stop immediately. `x0` is
    /// never modified.
    ///
    /// Returns the number of committed iterations: the number of steps the
    /// controller accepted beyond the initial sample.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `h` is not finite and positive, `t0` is not
    ///   finite, or `x0` is empty. Nothing is recorded.
    /// - [`Error::Evaluation`] or [`Error::Dimension`] if the derivative fails
    ///   or returns a vector of the wrong length. The failing step is not
    ///   recorded.
    /// - [`Error::Control`] if the controller reports an abnormal condition.
    ///
    /// Errors carry the iteration count reached before the failure.
    pub fn solve<F, C, R>(
        &mut self,
        f: &F,
        t0: f64,
        x0: &[f64],
        h: f64,
        controller: &mut C,
        recorder: &mut R,
    ) -> Result<u64, Error>
    where
        F: Derivative + ?Sized,
        C: Controller + ?Sized,
        R: Recorder + ?Sized,
    {
        self.current = None;

        let config = Config::new(h)?.start_at(t0)?;
        if x0.is_empty() {
            return Err(ConfigError::EmptyState.into());
        }

        debug!(
            "solving {}-dimensional system with {} from t = {} with h = {}",
            x0.len(),
            self.method.name(),
            config.start(),
            config.step(),
        );

        let mut t = config.start();
        let mut x = x0.to_vec();
        let mut iterations: u64 = 0;

        recorder.record(t, &x);

        let outcome = loop {
            let next_x = match self.method.step(f, t, &x, config.step()) {
                Ok(next_x) => next_x,
                Err(err) => break Err(Error::step(err, iterations)),
            };
            let next_t = t + config.step();

            recorder.record(next_t, &next_x);

            match controller.decide(next_t, &next_x) {
                Ok(Decision::Continue) => {}
                Ok(Decision::Stop) => break Ok(iterations),
                Err(err) => break Err(Error::control(err, iterations)),
            }

            t = next_t;
            x = next_x;
            iterations += 1;
        };

        match &outcome {
            Ok(iterations) => debug!("stopped after {iterations} iterations at t = {t}"),
            Err(err) => warn!("run aborted at t = {t}: {err}"),
        }

        self.current = Some(TimeData::new(t, x));
        outcome
    }

    /// Solves without recording the trajectory.
    ///
    /// This is a convenience wrapper around [`solve`](Self::solve) with the
    /// no-op recorder `()`.
    ///
    /// # Errors
    ///
    /// Same as [`solve`](Self::solve).
    pub fn solve_unrecorded<F, C>(
        &mut self,
        f: &F,
        t0: f64,
        x0: &[f64],
        h: f64,
        controller: &mut C,
    ) -> Result<u64, Error>
    where
        F: Derivative + ?Sized,
        C: Controller + ?Sized,
    {
        self.solve(f, t0, x0, h, controller, &mut ())
    }

    /// Returns the last committed `(t, X)` of the most recent run.
    ///
    /// After a successful run this is the last sample the controller accepted.
    /// After a failed run it is the last sample committed before the failure.
    /// Returns `None` if no run has started, or if the last run was rejected
    /// for an invalid configuration before it began.
    #[must_use]
    pub fn result(&self) -> Option<(f64, &[f64])> {
        self.current
            .as_ref()
            .map(|data| (data.time(), data.state()))
    }
}
