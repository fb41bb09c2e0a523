//! Explicit fixed-step solvers for the odekit framework.
//!
//! - [`method`] holds the one-step algorithms ([`Euler`], [`Rk2`], [`Rk4`]) that
//!   advance a state vector by a single step of size `h`
//! - [`transient`] holds the integration loop that repeatedly applies a method,
//!   asks a [`Controller`] when to stop, and feeds a [`Recorder`]
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//!
//! use odekit_core::{ControlError, Decision, TimeSeries};
//! use odekit_solvers::transient::fixed_step::Solver;
//!
//! let decay = |_t: f64, x: &[f64]| -> Result<Vec<f64>, Infallible> { Ok(vec![-x[0]]) };
//!
//! let mut stop_at_one = |t: f64, _x: &[f64]| -> Result<Decision, ControlError> {
//!     Ok(if t > 1.0 + 1e-8 { Decision::Stop } else { Decision::Continue })
//! };
//! let mut series = TimeSeries::new();
//!
//! let mut solver = Solver::rk4();
//! let iterations = solver
//!     .solve(&decay, 0.0, &[1.0], 0.1, &mut stop_at_one, &mut series)
//!     .unwrap();
//!
//! assert_eq!(iterations, 10);
//! assert_eq!(series.len(), 12);
//! ```
//!
//! [`Controller`]: odekit_core::Controller
//! [`Recorder`]: odekit_core::Recorder

pub mod method;
pub mod transient;

pub use method::{Euler, Method, MethodKind, Rk2, Rk4};
