//! Core traits and types for the odekit framework.
//!
//! This crate defines the shared abstractions that step methods, solvers,
//! controllers, and recorders build on:
//!
//! - [`Derivative`] is the right-hand side `f(t, X)` of `dX/dt = f(t, X)`
//! - [`Controller`] decides after each step whether integration continues
//! - [`Recorder`] receives every accepted `(t, X)` sample of a run
//! - [`TimeData`] and [`TimeSeries`] hold owned trajectory samples
//!
//! # Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for the trajectory types and
//!   [`Decision`].

mod controller;
mod derivative;
mod recorder;
mod series;

pub use controller::{ControlError, Controller, Decision};
pub use derivative::{Derivative, DomainError};
pub use recorder::Recorder;
pub use series::{TimeData, TimeSeries};
