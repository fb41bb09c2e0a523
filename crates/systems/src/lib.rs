//! Example dynamical systems for the odekit framework.
//!
//! A [`System`] bundles a right-hand side `f(t, X)` with a sensible default
//! [`Input`] (initial condition, step and final time). [`SystemSolver`] runs a
//! system with a fixed setup: the RK4 method, a [`StopAtTime`] controller and
//! a [`TimeSeries`] recorder.
//!
//! Provided systems:
//!
//! - [`Spring`]: a damped harmonic oscillator, with its analytic solution
//! - [`Lorenz`]: the chaotic Lorenz attractor
//! - [`Laser`]: a modulated class-B laser exhibiting chaos
//! - [`WaterTank`] and [`CascadingWaterTanks`]: tanks filled at a constant rate
//!   and draining through a hole
//! - [`LotkaVolterra`]: prey/predator populations
//!
//! # Example
//!
//! ```
//! use odekit_systems::{LotkaVolterra, System, SystemSolver};
//!
//! let system = LotkaVolterra::default();
//! let input = system.default_input();
//!
//! let mut solver = SystemSolver::new(system);
//! let iterations = solver.solve(&input).unwrap();
//!
//! assert_eq!(iterations, 160);
//! assert_eq!(solver.series().len(), 162);
//! ```
//!
//! [`StopAtTime`]: odekit_observers::controllers::StopAtTime
//! [`TimeSeries`]: odekit_core::TimeSeries

mod laser;
mod lorenz;
mod lotka_volterra;
mod spring;
mod system;
mod water_tank;

pub use laser::{Laser, LaserConfigs};
pub use lorenz::Lorenz;
pub use lotka_volterra::LotkaVolterra;
pub use spring::Spring;
pub use system::{Input, System, SystemSolver};
pub use water_tank::{CascadingWaterTanks, WaterTank};
