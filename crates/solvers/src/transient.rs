//! Solvers for transient problems: integrating `dX/dt = f(t, X)` forward in
//! time from an initial condition.
//!
//! # Solvers
//!
//! - [`fixed_step`] repeatedly applies a [`Method`] with a constant step
//!   size until a [`Controller`] stops the run
//!
//! [`Method`]: crate::Method
//! [`Controller`]: odekit_core::Controller

pub mod fixed_step;
