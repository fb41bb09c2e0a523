//! Stop controllers.
//!
//! Each controller implements [`Controller`] and can be used alone or
//! combined with [`AnyOf`], which lets a time limit and a divergence guard
//! run side by side without the solver knowing about either.
//!
//! ```
//! use odekit_observers::controllers::{AnyOf, DomainGuard, StopAtTime};
//!
//! let controller = AnyOf::new()
//!     .with(DomainGuard::new().bounded(1e6))
//!     .with(StopAtTime::new(10.0));
//! # let _ = controller;
//! ```
//!
//! [`Controller`]: odekit_core::Controller

mod any_of;
mod deadline;
mod domain_guard;
mod stop_after_steps;
mod stop_at_time;

pub use any_of::AnyOf;
pub use deadline::Deadline;
pub use domain_guard::DomainGuard;
pub use stop_after_steps::StopAfterSteps;
pub use stop_at_time::StopAtTime;
