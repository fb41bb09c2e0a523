//! Reusable controllers and recorders for the odekit framework.
//!
//! # Modules
//!
//! - [`controllers`] provides stop policies: a time limit ([`StopAtTime`]), an
//!   iteration bound ([`StopAfterSteps`]), a wall-clock bound ([`Deadline`]),
//!   a divergence guard ([`DomainGuard`]), and the aggregate [`AnyOf`]
//! - [`recorders`] provides trajectory sinks beyond the core ones: [`LogRecorder`]
//!   and the decimating [`EveryNth`]
//!
//! [`StopAtTime`]: controllers::StopAtTime
//! [`StopAfterSteps`]: controllers::StopAfterSteps
//! [`Deadline`]: controllers::Deadline
//! [`DomainGuard`]: controllers::DomainGuard
//! [`AnyOf`]: controllers::AnyOf
//! [`LogRecorder`]: recorders::LogRecorder
//! [`EveryNth`]: recorders::EveryNth

pub mod controllers;
pub mod recorders;
