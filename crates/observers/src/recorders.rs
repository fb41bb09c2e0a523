//! Trajectory recorders.
//!
//! The core crate already provides the no-op recorder `()`, closure
//! recorders, and the accumulating [`TimeSeries`]. This module adds recorders
//! that forward or summarize samples.
//!
//! [`TimeSeries`]: odekit_core::TimeSeries

mod every_nth;
mod log_recorder;

pub use every_nth::EveryNth;
pub use log_recorder::LogRecorder;
