//! Shared fixtures for the workspace integration tests.

use odekit_core::{ControlError, Decision, TimeSeries};

/// A controller that stops at the first check.
pub fn always_stop(_t: f64, _x: &[f64]) -> Result<Decision, ControlError> {
    Ok(Decision::Stop)
}

/// A controller that never stops.
pub fn never_stop(_t: f64, _x: &[f64]) -> Result<Decision, ControlError> {
    Ok(Decision::Continue)
}

/// A controller that always reports an abnormal condition.
pub fn always_fail(t: f64, x: &[f64]) -> Result<Decision, ControlError> {
    Err(ControlError::Diverged {
        t,
        index: 0,
        value: x.first().copied().unwrap_or(f64::NAN),
    })
}

/// Returns the largest absolute difference between the first state component
/// of `series` and `exact` evaluated at the same times.
pub fn max_error(series: &TimeSeries, exact: impl Fn(f64) -> f64) -> f64 {
    series
        .iter()
        .map(|data| (data.state()[0] - exact(data.time())).abs())
        .fold(0.0, f64::max)
}
