use std::{error::Error as StdError, time::Duration};

use thiserror::Error;

/// Outcome of a controller check that did not detect an abnormal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// Keep integrating.
    Continue,

    /// Terminate the run normally.
    Stop,
}

impl Decision {
    /// Returns `true` if this decision terminates the run.
    #[must_use]
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }
}

/// Abnormal conditions reported by a [`Controller`].
///
/// A control error always terminates the run, independently of any
/// [`Decision`] the controller would otherwise have made.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("state component {index} diverged to {value} at t = {t}")]
    Diverged { t: f64, index: usize, value: f64 },

    #[error("state component {index} = {value} left its domain at t = {t}")]
    OutOfDomain { t: f64, index: usize, value: f64 },

    #[error("wall-clock limit of {limit:?} exceeded at t = {t}")]
    Timeout { t: f64, limit: Duration },

    #[error("{0}")]
    Other(#[source] Box<dyn StdError + Send + Sync>),
}

impl ControlError {
    /// Wraps an arbitrary error or message as a control error.
    pub fn other<E: Into<Box<dyn StdError + Send + Sync>>>(err: E) -> Self {
        Self::Other(err.into())
    }
}

/// Decides whether an integration run has reached a terminal condition.
///
/// A controller is evaluated by the solver after each accepted step, with the
/// newly computed time and state. It returns:
///
/// - `Ok(Decision::Continue)` to keep going,
/// - `Ok(Decision::Stop)` to stop normally (e.g. the final time is reached),
/// - `Err(ControlError)` to abort on an abnormal condition (e.g. divergence).
///
/// Controllers take `&mut self` so they may keep state between calls, such as
/// a step counter or a start instant.
///
/// Closures with the signature
/// `FnMut(f64, &[f64]) -> Result<Decision, ControlError>` implement this trait.
pub trait Controller {
    /// Checks the latest `(t, x)` sample.
    ///
    /// # Errors
    ///
    /// Returns a [`ControlError`] if an abnormal condition is detected.
    fn decide(&mut self, t: f64, x: &[f64]) -> Result<Decision, ControlError>;
}

impl<F> Controller for F
where
    F: FnMut(f64, &[f64]) -> Result<Decision, ControlError>,
{
    fn decide(&mut self, t: f64, x: &[f64]) -> Result<Decision, ControlError> {
        self(t, x)
    }
}
