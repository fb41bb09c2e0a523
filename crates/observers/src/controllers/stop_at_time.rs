use odekit_core::{ControlError, Controller, Decision};

/// Stops once time exceeds `tmax`.
///
/// `tmax` itself is a valid time: a step landing on `tmax` continues and
/// becomes the last committed sample. Time accumulates rounding drift over
/// many steps, so a sample is only considered past `tmax` when it exceeds it
/// by at least the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopAtTime {
    tmax: f64,
    tolerance: f64,
}

impl StopAtTime {
    /// Tolerance used by [`StopAtTime::new`].
    pub const DEFAULT_TOLERANCE: f64 = 1e-8;

    /// Creates a controller stopping after `tmax` with the default tolerance.
    #[must_use]
    pub fn new(tmax: f64) -> Self {
        Self {
            tmax,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }

    /// Replaces the tolerance.
    ///
    /// The absolute value of `tolerance` is used.
    #[must_use]
    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
            ..self
        }
    }

    /// Returns the final time.
    #[must_use]
    pub fn tmax(&self) -> f64 {
        self.tmax
    }

    /// Returns the tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Controller for StopAtTime {
    fn decide(&mut self, t: f64, _x: &[f64]) -> Result<Decision, ControlError> {
        if t <= self.tmax || (t - self.tmax).abs() < self.tolerance {
            Ok(Decision::Continue)
        } else {
            Ok(Decision::Stop)
        }
    }
}
