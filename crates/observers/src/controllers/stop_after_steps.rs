use odekit_core::{ControlError, Controller, Decision};

/// Stops after a fixed number of controller checks.
///
/// The solver checks its controller once per computed step, so
/// `StopAfterSteps::new(n)` lets a run commit `n - 1` steps and stops on the
/// `n`-th. Pair it with [`AnyOf`](super::AnyOf) to put an upper bound on runs
/// whose other stop conditions might never trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAfterSteps {
    limit: u64,
    seen: u64,
}

impl StopAfterSteps {
    #[must_use]
    pub fn new(limit: u64) -> Self {
        Self { limit, seen: 0 }
    }

    /// Returns the number of checks performed so far.
    #[must_use]
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Resets the counter so the controller can be reused for another run.
    pub fn reset(&mut self) {
        self.seen = 0;
    }
}

impl Controller for StopAfterSteps {
    fn decide(&mut self, _t: f64, _x: &[f64]) -> Result<Decision, ControlError> {
        self.seen += 1;
        if self.seen >= self.limit {
            Ok(Decision::Stop)
        } else {
            Ok(Decision::Continue)
        }
    }
}
