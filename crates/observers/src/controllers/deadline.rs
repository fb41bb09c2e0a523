use std::time::{Duration, Instant};

use odekit_core::{ControlError, Controller, Decision};

/// Aborts a run that exceeds a wall-clock budget.
///
/// The clock starts at the first check, so a `Deadline` can be built ahead of
/// the run. Exceeding the budget is reported as [`ControlError::Timeout`].
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    limit: Duration,
    started: Option<Instant>,
}

impl Deadline {
    #[must_use]
    pub fn after(limit: Duration) -> Self {
        Self {
            limit,
            started: None,
        }
    }

    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Controller for Deadline {
    fn decide(&mut self, t: f64, _x: &[f64]) -> Result<Decision, ControlError> {
        let started = *self.started.get_or_insert_with(Instant::now);
        if started.elapsed() > self.limit {
            return Err(ControlError::Timeout {
                t,
                limit: self.limit,
            });
        }
        Ok(Decision::Continue)
    }
}
