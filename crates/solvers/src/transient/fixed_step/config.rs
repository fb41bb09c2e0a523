use thiserror::Error;

/// Validated step size and start time for a fixed-step run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    step: f64,
    start: f64,
}

/// Errors that can occur when validating a fixed-step run configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("step size must be finite and positive, got {0}")]
    StepSize(f64),

    #[error("start time must be finite, got {0}")]
    StartTime(f64),

    #[error("initial state must have at least one component")]
    EmptyState,
}

impl Config {
    /// Creates a config with the given step size, starting at `t = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StepSize`] if `step` is zero, negative, or not
    /// finite.
    pub fn new(step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::StepSize(step));
        }

        Ok(Self { step, start: 0.0 })
    }

    /// Sets the start time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StartTime`] if `start` is not finite.
    pub fn start_at(self, start: f64) -> Result<Self, ConfigError> {
        if !start.is_finite() {
            return Err(ConfigError::StartTime(start));
        }

        Ok(Self { start, ..self })
    }

    /// Returns the step size.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the start time.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }
}
