use std::error::Error as StdError;

use odekit_core::ControlError;

use super::ConfigError;
use crate::method::StepError;

/// Errors that can occur during fixed-step integration.
///
/// Every variant except [`Error::Config`] carries the number of iterations
/// committed before the failure; see [`Error::iterations`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("derivative failed after {iterations} iterations: {source}")]
    Evaluation {
        iterations: u64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error(
        "derivative returned {found} components for a state of dimension {expected} after {iterations} iterations"
    )]
    Dimension {
        iterations: u64,
        expected: usize,
        found: usize,
    },

    #[error("controller aborted after {iterations} iterations: {source}")]
    Control {
        iterations: u64,
        #[source]
        source: ControlError,
    },
}

impl Error {
    /// Returns the number of iterations committed before the error.
    #[must_use]
    pub fn iterations(&self) -> u64 {
        match self {
            Self::Config(_) => 0,
            Self::Evaluation { iterations, .. }
            | Self::Dimension { iterations, .. }
            | Self::Control { iterations, .. } => *iterations,
        }
    }

    pub(crate) fn step<E: StdError + Send + Sync + 'static>(
        err: StepError<E>,
        iterations: u64,
    ) -> Self {
        match err {
            StepError::Derivative(source) => Self::Evaluation {
                iterations,
                source: Box::new(source),
            },
            StepError::Dimension { expected, found } => Self::Dimension {
                iterations,
                expected,
                found,
            },
        }
    }

    pub(crate) fn control(source: ControlError, iterations: u64) -> Self {
        Self::Control { iterations, source }
    }
}
