use thiserror::Error;

/// The right-hand side of an ODE system `dX/dt = f(t, X)`.
///
/// A derivative maps a time `t` and a state vector `x` to the rate of change
/// of that state. The returned vector must have the same length as `x`.
///
/// Implementations should be referentially transparent in `t` and `x`, so that
/// repeated solves with the same inputs produce identical trajectories.
///
/// Even though the derivative represents a mathematical function, it may fail,
/// for example when a forbidden operation is reached (division by zero, square
/// root of a negative number, etc.). Solvers treat any failure as fatal to the
/// current run.
///
/// Closures with the signature `Fn(f64, &[f64]) -> Result<Vec<f64>, E>`
/// implement this trait directly:
///
/// ```
/// use std::convert::Infallible;
/// use odekit_core::Derivative;
///
/// let decay = |_t: f64, x: &[f64]| -> Result<Vec<f64>, Infallible> {
///     Ok(vec![-0.5 * x[0]])
/// };
///
/// assert_eq!(decay.evaluate(0.0, &[2.0]).unwrap(), vec![-1.0]);
/// ```
pub trait Derivative {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates `dX/dt` at time `t` and state `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be evaluated at
    /// `(t, x)`.
    fn evaluate(&self, t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error>;
}

impl<F, E> Derivative for F
where
    F: Fn(f64, &[f64]) -> Result<Vec<f64>, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn evaluate(&self, t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        self(t, x)
    }
}

/// A mathematically invalid operation inside a derivative evaluation.
///
/// Derivative implementations can use this type when they have no error type
/// of their own.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("division by zero at t = {t}")]
    DivisionByZero { t: f64 },

    #[error("logarithm of non-positive value {value} at t = {t}")]
    NonPositiveLog { t: f64, value: f64 },

    #[error("square root of negative value {value} at t = {t}")]
    NegativeSqrt { t: f64, value: f64 },

    #[error("non-finite value {value} at t = {t}")]
    NonFinite { t: f64, value: f64 },

    #[error("expected a state of length {expected}, got {found}")]
    Dimension { expected: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    struct Decay {
        rate: f64,
    }

    impl Derivative for Decay {
        type Error = Infallible;

        fn evaluate(&self, _t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
            Ok(x.iter().map(|xi| -self.rate * xi).collect())
        }
    }

    #[test]
    fn struct_derivative() {
        let f = Decay { rate: 2.0 };
        assert_eq!(f.evaluate(0.0, &[1.0, -3.0]).unwrap(), vec![-2.0, 6.0]);
    }

    #[test]
    fn closure_derivative_can_fail() {
        let f = |t: f64, x: &[f64]| {
            if x[0] <= 0.0 {
                Err(DomainError::NonPositiveLog { t, value: x[0] })
            } else {
                Ok(vec![x[0].ln()])
            }
        };

        assert!(f.evaluate(0.0, &[1.0]).is_ok());
        assert_eq!(
            f.evaluate(1.5, &[0.0]),
            Err(DomainError::NonPositiveLog { t: 1.5, value: 0.0 })
        );
    }

    #[test]
    fn domain_error_messages() {
        let err = DomainError::DivisionByZero { t: 2.0 };
        assert_eq!(err.to_string(), "division by zero at t = 2");

        let err = DomainError::Dimension {
            expected: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "expected a state of length 2, got 1");
    }
}
