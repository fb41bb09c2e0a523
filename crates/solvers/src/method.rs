//! One-step integration methods.
//!
//! A [`Method`] computes `X(t + h)` from `X(t)`, `t`, `h`, and a
//! [`Derivative`]. Methods are stateless strategy objects: they never mutate
//! the input state, allocate and return a new vector, and commit nothing when
//! any derivative evaluation fails.
//!
//! | Method    | Evaluations per step | Local error | Global error |
//! |-----------|----------------------|-------------|--------------|
//! | [`Euler`] | 1                    | O(h²)       | O(h)         |
//! | [`Rk2`]   | 2                    | O(h³)       | O(h²)        |
//! | [`Rk4`]   | 4                    | O(h⁵)       | O(h⁴)        |

mod euler;
mod kind;
mod rk2;
mod rk4;

pub use euler::Euler;
pub use kind::{MethodKind, UnknownMethod};
pub use rk2::Rk2;
pub use rk4::Rk4;

use odekit_core::Derivative;
use thiserror::Error;

/// Advances a state vector by one step.
pub trait Method {
    /// A short, human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Number of derivative evaluations performed by one step.
    fn evaluations(&self) -> usize;

    /// Computes the state at `t + h` from the state `x` at `t`.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if any derivative evaluation fails or returns a
    /// vector whose length differs from `x`.
    fn step<F>(&self, f: &F, t: f64, x: &[f64], h: f64) -> Result<Vec<f64>, StepError<F::Error>>
    where
        F: Derivative + ?Sized;
}

/// Errors that can occur while computing one step.
#[derive(Debug, Error, PartialEq)]
pub enum StepError<E> {
    #[error(transparent)]
    Derivative(E),

    #[error("derivative has {found} components, expected {expected}")]
    Dimension { expected: usize, found: usize },
}

/// Evaluates `f(t, x)` and checks that the slope matches the state dimension.
fn slope<F>(f: &F, t: f64, x: &[f64]) -> Result<Vec<f64>, StepError<F::Error>>
where
    F: Derivative + ?Sized,
{
    let slope = f.evaluate(t, x).map_err(StepError::Derivative)?;
    if slope.len() != x.len() {
        return Err(StepError::Dimension {
            expected: x.len(),
            found: slope.len(),
        });
    }
    Ok(slope)
}

/// Returns `x + scale * dx`, component by component.
fn offset(x: &[f64], dx: &[f64], scale: f64) -> Vec<f64> {
    x.iter().zip(dx).map(|(xi, di)| xi + scale * di).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{cell::Cell, convert::Infallible};

    use approx::assert_relative_eq;
    use odekit_core::DomainError;

    /// dx/dt = x, exact solution x(t) = e^t.
    fn growth(_t: f64, x: &[f64]) -> Result<Vec<f64>, Infallible> {
        Ok(vec![x[0]])
    }

    /// dx/dt = 3t², exact solution x(t) = t³ (exact for RK4).
    fn cubic(t: f64, _x: &[f64]) -> Result<Vec<f64>, Infallible> {
        Ok(vec![3.0 * t * t])
    }

    /// Fails at any time after `t = 0.05`.
    fn fails_midway(t: f64, x: &[f64]) -> Result<Vec<f64>, DomainError> {
        if t > 0.05 {
            Err(DomainError::DivisionByZero { t })
        } else {
            Ok(x.to_vec())
        }
    }

    fn wrong_dimension(_t: f64, _x: &[f64]) -> Result<Vec<f64>, Infallible> {
        Ok(vec![1.0])
    }

    #[test]
    fn single_steps_match_taylor_expansion() {
        let h = 0.1;
        let x = [1.0];

        let euler = Euler.step(&growth, 0.0, &x, h).unwrap();
        let rk2 = Rk2.step(&growth, 0.0, &x, h).unwrap();
        let rk4 = Rk4.step(&growth, 0.0, &x, h).unwrap();

        assert_relative_eq!(euler[0], 1.1);
        assert_relative_eq!(rk2[0], 1.0 + h + h * h / 2.0);
        assert_relative_eq!(
            rk4[0],
            1.0 + h + h.powi(2) / 2.0 + h.powi(3) / 6.0 + h.powi(4) / 24.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn rk4_is_exact_for_cubic_polynomials() {
        let x = Rk4.step(&cubic, 1.0, &[1.0], 0.5).unwrap();
        assert_relative_eq!(x[0], 1.5_f64.powi(3), epsilon = 1e-12);
    }

    #[test]
    fn methods_do_not_mutate_input() {
        let x = vec![1.0];
        let before = x.clone();

        let _ = Euler.step(&growth, 0.0, &x, 0.1).unwrap();
        let _ = Rk2.step(&growth, 0.0, &x, 0.1).unwrap();
        let _ = Rk4.step(&growth, 0.0, &x, 0.1).unwrap();

        assert_eq!(x, before);
    }

    #[test]
    fn failing_stage_aborts_the_step() {
        // Euler only evaluates at t = 0.
        assert!(Euler.step(&fails_midway, 0.0, &[1.0], 0.2).is_ok());

        // RK2 and RK4 evaluate at t + h/2 = 0.1.
        assert_eq!(
            Rk2.step(&fails_midway, 0.0, &[1.0], 0.2),
            Err(StepError::Derivative(DomainError::DivisionByZero { t: 0.1 }))
        );
        assert_eq!(
            Rk4.step(&fails_midway, 0.0, &[1.0], 0.2),
            Err(StepError::Derivative(DomainError::DivisionByZero { t: 0.1 }))
        );
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let err = Rk4.step(&wrong_dimension, 0.0, &[1.0, 2.0], 0.1).unwrap_err();
        assert_eq!(
            err,
            StepError::Dimension {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn evaluation_counts() {
        let calls = Cell::new(0);
        let f = |_t: f64, x: &[f64]| -> Result<Vec<f64>, Infallible> {
            calls.set(calls.get() + 1);
            Ok(x.to_vec())
        };

        Rk4.step(&f, 0.0, &[1.0], 0.1).unwrap();
        Rk2.step(&f, 0.0, &[1.0], 0.1).unwrap();
        Euler.step(&f, 0.0, &[1.0], 0.1).unwrap();

        assert_eq!(calls.get(), Rk4.evaluations() + Rk2.evaluations() + Euler.evaluations());
    }
}
