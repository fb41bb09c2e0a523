use odekit_core::Derivative;

use super::{Method, StepError, offset, slope};

/// The explicit (forward) Euler method.
///
/// ```text
/// X_{n+1} = X_n + h * f(t_n, X_n)
/// ```
///
/// First order: the global error shrinks linearly with `h`, so Euler needs a
/// much finer step than the Runge-Kutta methods for comparable accuracy and
/// stability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl Method for Euler {
    fn name(&self) -> &'static str {
        "euler"
    }

    fn evaluations(&self) -> usize {
        1
    }

    fn step<F>(&self, f: &F, t: f64, x: &[f64], h: f64) -> Result<Vec<f64>, StepError<F::Error>>
    where
        F: Derivative + ?Sized,
    {
        let k = slope(f, t, x)?;
        Ok(offset(x, &k, h))
    }
}
