use odekit_core::Derivative;

use super::{Method, StepError, offset, slope};

/// The two-stage midpoint Runge-Kutta method.
///
/// ```text
/// k1      = f(t_n, X_n)
/// X_m     = X_n + (h / 2) * k1
/// k2      = f(t_n + h / 2, X_m)
/// X_{n+1} = X_n + h * k2
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rk2;

impl Method for Rk2 {
    fn name(&self) -> &'static str {
        "rk2"
    }

    fn evaluations(&self) -> usize {
        2
    }

    fn step<F>(&self, f: &F, t: f64, x: &[f64], h: f64) -> Result<Vec<f64>, StepError<F::Error>>
    where
        F: Derivative + ?Sized,
    {
        let k1 = slope(f, t, x)?;
        let midpoint = offset(x, &k1, h / 2.0);

        let k2 = slope(f, t + h / 2.0, &midpoint)?;
        Ok(offset(x, &k2, h))
    }
}
