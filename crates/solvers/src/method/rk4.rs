use odekit_core::Derivative;

use super::{Method, StepError, offset, slope};

/// The classical fourth-order Runge-Kutta method.
///
/// ```text
/// k1      = h * f(t_n,         X_n)
/// k2      = h * f(t_n + h / 2, X_n + k1 / 2)
/// k3      = h * f(t_n + h / 2, X_n + k2 / 2)
/// k4      = h * f(t_n + h,     X_n + k3)
/// X_{n+1} = X_n + (k1 + 2 k2 + 2 k3 + k4) / 6
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rk4;

impl Method for Rk4 {
    fn name(&self) -> &'static str {
        "rk4"
    }

    fn evaluations(&self) -> usize {
        4
    }

    fn step<F>(&self, f: &F, t: f64, x: &[f64], h: f64) -> Result<Vec<f64>, StepError<F::Error>>
    where
        F: Derivative + ?Sized,
    {
        let scaled = |k: Vec<f64>| -> Vec<f64> { k.into_iter().map(|d| h * d).collect() };

        let k1 = scaled(slope(f, t, x)?);
        let k2 = scaled(slope(f, t + h / 2.0, &offset(x, &k1, 0.5))?);
        let k3 = scaled(slope(f, t + h / 2.0, &offset(x, &k2, 0.5))?);
        let k4 = scaled(slope(f, t + h, &offset(x, &k3, 1.0))?);

        let next = x
            .iter()
            .enumerate()
            .map(|(i, xi)| xi + (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0)
            .collect();

        Ok(next)
    }
}
