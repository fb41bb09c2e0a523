use odekit_core::DomainError;

use crate::{Input, System};

/// The Lorenz system.
///
/// ```text
/// x' = σ·(y - x)
/// y' = x·(ρ - z) - y
/// z' = x·y - β·z
/// ```
///
/// With the classic parameters (`ρ = 28`, `σ = 10`, `β = 8/3`) orbits settle
/// on the chaotic Lorenz attractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lorenz {
    pub rho: f64,
    pub sigma: f64,
    pub beta: f64,
}

impl Lorenz {
    #[must_use]
    pub fn new(rho: f64, sigma: f64, beta: f64) -> Self {
        Self { rho, sigma, beta }
    }

    /// Returns the two non-trivial fixed points, `(±sqrt(β(ρ-1)), ±sqrt(β(ρ-1)), ρ-1)`.
    #[must_use]
    pub fn fixed_points(&self) -> [[f64; 3]; 2] {
        let c = (self.beta * (self.rho - 1.0)).sqrt();
        [[c, c, self.rho - 1.0], [-c, -c, self.rho - 1.0]]
    }
}

impl Default for Lorenz {
    fn default() -> Self {
        Self::new(28.0, 10.0, 8.0 / 3.0)
    }
}

impl System for Lorenz {
    type Error = DomainError;

    fn derivative(&self, _t: f64, state: &[f64]) -> Result<Vec<f64>, Self::Error> {
        let &[x, y, z] = state else {
            return Err(DomainError::Dimension {
                expected: 3,
                found: state.len(),
            });
        };
        Ok(vec![
            self.sigma * (y - x),
            x * (self.rho - z) - y,
            x * y - self.beta * z,
        ])
    }

    fn default_input(&self) -> Input {
        Input::new(0.0, vec![1.0, 1.0, 1.0], 0.01, 100.0)
    }
}
