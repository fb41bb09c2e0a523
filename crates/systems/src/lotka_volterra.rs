use std::f64::consts::PI;

use odekit_core::DomainError;

use crate::{Input, System};

/// Lotka-Volterra prey/predator dynamics.
///
/// With `x` the prey population and `y` the predator population:
///
/// ```text
/// x' = x·(a - b·y)
/// y' = y·(d·x - g)
/// ```
///
/// Populations oscillate around the equilibrium `(g/d, a/b)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotkaVolterra {
    /// Prey reproduction rate `a`, independent of predators.
    pub prey_growth: f64,
    /// Prey death rate `b` due to predators.
    pub predation: f64,
    /// Predator reproduction rate `d` per captured prey.
    pub predator_growth: f64,
    /// Predator death rate `g`, independent of prey.
    pub predator_death: f64,
}

impl LotkaVolterra {
    #[must_use]
    pub fn new(prey_growth: f64, predation: f64, predator_growth: f64, predator_death: f64) -> Self {
        Self {
            prey_growth,
            predation,
            predator_growth,
            predator_death,
        }
    }

    /// Returns the non-trivial fixed point `(g/d, a/b)`.
    #[must_use]
    pub fn equilibrium(&self) -> (f64, f64) {
        (
            self.predator_death / self.predator_growth,
            self.prey_growth / self.predation,
        )
    }

    /// Returns the period of small oscillations around the equilibrium,
    /// `2π/sqrt(a·b)`.
    #[must_use]
    pub fn pseudo_period(&self) -> f64 {
        2.0 * PI / (self.prey_growth * self.predation).sqrt()
    }

    /// Returns the quantity `d·x - g·ln(x) + b·y - a·ln(y)`, which is constant
    /// along exact trajectories with positive populations.
    #[must_use]
    pub fn invariant(&self, x: f64, y: f64) -> f64 {
        self.predator_growth * x - self.predator_death * x.ln() + self.predation * y
            - self.prey_growth * y.ln()
    }
}

impl Default for LotkaVolterra {
    fn default() -> Self {
        Self::new(2.0 / 3.0, 4.0 / 3.0, 1.0, 1.0)
    }
}

impl System for LotkaVolterra {
    type Error = DomainError;

    fn derivative(&self, _t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        let &[prey, predators] = x else {
            return Err(DomainError::Dimension {
                expected: 2,
                found: x.len(),
            });
        };
        Ok(vec![
            prey * (self.prey_growth - self.predation * predators),
            predators * (self.predator_growth * prey - self.predator_death),
        ])
    }

    /// Starts at `(0.8·xe, 1.2·ye)` and runs for 4 pseudo-periods with 40
    /// steps per period.
    fn default_input(&self) -> Input {
        let (xe, ye) = self.equilibrium();
        let period = self.pseudo_period();
        Input::new(0.0, vec![0.8 * xe, 1.2 * ye], period / 40.0, 4.0 * period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use crate::SystemSolver;

    #[test]
    fn missing_population_is_an_error() {
        let system = LotkaVolterra::default();
        assert_eq!(
            system.derivative(0.0, &[1.0]),
            Err(DomainError::Dimension {
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn equilibrium_is_stationary() {
        let system = LotkaVolterra::default();
        let (xe, ye) = system.equilibrium();

        assert_relative_eq!(xe, 1.0);
        assert_relative_eq!(ye, 0.5);
        for rate in system.derivative(0.0, &[xe, ye]).unwrap() {
            assert_abs_diff_eq!(rate, 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn pseudo_period() {
        let system = LotkaVolterra::new(1.0, 4.0, 1.0, 1.0);
        assert_relative_eq!(system.pseudo_period(), PI);
    }

    #[test]
    fn invariant_is_preserved() {
        let system = LotkaVolterra::default();
        let input = system.default_input();
        let expected = system.invariant(input.x0[0], input.x0[1]);

        let mut solver = SystemSolver::new(system);
        solver.solve(&input).unwrap();

        for data in solver.series() {
            let (x, y) = (data.state()[0], data.state()[1]);
            assert!(x > 0.0 && y > 0.0);
            assert_relative_eq!(system.invariant(x, y), expected, max_relative = 1e-3);
        }
    }
}
