use odekit_core::DomainError;

use crate::{Input, System};

/// A damped mass-spring oscillator.
///
/// With state `X = (x, v)`, position from equilibrium and velocity:
///
/// ```text
/// x' = v
/// v' = -x·k/m - v·a/m
/// ```
///
/// where `k` is the stiffness, `m` the mass, and `a` the viscous damping rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f64,
    pub mass: f64,
    pub damping: f64,
}

impl Spring {
    #[must_use]
    pub fn new(stiffness: f64, mass: f64, damping: f64) -> Self {
        Self {
            stiffness,
            mass,
            damping,
        }
    }

    /// Returns the pseudo-pulsation `w = sqrt(k/m - a²/4m²)` of the
    /// underdamped motion.
    ///
    /// Returns `NaN` if the oscillator is critically damped or overdamped.
    #[must_use]
    pub fn pulsation(&self) -> f64 {
        let Self {
            stiffness: k,
            mass: m,
            damping: a,
        } = *self;
        (k / m - a * a / (4.0 * m * m)).sqrt()
    }

    /// Returns the exact position at `t` for a release from rest at `x0`
    /// at `t = 0`.
    ///
    /// ```text
    /// x(t) = x0·exp(-a·t/2m)·(cos(w·t) + a·sin(w·t)/(2m·w))
    /// ```
    ///
    /// The formula only holds in the underdamped regime.
    #[must_use]
    pub fn analytic_position(&self, x0: f64, t: f64) -> f64 {
        let Self {
            mass: m,
            damping: a,
            ..
        } = *self;
        let w = self.pulsation();

        let decay = a / (2.0 * m);
        x0 * (-decay * t).exp() * ((w * t).cos() + decay * (w * t).sin() / w)
    }
}

impl Default for Spring {
    /// Stiffness 2, unit mass and a light damping of 0.1.
    fn default() -> Self {
        Self::new(2.0, 1.0, 0.1)
    }
}

impl System for Spring {
    type Error = DomainError;

    fn derivative(&self, _t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        let &[position, velocity] = x else {
            return Err(DomainError::Dimension {
                expected: 2,
                found: x.len(),
            });
        };
        Ok(vec![
            velocity,
            -position * self.stiffness / self.mass - velocity * self.damping / self.mass,
        ])
    }

    /// Released from rest at `x = 0.5`, solved for 60 time units.
    fn default_input(&self) -> Input {
        Input::new(0.0, vec![0.5, 0.0], 0.01, 60.0)
    }
}
