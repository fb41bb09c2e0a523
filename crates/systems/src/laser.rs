use std::{collections::BTreeMap, f64::consts::PI};

use log::debug;
use odekit_core::{DomainError, TimeSeries};
use odekit_observers::controllers::StopAtTime;
use odekit_solvers::transient::fixed_step::{Error, Solver};

use crate::{Input, System};

/// A class-B laser with modulated losses, in the rate-equation approximation.
///
/// The state is `X = (L, D, Z)`: the log of the light intensity, the
/// population inversion, and the modulation phase `Z = w·t`, which makes the
/// system autonomous:
///
/// ```text
/// L' = D - 1 - m·cos(Z)
/// D' = g·(a - D·(1 + exp(L)))
/// Z' = w
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laser {
    /// Modulation depth `m`.
    pub modulation: f64,
    /// Inversion relaxation rate `g`.
    pub relaxation: f64,
    /// Modulation pulsation `w`.
    pub pulsation: f64,
    /// Pump parameter `a`.
    pub pump: f64,
}

impl Laser {
    #[must_use]
    pub fn new(modulation: f64, relaxation: f64, pulsation: f64, pump: f64) -> Self {
        Self {
            modulation,
            relaxation,
            pulsation,
            pump,
        }
    }

    /// Returns the modulation period `2π/w`.
    #[must_use]
    pub fn period(&self) -> f64 {
        2.0 * PI / self.pulsation
    }

    /// Samples the state once per modulation period.
    ///
    /// Starting from `x0`, the system is first run for `transient` periods to
    /// settle on its attractor. Then `count` further runs of one period each
    /// are chained, every run starting at `t = 0` from the end state of the
    /// previous one. The returned series holds the settled state at time `0`
    /// followed by the end state of run `i` at time `i`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if any run fails.
    pub fn first_return_map(
        &self,
        x0: &[f64],
        transient: f64,
        count: usize,
    ) -> Result<TimeSeries, Error> {
        let period = self.period();
        let h = period / 40.0;
        let f = |t: f64, x: &[f64]| self.derivative(t, x);

        let mut solver = Solver::rk4();
        let mut state = x0.to_vec();

        solver.solve_unrecorded(&f, 0.0, &state, h, &mut StopAtTime::new(transient * period))?;
        if let Some((_, x)) = solver.result() {
            state = x.to_vec();
        }

        let mut series = TimeSeries::new();
        series.push(0.0, state.clone());

        for i in 1..=count {
            solver.solve_unrecorded(&f, 0.0, &state, h, &mut StopAtTime::new(period))?;
            if let Some((_, x)) = solver.result() {
                state = x.to_vec();
            }
            series.push(i as f64, state.clone());
        }

        debug!("first return map built from {count} periods");
        Ok(series)
    }
}

impl System for Laser {
    type Error = DomainError;

    /// # Errors
    ///
    /// Returns [`DomainError::NonFinite`] if the intensity `exp(L)` overflows,
    /// and [`DomainError::Dimension`] if `x` is not a three-component state.
    fn derivative(&self, t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        let &[l, d, z] = x else {
            return Err(DomainError::Dimension {
                expected: 3,
                found: x.len(),
            });
        };

        let intensity = l.exp();
        if !intensity.is_finite() {
            return Err(DomainError::NonFinite { t, value: l });
        }

        Ok(vec![
            d - 1.0 - self.modulation * z.cos(),
            self.relaxation * (self.pump - d * (1.0 + intensity)),
            self.pulsation,
        ])
    }

    /// Starts from `(1, 1, 0)` and runs for 60 periods with 40 steps per period.
    fn default_input(&self) -> Input {
        let period = self.period();
        Input::new(0.0, vec![1.0, 1.0, 0.0], period / 40.0, 60.0 * period)
    }
}

/// A named set of [`Laser`] configurations.
///
/// [`LaserConfigs::standard`] holds the two reference regimes, `"chaos"` and
/// `"1T_LONG_TRANSIENT"`. Callers own the map and may add their own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaserConfigs {
    configs: BTreeMap<String, Laser>,
}

impl LaserConfigs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reference configurations.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with("chaos", Laser::new(2.5e-2, 1e-3, 1e-2, 1.1))
            .with("1T_LONG_TRANSIENT", Laser::new(2.5e-2, 1e-3, 1e-1, 1.1))
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, laser: Laser) -> Self {
        self.insert(name, laser);
        self
    }

    /// Adds or replaces a configuration, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, laser: Laser) -> Option<Laser> {
        self.configs.insert(name.into(), laser)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Laser> {
        self.configs.get(name)
    }

    /// Returns the configuration names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }
}
