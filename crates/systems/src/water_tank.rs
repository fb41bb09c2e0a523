use odekit_core::DomainError;

use crate::{Input, System};

/// A tank filled at a constant rate and draining through a hole in its base.
///
/// The outflow is proportional to the pressure at the hole, and so to the
/// water height `h`:
///
/// ```text
/// h' = d - a·h
/// ```
///
/// The height relaxes exponentially towards `d/a` with time constant `1/a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterTank {
    /// Constant inflow `d`.
    pub inflow: f64,
    /// Outflow coefficient `a`.
    pub outflow: f64,
}

impl WaterTank {
    #[must_use]
    pub fn new(inflow: f64, outflow: f64) -> Self {
        Self { inflow, outflow }
    }

    /// Returns the equilibrium height `d/a`.
    #[must_use]
    pub fn equilibrium(&self) -> f64 {
        self.inflow / self.outflow
    }

    /// Returns the time constant `1/a`.
    #[must_use]
    pub fn time_constant(&self) -> f64 {
        1.0 / self.outflow
    }

    /// Returns the exact height at `t` starting from `h0` at `t = 0`.
    #[must_use]
    pub fn analytic_height(&self, h0: f64, t: f64) -> f64 {
        let he = self.equilibrium();
        he + (h0 - he) * (-self.outflow * t).exp()
    }
}

impl Default for WaterTank {
    fn default() -> Self {
        Self::new(2.0, 1.0)
    }
}

impl System for WaterTank {
    type Error = DomainError;

    fn derivative(&self, _t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        let &[height] = x else {
            return Err(DomainError::Dimension {
                expected: 1,
                found: x.len(),
            });
        };
        Ok(vec![self.inflow - self.outflow * height])
    }

    /// Starts one unit above equilibrium and runs for 8 time constants.
    fn default_input(&self) -> Input {
        let tau = self.time_constant();
        Input::new(0.0, vec![1.0 + self.equilibrium()], tau / 40.0, 8.0 * tau)
    }
}

/// A cascade of identical tanks, each one draining into the next.
///
/// Tank 0 is filled at the constant rate `d`. Tank `i > 0` is filled by the
/// outflow of tank `i - 1`:
///
/// ```text
/// h0' = d - a·h0
/// hi' = a·(h(i-1) - hi)
/// ```
///
/// Every tank shares the equilibrium height `d/a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadingWaterTanks {
    pub inflow: f64,
    pub outflow: f64,
    pub count: usize,
}

impl CascadingWaterTanks {
    #[must_use]
    pub fn new(inflow: f64, outflow: f64, count: usize) -> Self {
        Self {
            inflow,
            outflow,
            count,
        }
    }

    #[must_use]
    pub fn equilibrium(&self) -> f64 {
        self.inflow / self.outflow
    }

    /// Returns the column names `h0, h1, ...`.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        (0..self.count).map(|i| format!("h{i}")).collect()
    }

    /// Returns heights spread around the equilibrium by up to ±10%.
    ///
    /// The offsets follow a golden-ratio sequence, so the same cascade always
    /// starts from the same state.
    #[must_use]
    pub fn perturbed_heights(&self) -> Vec<f64> {
        const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;

        let he = self.equilibrium();
        let spread = 0.2 * he;

        (1..=self.count)
            .map(|i| {
                let offset = (i as f64 * GOLDEN_RATIO_CONJUGATE).fract();
                he + spread * (offset - 0.5)
            })
            .collect()
    }
}

impl Default for CascadingWaterTanks {
    fn default() -> Self {
        Self::new(2.0, 1.0, 8)
    }
}

impl System for CascadingWaterTanks {
    type Error = DomainError;

    fn derivative(&self, _t: f64, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        let Some(&first) = x.first().filter(|_| x.len() == self.count) else {
            return Err(DomainError::Dimension {
                expected: self.count,
                found: x.len(),
            });
        };

        let mut rates = Vec::with_capacity(x.len());
        rates.push(self.inflow - self.outflow * first);
        rates.extend(x.windows(2).map(|pair| self.outflow * (pair[0] - pair[1])));
        Ok(rates)
    }

    /// Starts from [`perturbed_heights`](Self::perturbed_heights) and runs for
    /// two time constants per tank.
    fn default_input(&self) -> Input {
        let tau = 1.0 / self.outflow;
        Input::new(
            0.0,
            self.perturbed_heights(),
            tau / 40.0,
            2.0 * tau * self.count as f64,
        )
    }
}
