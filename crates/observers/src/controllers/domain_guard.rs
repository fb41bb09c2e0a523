use log::warn;
use odekit_core::{ControlError, Controller, Decision};

/// Aborts a run whose state leaves its valid domain.
///
/// Every component is checked against the guard's rules, in index order:
///
/// - a non-finite value is always [`ControlError::Diverged`],
/// - with [`bounded`](Self::bounded), `|x_i| > bound` is
///   [`ControlError::Diverged`],
/// - with [`floor`](Self::floor), `x_i < floor` (or `x_i <= floor` for
///   [`strict_floor`](Self::strict_floor)) is [`ControlError::OutOfDomain`].
///
/// A guard never stops a run normally; combine it with a time limit via
/// [`AnyOf`](super::AnyOf).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DomainGuard {
    bound: Option<f64>,
    floor: Option<Floor>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Floor {
    value: f64,
    strict: bool,
}

impl DomainGuard {
    /// Creates a guard that only rejects non-finite values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects components whose magnitude exceeds `bound`.
    #[must_use]
    pub fn bounded(self, bound: f64) -> Self {
        Self {
            bound: Some(bound.abs()),
            ..self
        }
    }

    /// Rejects components below `floor`.
    #[must_use]
    pub fn floor(self, floor: f64) -> Self {
        Self {
            floor: Some(Floor {
                value: floor,
                strict: false,
            }),
            ..self
        }
    }

    /// Rejects components at or below `floor`.
    #[must_use]
    pub fn strict_floor(self, floor: f64) -> Self {
        Self {
            floor: Some(Floor {
                value: floor,
                strict: true,
            }),
            ..self
        }
    }
}

impl Controller for DomainGuard {
    fn decide(&mut self, t: f64, x: &[f64]) -> Result<Decision, ControlError> {
        for (index, &value) in x.iter().enumerate() {
            let diverged = !value.is_finite() || self.bound.is_some_and(|b| value.abs() > b);
            if diverged {
                warn!("component {index} diverged to {value} at t = {t}");
                return Err(ControlError::Diverged { t, index, value });
            }

            let below = self.floor.is_some_and(|floor| {
                if floor.strict {
                    value <= floor.value
                } else {
                    value < floor.value
                }
            });
            if below {
                warn!("component {index} = {value} left its domain at t = {t}");
                return Err(ControlError::OutOfDomain { t, index, value });
            }
        }
        Ok(Decision::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_values() {
        let mut guard = DomainGuard::new();

        assert_eq!(guard.decide(0.0, &[1e300, -5.0]).unwrap(), Decision::Continue);
        assert!(matches!(
            guard.decide(0.5, &[0.0, f64::NAN]),
            Err(ControlError::Diverged { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_values_beyond_bound() {
        let mut guard = DomainGuard::new().bounded(10.0);

        assert_eq!(guard.decide(0.0, &[-10.0, 10.0]).unwrap(), Decision::Continue);
        assert!(matches!(
            guard.decide(1.0, &[-10.5]),
            Err(ControlError::Diverged { index: 0, .. })
        ));
    }

    #[test]
    fn floors() {
        let mut inclusive = DomainGuard::new().floor(0.0);
        assert_eq!(inclusive.decide(0.0, &[0.0]).unwrap(), Decision::Continue);
        assert!(matches!(
            inclusive.decide(0.0, &[-1e-9]),
            Err(ControlError::OutOfDomain { .. })
        ));

        let mut strict = DomainGuard::new().strict_floor(0.0);
        assert!(matches!(
            strict.decide(2.0, &[1.0, 0.0]),
            Err(ControlError::OutOfDomain { t, index: 1, .. }) if t == 2.0
        ));
    }
}
