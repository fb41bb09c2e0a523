use std::{fmt, str::FromStr};

use odekit_core::Derivative;
use thiserror::Error;

use super::{Euler, Method, Rk2, Rk4, StepError};

/// A step method chosen at runtime.
///
/// Dispatches to [`Euler`], [`Rk2`], or [`Rk4`]. Parses from (and displays
/// as) the method names `euler`, `rk2`, and `rk4`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MethodKind {
    Euler,
    Rk2,
    #[default]
    Rk4,
}

/// The name passed to [`MethodKind::from_str`] is not a known method.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown step method `{0}` (expected euler, rk2, or rk4)")]
pub struct UnknownMethod(pub String);

impl Method for MethodKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Euler => Euler.name(),
            Self::Rk2 => Rk2.name(),
            Self::Rk4 => Rk4.name(),
        }
    }

    fn evaluations(&self) -> usize {
        match self {
            Self::Euler => Euler.evaluations(),
            Self::Rk2 => Rk2.evaluations(),
            Self::Rk4 => Rk4.evaluations(),
        }
    }

    fn step<F>(&self, f: &F, t: f64, x: &[f64], h: f64) -> Result<Vec<f64>, StepError<F::Error>>
    where
        F: Derivative + ?Sized,
    {
        match self {
            Self::Euler => Euler.step(f, t, x, h),
            Self::Rk2 => Rk2.step(f, t, x, h),
            Self::Rk4 => Rk4.step(f, t, x, h),
        }
    }
}

impl FromStr for MethodKind {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euler" => Ok(Self::Euler),
            "rk2" => Ok(Self::Rk2),
            "rk4" => Ok(Self::Rk4),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    #[test]
    fn parses_names() {
        assert_eq!("euler".parse::<MethodKind>(), Ok(MethodKind::Euler));
        assert_eq!("RK2".parse::<MethodKind>(), Ok(MethodKind::Rk2));
        assert_eq!("rk4".parse::<MethodKind>(), Ok(MethodKind::Rk4));
        assert_eq!(
            "rk45".parse::<MethodKind>(),
            Err(UnknownMethod("rk45".into()))
        );
        assert_eq!(MethodKind::default().to_string(), "rk4");
    }

    #[test]
    fn dispatches_to_the_selected_method() {
        let f = |_t: f64, x: &[f64]| -> Result<Vec<f64>, Infallible> { Ok(vec![x[0]]) };

        for kind in [MethodKind::Euler, MethodKind::Rk2, MethodKind::Rk4] {
            let expected = match kind {
                MethodKind::Euler => Euler.step(&f, 0.0, &[1.0], 0.1),
                MethodKind::Rk2 => Rk2.step(&f, 0.0, &[1.0], 0.1),
                MethodKind::Rk4 => Rk4.step(&f, 0.0, &[1.0], 0.1),
            };
            assert_eq!(kind.step(&f, 0.0, &[1.0], 0.1), expected);
        }
    }
}
