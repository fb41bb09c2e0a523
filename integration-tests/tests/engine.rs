use std::convert::Infallible;

use approx::assert_relative_eq;
use integration_tests::{always_fail, always_stop, never_stop};
use odekit_core::{ControlError, Controller, Decision, DomainError, TimeSeries};
use odekit_observers::controllers::{AnyOf, StopAfterSteps, StopAtTime};
use odekit_solvers::{
    MethodKind,
    transient::fixed_step::{Error, Solver},
};
use odekit_systems::{Spring, System};

// --- Test fixtures ---

fn decay(_t: f64, x: &[f64]) -> Result<Vec<f64>, Infallible> {
    Ok(x.iter().map(|xi| -xi).collect())
}

fn spring(t: f64, x: &[f64]) -> Result<Vec<f64>, DomainError> {
    Spring::default().derivative(t, x)
}

// --- Sample count ---

#[test]
fn sample_count_matches_step_grid() {
    for (t0, tmax, h) in [(0.0, 1.0, 0.3), (0.0, 1.0, 0.25), (2.0, 5.0, 0.1), (0.0, 60.0, 0.01)] {
        for kind in [MethodKind::Euler, MethodKind::Rk2, MethodKind::Rk4] {
            let mut series = TimeSeries::new();
            Solver::new(kind)
                .solve(&decay, t0, &[1.0], h, &mut StopAtTime::new(tmax), &mut series)
                .unwrap();

            let expected = ((tmax - t0) / h + 1e-8).floor() as usize + 2;
            assert_eq!(series.len(), expected, "t0 = {t0}, tmax = {tmax}, h = {h}");

            let last = series.last().unwrap().time();
            assert!((last - tmax).abs() <= h + StopAtTime::DEFAULT_TOLERANCE);
            assert!(last > tmax);
        }
    }
}

#[test]
fn iterations_exclude_initial_and_stopping_samples() {
    let mut series = TimeSeries::new();
    let iterations = Solver::rk4()
        .solve(&decay, 0.0, &[1.0], 0.1, &mut StopAtTime::new(1.0), &mut series)
        .unwrap();

    assert_eq!(iterations, 10);
    assert_eq!(series.len() as u64, iterations + 2);
}

// --- Determinism ---

#[test]
fn identical_runs_are_bit_identical() {
    let run = || {
        let mut series = TimeSeries::new();
        let mut solver = Solver::rk4();
        solver
            .solve(&spring, 0.0, &[0.5, 0.0], 0.05, &mut StopAtTime::new(30.0), &mut series)
            .unwrap();
        series
    };

    let first = run();
    let second = run();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.time().to_bits(), b.time().to_bits());
        for (xa, xb) in a.state().iter().zip(b.state()) {
            assert_eq!(xa.to_bits(), xb.to_bits());
        }
    }
}

#[test]
fn reused_solver_matches_fresh_solver() {
    let mut reused = Solver::rk2();
    reused
        .solve_unrecorded(&decay, 0.0, &[3.0], 0.1, &mut StopAtTime::new(2.0))
        .unwrap();
    reused
        .solve_unrecorded(&decay, 0.0, &[1.0], 0.1, &mut StopAtTime::new(1.0))
        .unwrap();

    let mut fresh = Solver::rk2();
    fresh
        .solve_unrecorded(&decay, 0.0, &[1.0], 0.1, &mut StopAtTime::new(1.0))
        .unwrap();

    assert_eq!(reused.result(), fresh.result());
}

// --- Non-mutation ---

#[test]
fn initial_state_is_not_mutated() {
    let x0 = vec![0.5, 0.0];
    let mut series = TimeSeries::new();

    let mut solver = Solver::euler();
    solver
        .solve(&spring, 0.0, &x0, 0.01, &mut StopAtTime::new(1.0), &mut series)
        .unwrap();

    assert_eq!(x0, vec![0.5, 0.0]);
    assert_eq!(series.first().unwrap().state(), &x0[..]);

    // The recorded samples are independent copies.
    let recorded = series.first().unwrap().clone();
    series.clear();
    assert_eq!(recorded.state(), &[0.5, 0.0]);
    assert_ne!(solver.result().unwrap().1, &x0[..]);
}

// --- Fatal propagation ---

#[test]
fn derivative_failure_stops_the_run() {
    // Fails once an evaluation is requested past t = 0.45.
    let failing = |t: f64, x: &[f64]| -> Result<Vec<f64>, DomainError> {
        if t > 0.45 {
            Err(DomainError::NonFinite { t, value: x[0] })
        } else {
            Ok(x.iter().map(|xi| -xi).collect())
        }
    };

    for kind in [MethodKind::Euler, MethodKind::Rk2, MethodKind::Rk4] {
        let mut series = TimeSeries::new();
        let mut solver = Solver::new(kind);
        let err = solver
            .solve(&failing, 0.0, &[1.0], 0.1, &mut StopAtTime::new(1.0), &mut series)
            .unwrap_err();

        assert!(matches!(err, Error::Evaluation { .. }), "{kind}: {err}");
        let iterations = err.iterations();
        assert_eq!(series.len() as u64, iterations + 1, "{kind}");

        let (t, _) = solver.result().unwrap();
        assert_relative_eq!(t, series.last().unwrap().time());
        assert!(series.iter().all(|data| data.time() < 0.55));
    }
}

#[test]
fn controller_error_stops_the_run() {
    let mut series = TimeSeries::new();
    let mut controller = AnyOf::new()
        .with(StopAfterSteps::new(3))
        .with(always_fail);

    let err = Solver::rk4()
        .solve(&decay, 0.0, &[1.0], 0.1, &mut controller, &mut series)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Control {
            iterations: 0,
            source: ControlError::Diverged { .. },
        }
    ));
    // The rejected sample was recorded before the controller saw it.
    assert_eq!(series.len(), 2);
}

// --- Aggregate controllers ---

#[test]
fn aggregate_short_circuits() {
    let mut stop_first = AnyOf::new().with(always_stop).with(never_stop);
    assert_eq!(stop_first.decide(0.0, &[1.0]).unwrap(), Decision::Stop);

    let mut error_second = AnyOf::new().with(never_stop).with(always_fail);
    assert!(matches!(
        error_second.decide(0.0, &[1.0]),
        Err(ControlError::Diverged { .. })
    ));

    // A stop ahead of the failing controller hides the error.
    let mut stop_then_fail = AnyOf::new().with(always_stop).with(always_fail);
    assert_eq!(stop_then_fail.decide(0.0, &[1.0]).unwrap(), Decision::Stop);
}

#[test]
fn aggregate_drives_a_run() {
    let mut controller = AnyOf::new()
        .with(StopAtTime::new(100.0))
        .with(StopAfterSteps::new(25));

    let iterations = Solver::euler()
        .solve_unrecorded(&decay, 0.0, &[1.0], 0.1, &mut controller)
        .unwrap();

    assert_eq!(iterations, 24);
}
