use crate::TimeSeries;

/// Receives the samples of an integration run.
///
/// A solver calls [`record`](Recorder::record) once for the initial condition
/// and once per computed step, in time order. Recording is a side channel:
/// it cannot fail and cannot influence the run.
///
/// The state slice is only borrowed for the duration of the call. Recorders
/// that keep samples must copy them.
///
/// # Implementations
///
/// - `()` discards every sample.
/// - Closures `FnMut(f64, &[f64])` are called with each sample.
/// - [`TimeSeries`] appends an owned copy of each sample.
pub trait Recorder {
    /// Records the sample `(t, x)`.
    fn record(&mut self, t: f64, x: &[f64]);
}

impl<F> Recorder for F
where
    F: FnMut(f64, &[f64]),
{
    fn record(&mut self, t: f64, x: &[f64]) {
        self(t, x);
    }
}

/// A no-op recorder.
impl Recorder for () {
    fn record(&mut self, _t: f64, _x: &[f64]) {}
}

impl Recorder for TimeSeries {
    fn record(&mut self, t: f64, x: &[f64]) {
        self.push(t, x.to_vec());
    }
}
