use odekit_core::Recorder;

/// Forwards the first sample and then every `n`-th sample to an inner
/// recorder.
///
/// Useful for long runs with a small step where only a coarse trajectory is
/// needed. A stride of 0 is treated as 1.
#[derive(Debug, Clone)]
pub struct EveryNth<R> {
    inner: R,
    stride: usize,
    count: usize,
}

impl<R: Recorder> EveryNth<R> {
    #[must_use]
    pub fn new(stride: usize, inner: R) -> Self {
        Self {
            inner,
            stride: stride.max(1),
            count: 0,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Recorder> Recorder for EveryNth<R> {
    fn record(&mut self, t: f64, x: &[f64]) {
        if self.count % self.stride == 0 {
            self.inner.record(t, x);
        }
        self.count += 1;
    }
}
