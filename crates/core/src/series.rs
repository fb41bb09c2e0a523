use std::{fmt, ops::Index, slice};

/// One sample `(t, X)` of a trajectory.
///
/// A `TimeData` owns its state vector, so it is unaffected by any later
/// change to the buffer it was copied from. Cloning is a deep copy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeData {
    time: f64,
    state: Vec<f64>,
}

impl TimeData {
    /// Creates a sample from a time and an owned state vector.
    #[must_use]
    pub fn new(time: f64, state: Vec<f64>) -> Self {
        Self { time, state }
    }

    /// Returns the sample time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the state vector.
    #[must_use]
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Consumes the sample, returning its time and state.
    #[must_use]
    pub fn into_parts(self) -> (f64, Vec<f64>) {
        (self.time, self.state)
    }
}

impl fmt::Display for TimeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t: {:.4}, v: {:?}", self.time, self.state)
    }
}

/// An ordered, append-only sequence of trajectory samples.
///
/// Samples are stored in insertion order, which is time order when the series
/// is filled by a solver. A series is typically created empty, filled during
/// one run, then cloned or [cleared](TimeSeries::clear) before the next.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TimeSeries {
    samples: Vec<TimeData>,
}

impl TimeSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample built from `time` and `state`.
    pub fn push(&mut self, time: f64, state: Vec<f64>) {
        self.samples.push(TimeData::new(time, state));
    }

    /// Appends an existing sample.
    pub fn append(&mut self, data: TimeData) {
        self.samples.push(data);
    }

    /// Removes every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TimeData> {
        self.samples.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&TimeData> {
        self.samples.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TimeData> {
        self.samples.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, TimeData> {
        self.samples.iter()
    }

    /// Returns the state dimension, taken from the first sample.
    ///
    /// Returns `None` if the series is empty.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.first().map(|data| data.state.len())
    }

    /// Returns the sample times in order.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(TimeData::time).collect()
    }

    /// Returns the values of state component `index` across all samples.
    ///
    /// Samples that have no component at `index` are skipped.
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.samples
            .iter()
            .filter_map(|data| data.state.get(index).copied())
            .collect()
    }
}

impl Index<usize> for TimeSeries {
    type Output = TimeData;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimeData;
    type IntoIter = slice::Iter<'a, TimeData>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl IntoIterator for TimeSeries {
    type Item = TimeData;
    type IntoIter = std::vec::IntoIter<TimeData>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl FromIterator<TimeData> for TimeSeries {
    fn from_iter<T: IntoIterator<Item = TimeData>>(iter: T) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for data in &self.samples {
            writeln!(f, "{data}")?;
        }
        Ok(())
    }
}
