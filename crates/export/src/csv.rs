//! CSV export of trajectories.
//!
//! The default format writes a header row followed by one row per sample:
//!
//! ```text
//! t;x;v
//! 0.0000;0.500000000000;0.000000000000
//! 0.0100;0.499950000000;-0.010000000000
//! ```
//!
//! Time uses 4 decimal places and state components 12, separated by `;`.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::info;
use odekit_core::TimeSeries;
use thiserror::Error;

/// Errors that can occur when exporting a series.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("the time series has no data")]
    EmptySeries,

    #[error("{found} column names given for a state of dimension {expected}")]
    NameMismatch { expected: usize, found: usize },

    #[error("sample {index} has {found} components, expected {expected}")]
    RaggedSample {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Layout of the exported text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    delimiter: char,
    time_precision: usize,
    state_precision: usize,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: ';',
            time_precision: 4,
            state_precision: 12,
        }
    }
}

impl CsvFormat {
    /// Creates the default format (`;`, 4 and 12 decimal places).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn delimiter(self, delimiter: char) -> Self {
        Self { delimiter, ..self }
    }

    /// Sets the number of decimal places used for the time column.
    #[must_use]
    pub fn time_precision(self, time_precision: usize) -> Self {
        Self {
            time_precision,
            ..self
        }
    }

    /// Sets the number of decimal places used for state columns.
    #[must_use]
    pub fn state_precision(self, state_precision: usize) -> Self {
        Self {
            state_precision,
            ..self
        }
    }

    /// Writes `series` to `writer`, with `names` labeling the state columns.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if the series is empty, the number of names
    /// differs from the state dimension, a sample has a different dimension
    /// than the first one, or writing fails. Validation happens before
    /// anything is written.
    pub fn write<W, S>(&self, series: &TimeSeries, names: &[S], writer: W) -> Result<(), ExportError>
    where
        W: Write,
        S: AsRef<str>,
    {
        validate(series, names.len())?;

        let mut writer = BufWriter::new(writer);
        let delimiter = self.delimiter;

        write!(writer, "t")?;
        for name in names {
            write!(writer, "{delimiter}{}", name.as_ref())?;
        }
        writeln!(writer)?;

        for data in series {
            write!(writer, "{:.*}", self.time_precision, data.time())?;
            for value in data.state() {
                write!(writer, "{}{:.*}", delimiter, self.state_precision, value)?;
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes `series` to a new file at `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Same as [`write`](Self::write). Nothing is created if validation fails.
    pub fn save<P, S>(&self, series: &TimeSeries, names: &[S], path: P) -> Result<(), ExportError>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        validate(series, names.len())?;

        let columns: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        info!(
            "creating data file {} containing the time series {columns:?}",
            path.display()
        );

        let file = File::create(path)?;
        self.write(series, names, file)
    }
}

/// Returns the column names `x0, x1, ...` for a state of `dimension`.
#[must_use]
pub fn default_names(dimension: usize) -> Vec<String> {
    (0..dimension).map(|i| format!("x{i}")).collect()
}

/// Saves `series` to `path` in the default format.
///
/// # Errors
///
/// See [`CsvFormat::write`].
pub fn save_csv<P, S>(series: &TimeSeries, path: P, names: &[S]) -> Result<(), ExportError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    CsvFormat::default().save(series, names, path)
}

/// Saves `series` to `path` in the default format with columns named
/// `x0, x1, ...`.
///
/// # Errors
///
/// Returns [`ExportError::EmptySeries`] if the series is empty, and I/O
/// errors from writing the file.
pub fn save_csv_default<P: AsRef<Path>>(series: &TimeSeries, path: P) -> Result<(), ExportError> {
    let dimension = series.dimension().ok_or(ExportError::EmptySeries)?;
    save_csv(series, path, &default_names(dimension))
}

fn validate(series: &TimeSeries, names: usize) -> Result<(), ExportError> {
    let expected = series.dimension().ok_or(ExportError::EmptySeries)?;
    if names != expected {
        return Err(ExportError::NameMismatch {
            expected,
            found: names,
        });
    }

    if let Some((index, data)) = series
        .iter()
        .enumerate()
        .find(|(_, data)| data.state().len() != expected)
    {
        return Err(ExportError::RaggedSample {
            index,
            expected,
            found: data.state().len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    fn spring_series() -> TimeSeries {
        let mut series = TimeSeries::new();
        series.push(0.0, vec![0.5, 0.0]);
        series.push(0.01, vec![0.49995, -0.01]);
        series
    }

    fn render<S: AsRef<str>>(format: CsvFormat, series: &TimeSeries, names: &[S]) -> String {
        let mut buffer = Vec::new();
        format.write(series, names, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn default_layout() {
        let text = render(CsvFormat::default(), &spring_series(), &["x", "v"]);

        assert_eq!(
            text,
            "t;x;v\n\
             0.0000;0.500000000000;0.000000000000\n\
             0.0100;0.499950000000;-0.010000000000\n"
        );
    }

    #[test]
    fn custom_layout() {
        let format = CsvFormat::new()
            .delimiter(',')
            .time_precision(1)
            .state_precision(2);
        let text = render(format, &spring_series(), &["x".to_string(), "v".to_string()]);

        assert_eq!(text.lines().next(), Some("t,x,v"));
        assert_eq!(text.lines().nth(2), Some("0.0,0.50,-0.01"));
    }

    #[test]
    fn empty_series_fails() {
        let mut buffer = Vec::new();
        let err = CsvFormat::default()
            .write(&TimeSeries::new(), &["x"], &mut buffer)
            .unwrap_err();

        assert!(matches!(err, ExportError::EmptySeries));
        assert!(buffer.is_empty());
    }

    #[test]
    fn name_mismatch_fails() {
        let mut buffer = Vec::new();
        let err = CsvFormat::default()
            .write(&spring_series(), &["x"], &mut buffer)
            .unwrap_err();

        assert!(matches!(
            err,
            ExportError::NameMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn ragged_series_fails() {
        let mut series = spring_series();
        series.push(0.02, vec![0.4998]);

        let mut buffer = Vec::new();
        let err = CsvFormat::default()
            .write(&series, &["x", "v"], &mut buffer)
            .unwrap_err();

        assert!(matches!(err, ExportError::RaggedSample { index: 2, .. }));
    }

    #[test]
    fn saves_with_default_names() {
        let tmp = NamedTempFile::new().unwrap();

        save_csv_default(&spring_series(), tmp.path()).unwrap();
        let text = std::fs::read_to_string(tmp.path()).unwrap();

        assert!(text.starts_with("t;x0;x1\n"));
        assert_eq!(text.lines().count(), 3);
    }
}
