//! Export and visualization helpers for odekit trajectories.
//!
//! - [`csv`] writes a [`TimeSeries`] as delimited text, one row per sample
//! - [`plot`] generates (and optionally runs) a matplotlib script that
//!   plots exported files
//!
//! Both are collaborators of the solvers, not part of them: they only see a
//! finished [`TimeSeries`] or a file path.
//!
//! [`TimeSeries`]: odekit_core::TimeSeries

pub mod csv;
pub mod plot;

pub use csv::{CsvFormat, ExportError, save_csv, save_csv_default};
pub use plot::{PlotError, PlotScript};
