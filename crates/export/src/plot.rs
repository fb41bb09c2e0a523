//! Plot-script generation.
//!
//! A [`PlotScript`] collects plotting commands that refer to CSV files written
//! by [`csv`](crate::csv), renders them as a standalone Python script using
//! `numpy` and `matplotlib`, and can run that script with an external
//! interpreter. Rendering never touches the trajectories themselves.
//!
//! ```
//! use odekit_export::PlotScript;
//!
//! let script = PlotScript::new()
//!     .timeseries("out.spring.csv", &["x", "v"], false)
//!     .diagram_2d("out.spring.csv", "x", "v");
//!
//! assert!(script.render().contains("diagram2D('out.spring.csv', 'x', 'v')"));
//! ```

use std::{
    fs,
    io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use log::info;
use thiserror::Error;

/// Errors that can occur when writing or running a plot script.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("the plot script has no commands")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("`{program}` exited with {status} while running {}", script.display())]
    Failed {
        program: String,
        script: PathBuf,
        status: ExitStatus,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum PlotCommand {
    TimeSeries {
        csv: String,
        names: Vec<String>,
        multi: bool,
    },
    Diagram2d {
        csv: String,
        x: String,
        y: String,
    },
    Diagram3d {
        csv: String,
        x: String,
        y: String,
        z: String,
    },
    FirstReturnMap {
        csv: String,
        x: String,
        y: String,
    },
}

/// Helper functions shared by every generated script.
const PRELUDE: &str = r#"import numpy as np
import matplotlib.pyplot as plt


def load(csvpath):
    return np.genfromtxt(csvpath, delimiter=';', names=True)


def timeseries(csvpath, names, multi=False):
    data = load(csvpath)
    if multi:
        fig, axes = plt.subplots(len(names), 1, sharex=True, squeeze=False)
        for ax, name in zip(axes[:, 0], names):
            ax.plot(data['t'], data[name], label=name)
            ax.legend()
        axes[-1, 0].set_xlabel('t')
    else:
        fig, ax = plt.subplots()
        for name in names:
            ax.plot(data['t'], data[name], label=name)
        ax.set_xlabel('t')
        ax.legend()


def diagram2D(csvpath, xname, yname):
    data = load(csvpath)
    fig, ax = plt.subplots()
    ax.plot(data[xname], data[yname])
    ax.set_xlabel(xname)
    ax.set_ylabel(yname)


def diagram3D(csvpath, xname, yname, zname):
    data = load(csvpath)
    fig = plt.figure()
    ax = fig.add_subplot(projection='3d')
    ax.plot(data[xname], data[yname], data[zname], linewidth=0.5)
    ax.set_xlabel(xname)
    ax.set_ylabel(yname)
    ax.set_zlabel(zname)


def firstReturnMap(csvpath, xname, yname):
    data = load(csvpath)
    fig, ax = plt.subplots()
    ax.plot(data[xname], data[yname], '.', markersize=1)
    ax.set_xlabel(xname)
    ax.set_ylabel(yname)

"#;

/// A Python plotting script built from CSV references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotScript {
    commands: Vec<PlotCommand>,
}

impl PlotScript {
    /// Interpreter used by [`execute`](Self::execute).
    pub const DEFAULT_INTERPRETER: &'static str = "python3";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plots the named columns against time, on one axis or (with `multi`)
    /// one axis per column.
    #[must_use]
    pub fn timeseries<S: AsRef<str>>(mut self, csv: impl AsRef<Path>, names: &[S], multi: bool) -> Self {
        self.commands.push(PlotCommand::TimeSeries {
            csv: path_string(csv.as_ref()),
            names: names.iter().map(|name| name.as_ref().to_string()).collect(),
            multi,
        });
        self
    }

    /// Plots the phase-plane trajectory `(x, y)`.
    #[must_use]
    pub fn diagram_2d(mut self, csv: impl AsRef<Path>, x: &str, y: &str) -> Self {
        self.commands.push(PlotCommand::Diagram2d {
            csv: path_string(csv.as_ref()),
            x: x.to_string(),
            y: y.to_string(),
        });
        self
    }

    /// Plots the 3D phase-space trajectory `(x, y, z)`.
    #[must_use]
    pub fn diagram_3d(mut self, csv: impl AsRef<Path>, x: &str, y: &str, z: &str) -> Self {
        self.commands.push(PlotCommand::Diagram3d {
            csv: path_string(csv.as_ref()),
            x: x.to_string(),
            y: y.to_string(),
            z: z.to_string(),
        });
        self
    }

    /// Plots `y` against `x` as unconnected points.
    #[must_use]
    pub fn first_return_map(mut self, csv: impl AsRef<Path>, x: &str, y: &str) -> Self {
        self.commands.push(PlotCommand::FirstReturnMap {
            csv: path_string(csv.as_ref()),
            x: x.to_string(),
            y: y.to_string(),
        });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Renders the full script text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut script = String::from(PRELUDE);

        for command in &self.commands {
            let line = match command {
                PlotCommand::TimeSeries { csv, names, multi } => {
                    let names: Vec<String> = names.iter().map(|name| py_str(name)).collect();
                    let multi = if *multi { "True" } else { "False" };
                    format!(
                        "timeseries({}, [{}], multi={multi})",
                        py_str(csv),
                        names.join(", ")
                    )
                }
                PlotCommand::Diagram2d { csv, x, y } => {
                    format!("diagram2D({}, {}, {})", py_str(csv), py_str(x), py_str(y))
                }
                PlotCommand::Diagram3d { csv, x, y, z } => format!(
                    "diagram3D({}, {}, {}, {})",
                    py_str(csv),
                    py_str(x),
                    py_str(y),
                    py_str(z)
                ),
                PlotCommand::FirstReturnMap { csv, x, y } => {
                    format!("firstReturnMap({}, {}, {})", py_str(csv), py_str(x), py_str(y))
                }
            };
            script.push_str(&line);
            script.push('\n');
        }

        script.push_str("plt.show()\n");
        script
    }

    /// Writes the rendered script to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError::Empty`] if no command was added, or an I/O error.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), PlotError> {
        if self.is_empty() {
            return Err(PlotError::Empty);
        }

        let path = path.as_ref();
        info!("creating plot script {}", path.display());
        fs::write(path, self.render())?;
        Ok(())
    }

    /// Runs the script at `path` with [`DEFAULT_INTERPRETER`](Self::DEFAULT_INTERPRETER).
    ///
    /// # Errors
    ///
    /// See [`execute_with`](Self::execute_with).
    pub fn execute(path: impl AsRef<Path>) -> Result<(), PlotError> {
        Self::execute_with(Self::DEFAULT_INTERPRETER, path)
    }

    /// Runs the script at `path` with `program` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `program` cannot be started, and
    /// [`PlotError::Failed`] if it exits unsuccessfully.
    pub fn execute_with(program: &str, path: impl AsRef<Path>) -> Result<(), PlotError> {
        let path = path.as_ref();
        info!("running {program} {}", path.display());

        let status = Command::new(program).arg(path).status()?;
        if !status.success() {
            return Err(PlotError::Failed {
                program: program.to_string(),
                script: path.to_path_buf(),
                status,
            });
        }
        Ok(())
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Quotes `s` as a single-quoted Python string literal.
fn py_str(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    #[test]
    fn renders_commands_in_order() {
        let script = PlotScript::new()
            .timeseries("data.csv", &["L", "D"], true)
            .diagram_3d("lorenz.csv", "x", "y", "z")
            .first_return_map("map.csv", "L", "D");

        let text = script.render();
        let commands: Vec<&str> = text
            .lines()
            .skip_while(|line| !line.starts_with("timeseries("))
            .collect();

        assert_eq!(
            commands,
            vec![
                "timeseries('data.csv', ['L', 'D'], multi=True)",
                "diagram3D('lorenz.csv', 'x', 'y', 'z')",
                "firstReturnMap('map.csv', 'L', 'D')",
                "plt.show()",
            ]
        );
    }

    #[test]
    fn escapes_quotes() {
        assert_eq!(py_str(r"it's"), r"'it\'s'");
        assert_eq!(py_str(r"C:\tmp"), r"'C:\\tmp'");
    }

    #[test]
    fn empty_script_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_plot.py");

        assert!(matches!(PlotScript::new().write(&path), Err(PlotError::Empty)));
        assert!(!path.exists());
    }

    #[test]
    fn writes_script() {
        let tmp = NamedTempFile::new().unwrap();
        PlotScript::new()
            .diagram_2d("spring.csv", "x", "v")
            .write(tmp.path())
            .unwrap();

        let text = fs::read_to_string(tmp.path()).unwrap();

        assert!(text.starts_with("import numpy as np"));
        assert!(text.contains("diagram2D('spring.csv', 'x', 'v')\nplt.show()\n"));
    }

    #[test]
    fn missing_interpreter_is_an_io_error() {
        let err = PlotScript::execute_with("odekit-no-such-interpreter", "script.py").unwrap_err();
        assert!(matches!(err, PlotError::Io(_)));
    }
}
