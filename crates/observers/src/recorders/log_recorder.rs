use log::{Level, log};
use odekit_core::Recorder;

/// Emits one log line per sample.
///
/// Lines are written under the target `odekit::trajectory`, at level `info`
/// unless changed with [`at_level`](Self::at_level):
///
/// ```text
/// t: 0.25, x0: 0.4844, x1: -0.2475
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecorder {
    level: Level,
}

impl LogRecorder {
    /// Log target used for every sample line.
    pub const TARGET: &'static str = "odekit::trajectory";

    #[must_use]
    pub fn new() -> Self {
        Self { level: Level::Info }
    }

    #[must_use]
    pub fn at_level(self, level: Level) -> Self {
        Self { level }
    }

    /// Formats a sample the way it is logged.
    #[must_use]
    pub fn format(t: f64, x: &[f64]) -> String {
        let mut line = format!("t: {t:.2}");
        for (i, xi) in x.iter().enumerate() {
            line.push_str(&format!(", x{i}: {xi:.4}"));
        }
        line
    }
}

impl Default for LogRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder for LogRecorder {
    fn record(&mut self, t: f64, x: &[f64]) {
        log!(target: Self::TARGET, self.level, "{}", Self::format(t, x));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Mutex, Once};

    use log::{LevelFilter, Log, Metadata, Record};

    /// Keeps every line logged under the trajectory target.
    struct Capture;

    static LINES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
    static INSTALL: Once = Once::new();

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.target() == LogRecorder::TARGET
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                LINES
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    fn captured() -> Vec<(Level, String)> {
        LINES.lock().unwrap().clone()
    }

    fn install_capture() {
        INSTALL.call_once(|| {
            log::set_logger(&Capture).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });
    }

    #[test]
    fn formats_every_component() {
        assert_eq!(
            LogRecorder::format(0.25, &[0.484_375, -0.2475]),
            "t: 0.25, x0: 0.4844, x1: -0.2475"
        );
        assert_eq!(LogRecorder::format(1.0, &[]), "t: 1.00");
    }

    #[test]
    fn emits_one_line_per_sample_at_the_chosen_level() {
        install_capture();

        LogRecorder::new().record(0.5, &[2.0]);
        let mut recorder = LogRecorder::new().at_level(Level::Debug);
        recorder.record(0.75, &[1.0, -1.0]);

        let lines = captured();
        assert!(lines.contains(&(Level::Info, "t: 0.50, x0: 2.0000".to_string())));
        assert!(lines.contains(&(Level::Debug, "t: 0.75, x0: 1.0000, x1: -1.0000".to_string())));
    }
}
