// keyval/src/report.rs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{io::Write, sync::Mutex};

/// Where run-level messages go: informational echo, warnings, and the final failure.
pub trait Reporter: Send + Sync {
    fn info(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn failed(&self, msg: &str);
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Plain log lines through the tracing subscriber
    #[default]
    Log,
    /// GitHub Actions workflow commands (`::warning::`, `::error::`) on stdout
    Actions,
}

impl ReportFormat {
    pub fn reporter(self) -> Box<dyn Reporter> {
        match self {
            Self::Log => Box::new(LogReporter),
            Self::Actions => Box::new(ActionsReporter::stdout()),
        }
    }
}

pub struct LogReporter;

impl Reporter for LogReporter {
    fn info(&self, msg: &str) { tracing::info!("{msg}"); }
    fn warning(&self, msg: &str) { tracing::warn!("{msg}"); }
    fn failed(&self, msg: &str) { tracing::error!("{msg}"); }
}

/// Writes workflow commands; stdout unless built with [`ActionsReporter::new`].
pub struct ActionsReporter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ActionsReporter {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Mutex::new(Box::new(out)) }
    }

    pub fn stdout() -> Self { Self::new(std::io::stdout()) }

    fn emit(&self, line: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            tracing::debug!(error = %e, line, "could not write workflow command");
        }
    }
}

impl Reporter for ActionsReporter {
    fn info(&self, msg: &str) { self.emit(msg); }
    fn warning(&self, msg: &str) { self.emit(&format!("::warning::{}", escape_data(msg))); }
    fn failed(&self, msg: &str) { self.emit(&format!("::error::{}", escape_data(msg))); }
}

/// Workflow command payloads must not contain raw `%`, CR or LF.
pub fn escape_data(msg: &str) -> String {
    msg.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Reporter;
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Level { Info, Warning, Failed }

    #[derive(Default)]
    pub struct RecordingReporter {
        pub lines: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingReporter {
        pub fn at(&self, level: Level) -> Vec<String> {
            self.lines.lock().unwrap().iter().filter(|(l, _)| *l == level).map(|(_, m)| m.clone()).collect()
        }
    }

    impl Reporter for RecordingReporter {
        fn info(&self, msg: &str) { self.lines.lock().unwrap().push((Level::Info, msg.to_string())); }
        fn warning(&self, msg: &str) { self.lines.lock().unwrap().push((Level::Warning, msg.to_string())); }
        fn failed(&self, msg: &str) { self.lines.lock().unwrap().push((Level::Failed, msg.to_string())); }
    }
}
