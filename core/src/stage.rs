use std::io;
use std::path::PathBuf;
use std::time::Duration;

use subprobe_common::error::ReconError;

/// The two discovery stages, in the only order they ever run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Enumeration,
    Probing,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Enumeration => "subdomain enumeration",
            Stage::Probing => "live host probing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    Started(Stage),
    Finished(Stage),
}

/// Something went wrong inside a stage without stopping the scan.
#[derive(Debug)]
pub enum StageWarning {
    /// The tool timed out, failed, or could not be started.
    Tool(ReconError),
    /// The tool ran but produced nothing.
    NoResults,
    /// The probe input list could not be read.
    MissingInput(PathBuf),
    /// The probe input list has no entries.
    EmptyInput(PathBuf),
    /// The probing tool did not create its output file.
    NoOutputFile(PathBuf),
    /// The probing tool's output file exists but could not be read.
    UnreadableOutput(PathBuf, io::Error),
    /// Lines of probe output that were neither structured nor a URL.
    SkippedLines(usize),
}

/// What a stage hands back: its data, how long it took, and what went wrong.
#[derive(Debug)]
pub struct StageOutput<T> {
    pub data: T,
    pub elapsed: Duration,
    pub warnings: Vec<StageWarning>,
}

impl<T> StageOutput<T> {
    pub fn new(data: T, elapsed: Duration) -> Self {
        Self {
            data,
            elapsed,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: StageWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn tool_error(&self) -> Option<&ReconError> {
        self.warnings.iter().find_map(|warning| match warning {
            StageWarning::Tool(err) => Some(err),
            _ => None,
        })
    }
}
