use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Maximum number of stderr characters kept on a [`ReconError::ToolFailure`].
pub const STDERR_PREVIEW_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ReconError {
    /// A required external tool does not resolve in `PATH`.
    #[error("{tool} is not installed or not in PATH")]
    ToolMissing { tool: String },

    #[error("{tool} timed out after {} seconds", .after.as_secs())]
    ToolTimeout { tool: String, after: Duration },

    /// The tool ran but exited with a code the caller does not accept.
    #[error("{tool} failed ({}): {stderr}", exit_label(.code))]
    ToolFailure {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to run {tool}: {source}")]
    ToolIo {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// Enumeration was skipped but no earlier subdomain list exists.
    #[error("no existing subdomains file for {domain} in {}", .dir.display())]
    ResumptionMissing { domain: String, dir: PathBuf },

    #[error("invalid domain '{input}': {reason}")]
    InvalidDomain { input: String, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("notification failed: {0}")]
    Notification(String),

    #[error("failed to write report {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReconError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn tool_failure(tool: impl Into<String>, code: Option<i32>, stderr: &str) -> Self {
        Self::ToolFailure {
            tool: tool.into(),
            code,
            stderr: stderr.trim().chars().take(STDERR_PREVIEW_LEN).collect(),
        }
    }

    /// Whether this error terminates the process with a non-zero exit code.
    ///
    /// Everything else is stage-local and only degrades the results.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ToolMissing { .. }
                | Self::ResumptionMissing { .. }
                | Self::InvalidDomain { .. }
                | Self::Io { .. }
        )
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => String::from("terminated by signal"),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
