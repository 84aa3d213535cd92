//! Contract for running the external discovery and probing tools.
//!
//! The pipeline never spawns processes itself; it builds a [`ToolCommand`]
//! and hands it to a [`ToolRunner`]. The process-backed runner lives in
//! `core`, tests substitute scripted ones.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ReconError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
    /// Non-zero exit codes that still count as a successful run.
    pub accepted_codes: Vec<i32>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout,
            accepted_codes: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn accept_code(mut self, code: i32) -> Self {
        self.accepted_codes.push(code);
        self
    }

    pub fn accepts(&self, code: i32) -> bool {
        code == 0 || self.accepted_codes.contains(&code)
    }

    /// Value following `flag` in the argument list, if any.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|idx| self.args.get(idx + 1))
            .map(String::as_str)
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Whether `program` resolves in the execution search path.
    fn is_available(&self, program: &str) -> bool;

    /// Runs the command to completion or until its timeout expires.
    ///
    /// # Errors
    /// * [`ReconError::ToolMissing`] when the program does not resolve; nothing is spawned.
    /// * [`ReconError::ToolTimeout`] when the timeout expires; the process is killed.
    /// * [`ReconError::ToolFailure`] for exit codes not accepted by the command.
    /// * [`ReconError::ToolIo`] when spawning or collecting output fails.
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ReconError>;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
