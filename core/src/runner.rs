use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use subprobe_common::debug;
use subprobe_common::error::ReconError;
use subprobe_common::tools::{ToolCommand, ToolOutput, ToolRunner};

/// Runs tools as child processes of this one.
///
/// Children are killed when their future is dropped, so a timeout or a
/// Ctrl-C never leaves a tool running behind us.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl ToolRunner for ProcessRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ReconError> {
        let tool: &str = &command.program;
        if !self.is_available(tool) {
            return Err(ReconError::ToolMissing { tool: tool.to_string() });
        }

        let child = Command::new(tool)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ReconError::ToolIo { tool: tool.to_string(), source })?;

        let output = match timeout(command.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| ReconError::ToolIo { tool: tool.to_string(), source })?,
            Err(_) => {
                return Err(ReconError::ToolTimeout {
                    tool: tool.to_string(),
                    after: command.timeout,
                });
            }
        };

        let output = ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        debug!("{tool} exited with {:?}", output.exit_code);

        match output.exit_code {
            Some(code) if command.accepts(code) => Ok(output),
            code => Err(ReconError::tool_failure(tool, code, &output.stderr)),
        }
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
