//! Probing stage.
//!
//! Feeds a subdomain list file to the probing tool (`httpx` by default) with
//! JSON output written straight to the session's live-host file, then reads
//! that file back line by line. Anything the tool managed to write is kept,
//! even when the run itself failed or timed out.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use subprobe_common::config::ToolSettings;
use subprobe_common::error::ReconError;
use subprobe_common::models::live_host::{LiveHostRecord, LiveHostSet};
use subprobe_common::tools::{ToolCommand, ToolRunner};
use subprobe_common::{debug, error, info, success, warn};

use crate::stage::{StageOutput, StageWarning};

/// The probing tool exits with 1 when it ran fine but found nothing.
pub const NO_RESULTS_EXIT_CODE: i32 = 1;

pub struct LiveHostProbe<'a> {
    runner: &'a dyn ToolRunner,
    settings: &'a ToolSettings,
}

impl<'a> LiveHostProbe<'a> {
    pub fn new(runner: &'a dyn ToolRunner, settings: &'a ToolSettings) -> Self {
        Self { runner, settings }
    }

    pub fn command(&self, input: &Path, output: &Path) -> ToolCommand {
        ToolCommand::new(&self.settings.program, self.settings.timeout)
            .arg("-l")
            .arg(input.display().to_string())
            .args(["-silent", "-status-code", "-content-length", "-title", "-tech-detect", "-json"])
            .arg("-o")
            .arg(output.display().to_string())
            .accept_code(NO_RESULTS_EXIT_CODE)
    }

    /// Probes every host listed in `input`, leaving JSON lines in `output`.
    ///
    /// A missing or empty `input` is a no-op with a warning. Tool failures and
    /// timeouts are warnings too; the records salvaged from `output` are
    /// returned either way.
    ///
    /// # Errors
    /// Only a missing tool, which the pre-flight check should already have caught.
    pub async fn probe(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<StageOutput<Vec<LiveHostRecord>>, ReconError> {
        info!("Probing for live hosts from: {}", input.display());
        let start: Instant = Instant::now();

        let host_count: usize = match count_entries(input) {
            Ok(0) => {
                warn!("No subdomains to probe in {}", input.display());
                return Ok(StageOutput::new(Vec::new(), start.elapsed())
                    .with_warning(StageWarning::EmptyInput(input.to_path_buf())));
            }
            Ok(count) => count,
            Err(e) => {
                error!("Input file {} could not be read: {e}", input.display());
                return Ok(StageOutput::new(Vec::new(), start.elapsed())
                    .with_warning(StageWarning::MissingInput(input.to_path_buf())));
            }
        };

        let command: ToolCommand = self.command(input, output);
        info!("Running {} on {host_count} subdomains", self.settings.program);
        info!("Command: {}", command.command_line());

        let mut warnings: Vec<StageWarning> = Vec::new();
        match self.runner.run(&command).await {
            Ok(_) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!("{e}");
                warnings.push(StageWarning::Tool(e));
            }
        }
        let elapsed = start.elapsed();

        let set: LiveHostSet = match LiveHostSet::load(output) {
            Ok(set) => set,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} wrote no output file", self.settings.program);
                warnings.push(StageWarning::NoOutputFile(output.to_path_buf()));
                LiveHostSet::default()
            }
            Err(e) => {
                error!("Could not read {}: {e}", output.display());
                warnings.push(StageWarning::UnreadableOutput(output.to_path_buf(), e));
                LiveHostSet::default()
            }
        };

        if set.skipped > 0 {
            debug!("Skipped {} unparseable lines in {}", set.skipped, output.display());
            warnings.push(StageWarning::SkippedLines(set.skipped));
        }

        success!(
            "Found {} live hosts in {:.2} seconds",
            set.len(),
            elapsed.as_secs_f64()
        );

        Ok(StageOutput {
            data: set.records,
            elapsed,
            warnings,
        })
    }
}

/// Number of non-blank lines in a subdomain list file.
fn count_entries(path: &Path) -> io::Result<usize> {
    let text: String = fs::read_to_string(path)?;
    Ok(text.lines().filter(|line| !line.trim().is_empty()).count())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
