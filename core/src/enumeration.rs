//! Enumeration stage.
//!
//! Runs the enumeration tool (`subfinder -d <domain> -silent` by default),
//! keeps each hostname once in order of first appearance and writes the
//! list to the session's subdomain file.

use std::path::Path;
use std::time::Instant;

use subprobe_common::config::ToolSettings;
use subprobe_common::error::ReconError;
use subprobe_common::models::domain::Domain;
use subprobe_common::models::subdomain::SubdomainList;
use subprobe_common::tools::{ToolCommand, ToolRunner};
use subprobe_common::{error, info, success, warn};

use crate::stage::{StageOutput, StageWarning};

pub struct SubdomainCollector<'a> {
    runner: &'a dyn ToolRunner,
    settings: &'a ToolSettings,
}

impl<'a> SubdomainCollector<'a> {
    pub fn new(runner: &'a dyn ToolRunner, settings: &'a ToolSettings) -> Self {
        Self { runner, settings }
    }

    pub fn command(&self, domain: &Domain) -> ToolCommand {
        ToolCommand::new(&self.settings.program, self.settings.timeout)
            .args(["-d", domain.as_str(), "-silent"])
    }

    /// Collects subdomains of `domain` and writes them to `output`.
    ///
    /// Tool timeouts and failures are not errors: they come back as a
    /// [`StageWarning::Tool`] with an empty list, and no file is written.
    ///
    /// # Errors
    /// * A missing tool, which the pre-flight check should already have caught.
    /// * Failure to write `output`.
    pub async fn collect(
        &self,
        domain: &Domain,
        output: &Path,
    ) -> Result<StageOutput<SubdomainList>, ReconError> {
        info!("Starting subdomain enumeration for: {domain}");
        let command: ToolCommand = self.command(domain);
        info!("Running command: {}", command.command_line());

        let start: Instant = Instant::now();
        let result = self.runner.run(&command).await;
        let elapsed = start.elapsed();

        let stdout: String = match result {
            Ok(tool_output) => tool_output.stdout,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!("{e}");
                return Ok(StageOutput::new(SubdomainList::new(), elapsed)
                    .with_warning(StageWarning::Tool(e)));
            }
        };

        let subdomains: SubdomainList = SubdomainList::from_lines(&stdout);
        subdomains.write_to(output)?;

        let mut stage = StageOutput::new(subdomains, elapsed);
        if stage.data.is_empty() {
            warn!("{} produced no subdomains", self.settings.program);
            stage = stage.with_warning(StageWarning::NoResults);
        } else {
            success!("Found {} unique subdomains", stage.data.len());
        }
        info!("Results saved to: {}", output.display());

        Ok(stage)
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
