use std::path::PathBuf;
use std::time::Duration;

use crate::notify::Backend;

pub const DEFAULT_OUTPUT_DIR: &str = "./results";
pub const ENUMERATION_TOOL: &str = "subfinder";
pub const PROBING_TOOL: &str = "httpx";
pub const ENUMERATION_TIMEOUT: Duration = Duration::from_secs(300);
pub const PROBING_TIMEOUT: Duration = Duration::from_secs(600);
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory receiving the subdomain list, live-host set and report.
    ///
    /// Also searched for an earlier subdomain list when enumeration is skipped.
    pub output_dir: PathBuf,
    /// Reuse the most recent subdomain list instead of running the enumeration tool.
    pub skip_enumeration: bool,
    pub skip_probing: bool,
    pub enumeration: ToolSettings,
    pub probing: ToolSettings,
    /// `None` disables notifications entirely.
    pub notify: Option<NotifySettings>,
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            skip_enumeration: false,
            skip_probing: false,
            enumeration: ToolSettings::new(ENUMERATION_TOOL, ENUMERATION_TIMEOUT),
            probing: ToolSettings::new(PROBING_TOOL, PROBING_TIMEOUT),
            notify: None,
            quiet: 0,
            no_banner: false,
        }
    }
}

/// Which executable a stage launches and how long it may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub program: String,
    pub timeout: Duration,
}

impl ToolSettings {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifySettings {
    pub backend: Backend,
    /// Explicit destination; takes precedence over the environment.
    pub destination: Option<String>,
}
