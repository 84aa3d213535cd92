pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use subprobe_common::config::{
    Config, DEFAULT_OUTPUT_DIR, ENUMERATION_TIMEOUT, NotifySettings, PROBING_TIMEOUT, ToolSettings,
};
use subprobe_common::models::domain::Domain;
use subprobe_common::notify::Backend;

const EXAMPLES: &str = "\
Examples:
  subprobe -d example.com
  subprobe -d example.com -o ./scan_results
  subprobe -d example.com --skip-subfinder
  subprobe -d example.com --notify telegram --webhook <BOT_TOKEN>/<CHAT_ID>
  DISCORD_WEBHOOK=https://discord.com/api/webhooks/... subprobe -d example.com --notify discord";

#[derive(Parser)]
#[command(name = "subprobe")]
#[command(about = "Subdomain enumeration and live host detection.")]
#[command(version, after_help = EXAMPLES)]
pub struct CommandLine {
    /// Target domain to scan (e.g. example.com)
    #[arg(short, long)]
    pub domain: Domain,

    /// Directory receiving the subdomain list, live hosts and report
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Send a completion notification via this platform
    #[arg(long, value_enum, default_value_t = NotifyChoice::None)]
    pub notify: NotifyChoice,

    /// Webhook URL, or <BOT_TOKEN>/<CHAT_ID> for telegram [env: <PLATFORM>_WEBHOOK]
    #[arg(long)]
    pub webhook: Option<String>,

    /// Reuse the newest existing subdomains file instead of running subfinder
    #[arg(long)]
    pub skip_subfinder: bool,

    /// Do not probe for live hosts
    #[arg(long)]
    pub skip_httpx: bool,

    /// Seconds before subfinder is abandoned
    #[arg(long, value_name = "SECS", default_value_t = ENUMERATION_TIMEOUT.as_secs())]
    pub subfinder_timeout: u64,

    /// Seconds before httpx is abandoned
    #[arg(long, value_name = "SECS", default_value_t = PROBING_TIMEOUT.as_secs())]
    pub httpx_timeout: u64,

    /// Less output; repeat for even less
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Hide the banner
    #[arg(long)]
    pub no_banner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifyChoice {
    None,
    Telegram,
    Discord,
    Slack,
}

impl NotifyChoice {
    pub fn backend(self) -> Option<Backend> {
        match self {
            NotifyChoice::None => None,
            NotifyChoice::Telegram => Some(Backend::Telegram),
            NotifyChoice::Discord => Some(Backend::Discord),
            NotifyChoice::Slack => Some(Backend::Slack),
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let defaults = Config::default();
        Config {
            output_dir: self.output_dir.clone(),
            skip_enumeration: self.skip_subfinder,
            skip_probing: self.skip_httpx,
            enumeration: ToolSettings::new(
                defaults.enumeration.program,
                Duration::from_secs(self.subfinder_timeout),
            ),
            probing: ToolSettings::new(
                defaults.probing.program,
                Duration::from_secs(self.httpx_timeout),
            ),
            notify: self.notify.backend().map(|backend| NotifySettings {
                backend,
                destination: self.webhook.clone(),
            }),
            quiet: self.quiet,
            no_banner: self.no_banner,
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
