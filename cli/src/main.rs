mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, scan};
use subprobe_common::error::ReconError;
use subprobe_common::{error, warn};
use terminal::{logging, print, spinner};

const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    logging::init_logging();

    let cfg = commands.to_config();
    print::banner(cfg.no_banner, cfg.quiet);

    tokio::select! {
        result = scan::scan(commands.domain, &cfg) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                spinner::stop();
                error!("{e:#}");
                if let Some(ReconError::ToolMissing { tool }) = e.downcast_ref::<ReconError>() {
                    warn!("{}", scan::install_hint(tool));
                }
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            spinner::stop();
            warn!("Scan interrupted by user");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}
