use std::sync::Arc;

use colored::*;
use subprobe_common::config::{Config, NOTIFY_TIMEOUT, PROBING_TOOL};
use subprobe_common::models::domain::Domain;
use subprobe_common::models::session::ScanSession;
use subprobe_common::warn;
use subprobe_core::notifier::WebhookNotifier;
use subprobe_core::runner::ProcessRunner;
use subprobe_core::service::ScanService;

use crate::terminal::{colors, format, print, spinner};

const SUBDOMAIN_PREVIEW: usize = 10;
const LIVE_HOST_PREVIEW: usize = 5;

pub async fn scan(domain: Domain, cfg: &Config) -> anyhow::Result<()> {
    print::header("starting scan", cfg.quiet);
    if cfg.quiet == 0 {
        print::aligned_line("Target", domain.to_string());
        print::aligned_line("Output", cfg.output_dir.display().to_string());
        if let Some(notify) = &cfg.notify {
            print::aligned_line("Notify", notify.backend.name());
        }
        print::fat_separator();
    }

    let service = ScanService::new(Arc::new(ProcessRunner), cfg.clone())
        .with_progress(Box::new(spinner::on_stage_event));

    let outcome = service.run(domain).await?;
    let session: &ScanSession = &outcome.session;

    if cfg.quiet == 0 {
        preview_subdomains(session);
        if !cfg.skip_probing {
            preview_live_hosts(session);
        }
    }

    if cfg.notify.is_some() {
        match WebhookNotifier::new(NOTIFY_TIMEOUT) {
            Ok(notifier) => {
                service.notify(session, &notifier).await;
            }
            Err(e) => warn!("Notification skipped: {e}"),
        }
    }

    summary(session, cfg.quiet);
    Ok(())
}

fn preview_subdomains(session: &ScanSession) {
    if session.subdomains.is_empty() {
        return;
    }

    print::header("subdomains", 0);
    for subdomain in session.subdomains.iter().take(SUBDOMAIN_PREVIEW) {
        print::print_status(subdomain);
    }
    let rest: usize = session.subdomains.len().saturating_sub(SUBDOMAIN_PREVIEW);
    if rest > 0 {
        print::print_status(format!("... and {rest} more"));
    }
}

fn preview_live_hosts(session: &ScanSession) {
    if session.live_hosts.is_empty() {
        return;
    }

    print::header("live hosts", 0);
    for (idx, record) in session.live_hosts.iter().take(LIVE_HOST_PREVIEW).enumerate() {
        print::tree_head(idx, &record.url);
        print::as_tree_one_level(format::record_to_details(record));
    }
    let rest: usize = session.live_hosts.len().saturating_sub(LIVE_HOST_PREVIEW);
    if rest > 0 {
        print::print_status(format!("... and {rest} more"));
    }
}

fn summary(session: &ScanSession, q_level: u8) {
    print::header("scan complete!", 0);
    print::aligned_line(
        "Subdomains",
        session.subdomains.len().to_string().color(colors::ACCENT).bold(),
    );
    print::aligned_line(
        "Live Hosts",
        session.live_hosts.len().to_string().color(colors::ACCENT).bold(),
    );
    print::aligned_line("Saved in", session.files.output_dir.display().to_string());
    if q_level == 0 {
        print::end_of_program();
    }
}

/// How to obtain a missing external tool.
pub fn install_hint(tool: &str) -> String {
    let path: &str = if tool == PROBING_TOOL {
        "httpx/cmd/httpx"
    } else {
        "subfinder/v2/cmd/subfinder"
    };
    format!("Install it with: go install -v github.com/projectdiscovery/{path}@latest")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
