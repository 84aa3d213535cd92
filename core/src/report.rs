use std::fmt::{self, Write};
use std::fs;

use subprobe_common::error::ReconError;
use subprobe_common::models::live_host::LiveHostRecord;
use subprobe_common::models::session::ScanSession;

const WIDE_RULE: usize = 50;
const NARROW_RULE: usize = 30;
const NOT_AVAILABLE: &str = "N/A";

pub struct ReportBuilder;

impl ReportBuilder {
    /// Renders the plain-text report for a finished session.
    pub fn render(session: &ScanSession) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = render_into(&mut out, session);
        out
    }

    /// Writes the report next to the session's data files.
    pub fn write(session: &ScanSession) -> Result<(), ReconError> {
        let path = &session.files.report;
        fs::write(path, Self::render(session)).map_err(|source| ReconError::ReportWrite {
            path: path.clone(),
            source,
        })
    }
}

fn render_into(out: &mut impl Write, session: &ScanSession) -> fmt::Result {
    let wide: String = "=".repeat(WIDE_RULE);

    writeln!(out, "Subdomain Scan Report")?;
    writeln!(out, "{wide}")?;
    writeln!(out, "Target Domain: {}", session.domain)?;
    writeln!(out, "Scan Time: {}", session.started_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "Total Subdomains Found: {}", session.subdomains.len())?;
    writeln!(out, "Total Live Hosts Found: {}", session.live_hosts.len())?;
    writeln!(out)?;
    writeln!(out, "Subdomains File: {}", session.subdomain_source.display())?;
    writeln!(out, "Live Hosts File: {}", session.files.live_hosts.display())?;
    writeln!(out)?;
    writeln!(out, "{wide}")?;

    if !session.live_hosts.is_empty() {
        writeln!(out)?;
        writeln!(out, "LIVE HOSTS DETAILS:")?;
        writeln!(out, "{}", "-".repeat(WIDE_RULE))?;
        for record in &session.live_hosts {
            render_record(&mut *out, record)?;
        }
    }
    Ok(())
}

fn render_record(out: &mut impl Write, record: &LiveHostRecord) -> fmt::Result {
    let status: String = record
        .status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    writeln!(out, "URL: {}", record.url)?;
    writeln!(out, "Status: {status}")?;
    writeln!(out, "Title: {}", record.title.as_deref().unwrap_or(NOT_AVAILABLE))?;
    if !record.technologies.is_empty() {
        writeln!(out, "Technologies: {}", record.technologies.join(", "))?;
    }
    writeln!(out, "{}", "-".repeat(NARROW_RULE))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
