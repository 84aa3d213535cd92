//! # Scan Session Model
//!
//! A scan writes three files into the output directory, all sharing the
//! `{domain}_{timestamp}_` prefix:
//!
//! * `{domain}_{timestamp}_subdomains.txt`
//! * `{domain}_{timestamp}_live.json`
//! * `{domain}_{timestamp}_report.txt`
//!
//! The timestamp (`YYYYMMDD_HHMMSS`) sorts lexicographically in time order,
//! which is what makes "the most recent subdomain list" a plain string sort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::ReconError;
use crate::models::domain::Domain;
use crate::models::live_host::LiveHostRecord;
use crate::models::subdomain::SubdomainList;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Subdomains,
    LiveHosts,
    Report,
}

impl FileKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            FileKind::Subdomains => "subdomains.txt",
            FileKind::LiveHosts => "live.json",
            FileKind::Report => "report.txt",
        }
    }

    pub fn file_name(&self, domain: &Domain, stamp: &str) -> String {
        format!("{domain}_{stamp}_{}", self.suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFiles {
    pub output_dir: PathBuf,
    pub subdomains: PathBuf,
    pub live_hosts: PathBuf,
    pub report: PathBuf,
}

impl SessionFiles {
    pub fn new(output_dir: &Path, domain: &Domain, stamp: &str) -> Self {
        let path = |kind: FileKind| output_dir.join(kind.file_name(domain, stamp));
        Self {
            output_dir: output_dir.to_path_buf(),
            subdomains: path(FileKind::Subdomains),
            live_hosts: path(FileKind::LiveHosts),
            report: path(FileKind::Report),
        }
    }

    pub fn for_time(output_dir: &Path, domain: &Domain, started_at: &DateTime<Local>) -> Self {
        Self::new(output_dir, domain, &started_at.format(TIMESTAMP_FORMAT).to_string())
    }
}

/// Finds the newest `{domain}_*_subdomains.txt` in `dir`.
///
/// A missing directory simply has no candidates.
pub fn latest_subdomain_file(dir: &Path, domain: &Domain) -> Result<Option<PathBuf>, ReconError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ReconError::io(format!("listing {}", dir.display()), e)),
    };

    let prefix: String = format!("{domain}_");
    let suffix: String = format!("_{}", FileKind::Subdomains.suffix());

    let mut candidates: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            name.len() > prefix.len() + suffix.len()
                && name.starts_with(&prefix)
                && name.ends_with(&suffix)
        })
        .collect();

    candidates.sort();
    Ok(candidates.pop().map(|name| dir.join(name)))
}

/// State of one scan from invocation to exit.
///
/// Everything except the two result sequences is fixed at creation.
#[derive(Debug, Clone)]
pub struct ScanSession {
    pub domain: Domain,
    pub started_at: DateTime<Local>,
    pub files: SessionFiles,
    /// The list actually probed: this session's own file, or a resumed one.
    pub subdomain_source: PathBuf,
    pub subdomains: SubdomainList,
    pub live_hosts: Vec<LiveHostRecord>,
}

impl ScanSession {
    pub fn new(domain: Domain, output_dir: &Path, started_at: DateTime<Local>) -> Self {
        let files: SessionFiles = SessionFiles::for_time(output_dir, &domain, &started_at);
        Self {
            subdomain_source: files.subdomains.clone(),
            domain,
            started_at,
            files,
            subdomains: SubdomainList::new(),
            live_hosts: Vec::new(),
        }
    }

    pub fn stamp(&self) -> String {
        self.started_at.format(TIMESTAMP_FORMAT).to_string()
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
