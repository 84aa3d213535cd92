use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ReconError;

/// Unique hostnames in order of first appearance.
///
/// Uniqueness is case-sensitive and applies to the trimmed line, exactly as
/// the enumeration tool printed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubdomainList {
    entries: Vec<String>,
    seen: HashSet<String>,
}

impl SubdomainList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses line-oriented tool output, dropping blank lines and repeats.
    pub fn from_lines(text: &str) -> Self {
        let mut list = Self::new();
        for line in text.lines() {
            list.push(line);
        }
        list
    }

    /// Appends `host` unless it is blank or already present.
    ///
    /// Returns whether the host was added.
    pub fn push(&mut self, host: &str) -> bool {
        let host: &str = host.trim();
        if host.is_empty() || self.seen.contains(host) {
            return false;
        }
        self.seen.insert(host.to_string());
        self.entries.push(host.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// One hostname per line, each newline-terminated.
    pub fn to_file_contents(&self) -> String {
        self.entries.iter().map(|host| format!("{host}\n")).collect()
    }

    /// Overwrites `path` with the list.
    pub fn write_to(&self, path: &Path) -> Result<(), ReconError> {
        fs::write(path, self.to_file_contents())
            .map_err(|e| ReconError::io(format!("writing {}", path.display()), e))
    }

    /// Loads a list written by [`SubdomainList::write_to`] (or by hand).
    ///
    /// Re-applies de-duplication, which is a no-op for files this type wrote.
    pub fn load(path: &Path) -> Result<Self, ReconError> {
        let text: String = fs::read_to_string(path)
            .map_err(|e| ReconError::io(format!("reading {}", path.display()), e))?;
        Ok(Self::from_lines(&text))
    }
}

impl<'a> FromIterator<&'a str> for SubdomainList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = Self::new();
        for host in iter {
            list.push(host);
        }
        list
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
