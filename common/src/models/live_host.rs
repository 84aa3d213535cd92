use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

/// One endpoint reported by the probing tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiveHostRecord {
    /// The host as it was fed to the probe. Absent for bare-URL lines.
    pub input: Option<String>,
    pub url: String,
    pub status_code: Option<u16>,
    pub content_length: Option<u64>,
    pub title: Option<String>,
    pub technologies: Vec<String>,
}

impl LiveHostRecord {
    /// A record carrying nothing but the URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// First stage: decode a JSON object.
    ///
    /// Falls back from `url` to `input`; an object with neither is rejected.
    /// Optional fields of an unexpected type are left empty rather than
    /// discarding the whole record.
    pub fn parse_structured(line: &str) -> Option<Self> {
        let Value::Object(raw) = serde_json::from_str::<Value>(line).ok()? else {
            return None;
        };

        let input: Option<String> = string_field(&raw, &["input"]);
        let url: String = string_field(&raw, &["url"]).or_else(|| input.clone())?;
        let technologies: Vec<String> = field(&raw, &["tech", "technologies"])
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();

        Some(Self {
            input,
            url,
            status_code: number_field(&raw, &["status_code", "status-code"])
                .and_then(|code| u16::try_from(code).ok()),
            content_length: number_field(&raw, &["content_length", "content-length"]),
            title: string_field(&raw, &["title"]),
            technologies,
        })
    }

    /// Second stage: accept a plain `http(s)://` line as a minimal record.
    pub fn parse_bare_url(line: &str) -> Option<Self> {
        line.starts_with("http").then(|| Self::from_url(line))
    }

    /// Parses one line of probe output, structured first, bare URL second.
    ///
    /// Returns `None` for blank lines and for lines neither stage accepts.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line: &str = line.trim();
        if line.is_empty() {
            return None;
        }
        Self::parse_structured(line).or_else(|| Self::parse_bare_url(line))
    }
}

/// First of `keys` present with a non-null value.
fn field<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|key| raw.get(*key)).find(|value| !value.is_null())
}

fn string_field(raw: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    field(raw, keys)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Accepts a JSON number or a numeric string.
fn number_field(raw: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    match field(raw, keys)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Records in the order the probing tool emitted them, without de-duplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveHostSet {
    pub records: Vec<LiveHostRecord>,
    /// Non-blank lines that could not be turned into a record.
    pub skipped: usize,
}

impl LiveHostSet {
    /// Parses newline-delimited output; every line stands on its own, so a
    /// truncated or partially corrupt file still yields its good lines.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::default();
        for raw_line in bytes.split(|b| *b == b'\n') {
            let line = String::from_utf8_lossy(raw_line);
            if line.trim().is_empty() {
                continue;
            }
            match LiveHostRecord::parse_line(&line) {
                Some(record) => set.records.push(record),
                None => set.skipped += 1,
            }
        }
        set
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        Ok(Self::from_bytes(&fs::read(path)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
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
