use std::fmt;
use std::str::FromStr;

use crate::error::ReconError;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A target domain such as `example.com`.
///
/// Only syntactic hostname checks are made; no resolution happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Domain {
    type Err = ReconError;

    /// Accepts a bare hostname, optionally with one trailing dot.
    ///
    /// Rejected:
    /// * empty input
    /// * anything carrying a protocol scheme (`https://example.com`)
    /// * paths, ports, whitespace or characters outside `[A-Za-z0-9-.]`
    /// * empty labels, labels over 63 characters, labels starting or ending with `-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ReconError::InvalidDomain {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed: &str = s.trim();
        if trimmed.is_empty() {
            return Err(invalid("domain is empty"));
        }
        if trimmed.contains("://") {
            return Err(invalid("remove the protocol scheme"));
        }

        let host: &str = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if host.len() > MAX_DOMAIN_LEN {
            return Err(invalid("longer than 253 characters"));
        }

        for label in host.split('.') {
            if label.is_empty() {
                return Err(invalid("contains an empty label"));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(invalid("label longer than 63 characters"));
            }
            if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(invalid("only letters, digits, '-' and '.' are allowed"));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(invalid("labels cannot start or end with '-'"));
            }
        }

        Ok(Self(host.to_string()))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
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
