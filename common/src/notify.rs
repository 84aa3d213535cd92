//! Scan-completion notifications.
//!
//! Each [`Backend`] knows how to turn a destination identifier and a
//! [`NotificationPayload`] into a concrete [`Delivery`] (endpoint + JSON body).
//! Sending the delivery is left to a [`NotificationGateway`].

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde_json::{Value, json};

use crate::error::ReconError;

pub const SENDER_NAME: &str = "Subdomain Scanner";
const TELEGRAM_API: &str = "https://api.telegram.org";
const ENV_SUFFIX: &str = "_WEBHOOK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Bot API; the destination is `<bot token>/<chat id>`.
    Telegram,
    /// Incoming webhook URL.
    Discord,
    /// Incoming webhook URL.
    Slack,
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Telegram => "telegram",
            Backend::Discord => "discord",
            Backend::Slack => "slack",
        }
    }

    /// Environment variable consulted when no destination is given explicitly.
    pub fn env_key(&self) -> String {
        format!("{}{ENV_SUFFIX}", self.name().to_uppercase())
    }

    /// Builds the HTTP request this backend expects for `payload`.
    pub fn delivery(
        &self,
        destination: &str,
        payload: &NotificationPayload,
    ) -> Result<Delivery, ReconError> {
        let text: String = payload.message();
        match self {
            Backend::Telegram => {
                let (token, chat_id) = split_telegram_destination(destination)?;
                Ok(Delivery {
                    endpoint: format!("{TELEGRAM_API}/bot{token}/sendMessage"),
                    body: json!({
                        "chat_id": chat_id,
                        "text": text,
                        "parse_mode": "HTML",
                    }),
                })
            }
            Backend::Discord => Ok(Delivery {
                endpoint: destination.to_string(),
                body: json!({
                    "content": text,
                    "username": SENDER_NAME,
                }),
            }),
            Backend::Slack => Ok(Delivery {
                endpoint: destination.to_string(),
                body: json!({
                    "text": text,
                    "username": SENDER_NAME,
                    "icon_emoji": ":mag:",
                }),
            }),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The last two `/`-separated segments are the bot token and the chat id.
fn split_telegram_destination(destination: &str) -> Result<(&str, &str), ReconError> {
    let mut segments = destination.trim_end_matches('/').rsplit('/');
    let chat_id: &str = segments.next().unwrap_or_default();
    let token: &str = segments.next().unwrap_or_default();

    if token.is_empty() || chat_id.is_empty() {
        return Err(ReconError::Notification(String::from(
            "telegram destination must look like <bot token>/<chat id>",
        )));
    }
    Ok((token, chat_id))
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    pub domain: String,
    pub subdomain_count: usize,
    pub live_host_count: usize,
    pub generated_at: DateTime<Local>,
}

impl NotificationPayload {
    pub fn message(&self) -> String {
        format!(
            "\nSubdomain Scan Complete!\n\
             • Target: {}\n\
             • Subdomains Found: {}\n\
             • Live Hosts: {}\n\
             • Time: {}\n",
            self.domain,
            self.subdomain_count,
            self.live_host_count,
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub endpoint: String,
    pub body: Value,
}

/// Where a destination identifier came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Explicit(String),
    Environment { key: String, value: String },
}

impl Destination {
    pub fn value(&self) -> &str {
        match self {
            Destination::Explicit(value) => value,
            Destination::Environment { value, .. } => value,
        }
    }
}

/// An explicit, non-empty destination always wins over the environment.
pub fn resolve_destination<F>(
    backend: Backend,
    explicit: Option<&str>,
    lookup: F,
) -> Option<Destination>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
        return Some(Destination::Explicit(value.to_string()));
    }

    let key: String = backend.env_key();
    lookup(&key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(|value| Destination::Environment { key, value })
}

#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Sends one delivery. Non-2xx responses and transport errors are
    /// reported as [`ReconError::Notification`].
    async fn deliver(&self, delivery: &Delivery) -> Result<(), ReconError>;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
