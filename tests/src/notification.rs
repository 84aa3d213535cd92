#![cfg(test)]
use std::sync::Arc;

use subprobe_common::config::{Config, NotifySettings};
use subprobe_common::error::ReconError;
use subprobe_common::models::domain::Domain;
use subprobe_common::models::session::ScanSession;
use subprobe_common::notify::Backend;
use subprobe_core::service::{NotifyOutcome, ScanService};

use crate::support::{RecordingGateway, ScratchDir, ScriptedRunner, at, config_for};

fn session(dir: &ScratchDir) -> ScanSession {
    let domain: Domain = "example.com".parse().unwrap();
    let mut session = ScanSession::new(domain, &dir.path, at(17, 0, 0));
    session.subdomains = ["a.example.com", "b.example.com"].into_iter().collect();
    session
}

fn service(dir: &ScratchDir, backend: Backend, destination: Option<&str>) -> ScanService {
    let cfg = Config {
        notify: Some(NotifySettings {
            backend,
            destination: destination.map(str::to_string),
        }),
        ..config_for(&dir.path)
    };
    ScanService::new(Arc::new(ScriptedRunner::new()), cfg)
}

#[tokio::test]
async fn telegram_destination_is_split_into_token_and_chat() {
    let dir = ScratchDir::new("notify-telegram");
    let gateway = RecordingGateway::accepting();

    let outcome = service(&dir, Backend::Telegram, Some("token123/chatID456"))
        .notify_with_env(&session(&dir), &gateway, |_| None)
        .await;

    assert!(matches!(outcome, NotifyOutcome::Sent { backend: Backend::Telegram }));
    let delivery = &gateway.deliveries()[0];
    assert_eq!(delivery.endpoint, "https://api.telegram.org/bottoken123/sendMessage");
    assert_eq!(delivery.body["chat_id"], "chatID456");
    assert_eq!(delivery.body["parse_mode"], "HTML");
    assert!(delivery.body["text"].as_str().unwrap().contains("Subdomains Found: 2"));
}

#[tokio::test]
async fn discord_destination_is_used_verbatim() {
    let dir = ScratchDir::new("notify-discord");
    let gateway = RecordingGateway::accepting();
    let url = "https://discord.com/api/webhooks/1/abc";

    service(&dir, Backend::Discord, Some(url))
        .notify_with_env(&session(&dir), &gateway, |_| None)
        .await;

    let delivery = &gateway.deliveries()[0];
    assert_eq!(delivery.endpoint, url);
    assert_eq!(delivery.body["username"], "Subdomain Scanner");
}

#[tokio::test]
async fn environment_supplies_missing_destination() {
    let dir = ScratchDir::new("notify-env");
    let gateway = RecordingGateway::accepting();

    let outcome = service(&dir, Backend::Slack, None)
        .notify_with_env(&session(&dir), &gateway, |key| {
            (key == "SLACK_WEBHOOK").then(|| "https://hooks.slack.example/T/B/X".to_string())
        })
        .await;

    assert!(matches!(outcome, NotifyOutcome::Sent { backend: Backend::Slack }));
    let delivery = &gateway.deliveries()[0];
    assert_eq!(delivery.endpoint, "https://hooks.slack.example/T/B/X");
    assert_eq!(delivery.body["icon_emoji"], ":mag:");
}

#[tokio::test]
async fn explicit_destination_beats_environment() {
    let dir = ScratchDir::new("notify-precedence");
    let gateway = RecordingGateway::accepting();

    service(&dir, Backend::Discord, Some("https://explicit.example/hook"))
        .notify_with_env(&session(&dir), &gateway, |_| Some("https://env.example/hook".into()))
        .await;

    assert_eq!(gateway.deliveries()[0].endpoint, "https://explicit.example/hook");
}

#[tokio::test]
async fn no_destination_anywhere_skips_delivery() {
    let dir = ScratchDir::new("notify-none");
    let gateway = RecordingGateway::accepting();

    let outcome = service(&dir, Backend::Telegram, Some("   "))
        .notify_with_env(&session(&dir), &gateway, |_| None)
        .await;

    assert!(matches!(outcome, NotifyOutcome::NoDestination { env_key } if env_key == "TELEGRAM_WEBHOOK"));
    assert_eq!(gateway.attempts(), 0);
}

#[tokio::test]
async fn disabled_notifications_never_touch_the_gateway() {
    let dir = ScratchDir::new("notify-disabled");
    let gateway = RecordingGateway::accepting();
    let service = ScanService::new(Arc::new(ScriptedRunner::new()), config_for(&dir.path));

    let outcome = service
        .notify_with_env(&session(&dir), &gateway, |_| Some("https://env.example/hook".into()))
        .await;

    assert!(matches!(outcome, NotifyOutcome::Disabled));
    assert_eq!(gateway.attempts(), 0);
}

#[tokio::test]
async fn delivery_failure_is_reported_not_raised() {
    let dir = ScratchDir::new("notify-fail");
    let gateway = RecordingGateway::failing("HTTP 500");

    let outcome = service(&dir, Backend::Discord, Some("https://discord.example/hook"))
        .notify_with_env(&session(&dir), &gateway, |_| None)
        .await;

    assert!(matches!(outcome, NotifyOutcome::Failed(ReconError::Notification(_))));
    assert_eq!(gateway.attempts(), 1);
}

#[tokio::test]
async fn malformed_telegram_destination_fails_before_sending() {
    let dir = ScratchDir::new("notify-bad-telegram");
    let gateway = RecordingGateway::accepting();

    let outcome = service(&dir, Backend::Telegram, Some("no-separator"))
        .notify_with_env(&session(&dir), &gateway, |_| None)
        .await;

    assert!(matches!(outcome, NotifyOutcome::Failed(_)));
    assert_eq!(gateway.attempts(), 0);
}
