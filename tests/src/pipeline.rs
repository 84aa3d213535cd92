#![cfg(test)]
use std::fs;
use std::sync::Arc;

use subprobe_common::error::ReconError;
use subprobe_common::models::domain::Domain;
use subprobe_core::service::ScanService;
use subprobe_core::stage::{Stage, StageWarning};

use crate::support::{RecordingGateway, Script, ScratchDir, ScriptedRunner, at, config_for};

const SUBFINDER_OUTPUT: &str = "a.example.com\nb.example.com\n\na.example.com\n  c.example.com  \n";
const HTTPX_OUTPUT: &str = concat!(
    "{\"input\":\"a.example.com\",\"url\":\"https://a.example.com\",\"status_code\":200,\"title\":\"Home\",\"tech\":[\"Nginx\"]}\n",
    "{\"input\":\"b.example.com\",\"url\":\"http://b.example.com\",\"status-code\":301}\n",
    "https://c.example.com\n",
    "garbage\n",
);

fn domain() -> Domain {
    "example.com".parse().unwrap()
}

#[tokio::test]
async fn full_scan_writes_all_three_files() {
    let dir = ScratchDir::new("full");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout(SUBFINDER_OUTPUT))
            .with_tool("httpx", Script::writes(HTTPX_OUTPUT, 0)),
    );
    let service = ScanService::new(runner.clone(), config_for(&dir.path));

    let outcome = service.run_at(domain(), at(10, 30, 0)).await.unwrap();
    let session = &outcome.session;

    assert_eq!(
        dir.file_names(),
        [
            "example.com_20240309_103000_live.json",
            "example.com_20240309_103000_report.txt",
            "example.com_20240309_103000_subdomains.txt",
        ]
    );

    let list = fs::read_to_string(&session.files.subdomains).unwrap();
    assert_eq!(list, "a.example.com\nb.example.com\nc.example.com\n");

    assert_eq!(session.live_hosts.len(), 3);
    assert_eq!(session.live_hosts[1].status_code, Some(301));
    assert_eq!(session.live_hosts[2].url, "https://c.example.com");
    assert!(session.live_hosts[2].status_code.is_none());

    assert!(outcome.report_error.is_none());
    assert!(matches!(
        outcome.warnings.as_slice(),
        [(Stage::Probing, StageWarning::SkippedLines(1))]
    ));

    let report = fs::read_to_string(&session.files.report).unwrap();
    assert!(report.contains("Total Subdomains Found: 3"));
    assert!(report.contains("Total Live Hosts Found: 3"));
    assert!(report.contains("Technologies: Nginx"));

    let probe_call = &runner.calls()[1];
    assert_eq!(
        probe_call.flag_value("-l"),
        Some(session.files.subdomains.to_str().unwrap())
    );
}

#[tokio::test]
async fn subdomain_list_has_no_duplicates_and_keeps_first_seen_order() {
    let dir = ScratchDir::new("dedup");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout("z.example.com\nm.example.com\nz.example.com\nM.example.com\n"))
            .with_installed("httpx"),
    );
    let cfg = subprobe_common::config::Config {
        skip_probing: true,
        ..config_for(&dir.path)
    };

    let outcome = ScanService::new(runner, cfg).run_at(domain(), at(8, 0, 0)).await.unwrap();

    let written = fs::read_to_string(&outcome.session.files.subdomains).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines, ["z.example.com", "m.example.com", "M.example.com"]);
}

#[tokio::test]
async fn enumeration_timeout_still_reaches_the_report() {
    let dir = ScratchDir::new("enum-timeout");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::TimesOut)
            .with_installed("httpx"),
    );
    let service = ScanService::new(runner.clone(), config_for(&dir.path));

    let outcome = service.run_at(domain(), at(9, 0, 0)).await.unwrap();

    assert!(matches!(
        outcome.warnings.as_slice(),
        [(Stage::Enumeration, StageWarning::Tool(ReconError::ToolTimeout { .. }))]
    ));
    assert_eq!(runner.programs_called(), ["subfinder"]);
    assert_eq!(dir.file_names(), ["example.com_20240309_090000_report.txt"]);

    let report = fs::read_to_string(&outcome.session.files.report).unwrap();
    assert!(report.contains("Total Subdomains Found: 0"));
    assert!(report.contains("Total Live Hosts Found: 0"));
    assert!(!report.contains("LIVE HOSTS DETAILS"));
}

#[tokio::test]
async fn probing_timeout_keeps_subdomains() {
    let dir = ScratchDir::new("probe-timeout");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout(SUBFINDER_OUTPUT))
            .with_tool("httpx", Script::TimesOut),
    );

    let outcome = ScanService::new(runner, config_for(&dir.path))
        .run_at(domain(), at(9, 15, 0))
        .await
        .unwrap();

    assert_eq!(outcome.session.subdomains.len(), 3);
    assert!(outcome.session.live_hosts.is_empty());
    assert!(outcome.warnings.iter().any(|(stage, w)| {
        *stage == Stage::Probing && matches!(w, StageWarning::Tool(ReconError::ToolTimeout { .. }))
    }));
    assert!(outcome.session.files.report.exists());
}

#[tokio::test]
async fn probe_failure_salvages_written_records() {
    let dir = ScratchDir::new("probe-crash");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout("a.example.com\n"))
            .with_tool("httpx", Script::writes("https://a.example.com\n", 2)),
    );

    let outcome = ScanService::new(runner, config_for(&dir.path))
        .run_at(domain(), at(9, 30, 0))
        .await
        .unwrap();

    assert_eq!(outcome.session.live_hosts.len(), 1);
    assert!(outcome.warnings.iter().any(|(_, w)| {
        matches!(w, StageWarning::Tool(ReconError::ToolFailure { code: Some(2), .. }))
    }));
}

#[tokio::test]
async fn exit_code_one_from_prober_means_no_results() {
    let dir = ScratchDir::new("probe-none");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout("a.example.com\n"))
            .with_tool("httpx", Script::writes("", 1)),
    );

    let outcome = ScanService::new(runner, config_for(&dir.path))
        .run_at(domain(), at(9, 45, 0))
        .await
        .unwrap();

    assert!(outcome.session.live_hosts.is_empty());
    assert!(outcome.warnings.iter().all(|(_, w)| !matches!(w, StageWarning::Tool(_))));
}

#[tokio::test]
async fn no_subdomains_skips_probing() {
    let dir = ScratchDir::new("empty");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout("\n\n"))
            .with_installed("httpx"),
    );

    let outcome = ScanService::new(runner.clone(), config_for(&dir.path))
        .run_at(domain(), at(11, 0, 0))
        .await
        .unwrap();

    assert_eq!(runner.programs_called(), ["subfinder"]);
    assert!(matches!(
        outcome.warnings.as_slice(),
        [(Stage::Enumeration, StageWarning::NoResults)]
    ));
    assert!(outcome.session.files.report.exists());
}

#[tokio::test]
async fn missing_tool_aborts_before_any_stage() {
    let dir = ScratchDir::new("missing");
    let runner = Arc::new(ScriptedRunner::new().with_tool("subfinder", Script::stdout("a.example.com\n")));

    let err = ScanService::new(runner.clone(), config_for(&dir.path))
        .run_at(domain(), at(12, 0, 0))
        .await
        .unwrap_err();

    assert!(matches!(&err, ReconError::ToolMissing { tool } if tool == "httpx"));
    assert!(err.is_fatal());
    assert!(runner.calls().is_empty());
    assert!(!dir.path.exists());
}

#[tokio::test]
async fn skipped_stage_does_not_need_its_tool() {
    let dir = ScratchDir::new("skip-probe");
    let runner = Arc::new(ScriptedRunner::new().with_tool("subfinder", Script::stdout("a.example.com\n")));
    let cfg = subprobe_common::config::Config {
        skip_probing: true,
        ..config_for(&dir.path)
    };

    let outcome = ScanService::new(runner, cfg).run_at(domain(), at(12, 5, 0)).await.unwrap();

    assert_eq!(outcome.session.subdomains.len(), 1);
    assert!(!outcome.session.files.live_hosts.exists());
}

#[tokio::test]
async fn consecutive_scans_do_not_overwrite_each_other() {
    let dir = ScratchDir::new("unique");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout("a.example.com\n"))
            .with_installed("httpx"),
    );
    let cfg = subprobe_common::config::Config {
        skip_probing: true,
        ..config_for(&dir.path)
    };
    let service = ScanService::new(runner, cfg);

    service.run_at(domain(), at(13, 0, 0)).await.unwrap();
    service.run_at(domain(), at(13, 0, 1)).await.unwrap();

    assert_eq!(dir.file_names().len(), 4);
}

#[tokio::test]
async fn unwritable_report_is_not_fatal() {
    let dir = ScratchDir::new("report-fail");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout("a.example.com\n"))
            .with_installed("httpx"),
    );
    let cfg = subprobe_common::config::Config {
        skip_probing: true,
        ..config_for(&dir.path)
    };
    let started = at(14, 0, 0);

    // A directory squatting on the report path makes the write fail.
    fs::create_dir_all(dir.join("example.com_20240309_140000_report.txt")).unwrap();

    let outcome = ScanService::new(runner, cfg).run_at(domain(), started).await.unwrap();

    assert!(matches!(outcome.report_error, Some(ReconError::ReportWrite { .. })));
    assert_eq!(outcome.session.subdomains.len(), 1);
}

#[tokio::test]
async fn notification_uses_session_counts() {
    let dir = ScratchDir::new("notify-counts");
    let runner = Arc::new(
        ScriptedRunner::new()
            .with_tool("subfinder", Script::stdout(SUBFINDER_OUTPUT))
            .with_tool("httpx", Script::writes(HTTPX_OUTPUT, 0)),
    );
    let cfg = subprobe_common::config::Config {
        notify: Some(subprobe_common::config::NotifySettings {
            backend: subprobe_common::notify::Backend::Discord,
            destination: Some("https://discord.example/hook".into()),
        }),
        ..config_for(&dir.path)
    };
    let service = ScanService::new(runner, cfg);
    let gateway = RecordingGateway::accepting();

    let outcome = service.run_at(domain(), at(15, 0, 0)).await.unwrap();
    service.notify_with_env(&outcome.session, &gateway, |_| None).await;

    let deliveries = gateway.deliveries();
    assert_eq!(deliveries.len(), 1);
    let content = deliveries[0].body["content"].as_str().unwrap();
    assert!(content.contains("example.com"));
    assert!(content.contains("Subdomains Found: 3"));
    assert!(content.contains("Live Hosts: 3"));
}
