//! # Scan Service
//!
//! Sequences one scan:
//! 1. **Pre-flight**: every tool a non-skipped stage needs must resolve in `PATH`.
//! 2. **Enumeration**: run the collector, or resume from the newest earlier list.
//! 3. **Probing**: probe the resolved list, unless skipped or empty.
//! 4. **Report**: write the summary file; failure here is logged, not fatal.
//!
//! Notification is a separate, optional step on the finished session.

use std::fs;
use std::sync::Arc;

use chrono::{DateTime, Local};

use subprobe_common::config::{Config, ToolSettings};
use subprobe_common::error::ReconError;
use subprobe_common::models::domain::Domain;
use subprobe_common::models::session::{ScanSession, latest_subdomain_file};
use subprobe_common::models::subdomain::SubdomainList;
use subprobe_common::notify::{
    Backend, Destination, NotificationGateway, NotificationPayload, resolve_destination,
};
use subprobe_common::tools::ToolRunner;
use subprobe_common::{error, info, success, warn};

use crate::enumeration::SubdomainCollector;
use crate::probe::LiveHostProbe;
use crate::report::ReportBuilder;
use crate::stage::{Stage, StageEvent, StageWarning};

pub type ProgressCallback = Box<dyn Fn(StageEvent) + Send + Sync>;

#[derive(Debug)]
pub struct ScanOutcome {
    pub session: ScanSession,
    /// Stage-local problems, in the order they happened.
    pub warnings: Vec<(Stage, StageWarning)>,
    pub report_error: Option<ReconError>,
}

#[derive(Debug)]
pub enum NotifyOutcome {
    Disabled,
    NoDestination { env_key: String },
    Sent { backend: Backend },
    Failed(ReconError),
}

pub struct ScanService {
    runner: Arc<dyn ToolRunner>,
    config: Config,
    on_progress: Option<ProgressCallback>,
}

impl ScanService {
    pub fn new(runner: Arc<dyn ToolRunner>, config: Config) -> Self {
        Self {
            runner,
            config,
            on_progress: None,
        }
    }

    /// Called when a stage starts and when it finishes.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Fails with [`ReconError::ToolMissing`] for the first required tool
    /// that does not resolve.
    pub fn preflight(&self) -> Result<(), ReconError> {
        let required: [Option<&ToolSettings>; 2] = [
            (!self.config.skip_enumeration).then_some(&self.config.enumeration),
            (!self.config.skip_probing).then_some(&self.config.probing),
        ];

        for settings in required.into_iter().flatten() {
            if !self.runner.is_available(&settings.program) {
                return Err(ReconError::ToolMissing {
                    tool: settings.program.clone(),
                });
            }
        }
        Ok(())
    }

    pub async fn run(&self, domain: Domain) -> Result<ScanOutcome, ReconError> {
        self.run_at(domain, Local::now()).await
    }

    /// Runs a scan whose file names are derived from `started_at`.
    ///
    /// # Errors
    /// Only the fatal ones: a missing tool, a skipped enumeration with nothing
    /// to resume from, or an output directory / subdomain list that cannot be
    /// created or read.
    pub async fn run_at(
        &self,
        domain: Domain,
        started_at: DateTime<Local>,
    ) -> Result<ScanOutcome, ReconError> {
        self.preflight()?;

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir)
            .map_err(|e| ReconError::io(format!("creating {}", output_dir.display()), e))?;

        let mut session = ScanSession::new(domain, output_dir, started_at);
        let mut warnings: Vec<(Stage, StageWarning)> = Vec::new();

        if self.config.skip_enumeration {
            self.resume(&mut session)?;
        } else {
            self.progress(StageEvent::Started(Stage::Enumeration));
            let stage = SubdomainCollector::new(self.runner.as_ref(), &self.config.enumeration)
                .collect(&session.domain, &session.files.subdomains)
                .await;
            self.progress(StageEvent::Finished(Stage::Enumeration));

            let stage = stage?;
            if stage.data.is_empty() {
                warn!("No subdomains found. Continuing anyway...");
            }
            session.subdomains = stage.data;
            warnings.extend(stage.warnings.into_iter().map(|w| (Stage::Enumeration, w)));
        }

        if self.config.skip_probing {
            info!("Skipping {} step", self.config.probing.program);
        } else if session.subdomains.is_empty() {
            warn!("No subdomains to probe with {}", self.config.probing.program);
        } else {
            self.progress(StageEvent::Started(Stage::Probing));
            let stage = LiveHostProbe::new(self.runner.as_ref(), &self.config.probing)
                .probe(&session.subdomain_source, &session.files.live_hosts)
                .await;
            self.progress(StageEvent::Finished(Stage::Probing));

            let stage = stage?;
            session.live_hosts = stage.data;
            warnings.extend(stage.warnings.into_iter().map(|w| (Stage::Probing, w)));
        }

        let report_error: Option<ReconError> = match ReportBuilder::write(&session) {
            Ok(()) => {
                success!("Report saved to: {}", session.files.report.display());
                None
            }
            Err(e) => {
                error!("Error generating report: {e}");
                Some(e)
            }
        };

        Ok(ScanOutcome {
            session,
            warnings,
            report_error,
        })
    }

    /// Points the session at the newest earlier subdomain list for its domain.
    fn resume(&self, session: &mut ScanSession) -> Result<(), ReconError> {
        info!("Skipping {} step", self.config.enumeration.program);

        let source = latest_subdomain_file(&self.config.output_dir, &session.domain)?.ok_or_else(
            || ReconError::ResumptionMissing {
                domain: session.domain.to_string(),
                dir: self.config.output_dir.clone(),
            },
        )?;

        info!("Using existing subdomains file: {}", source.display());
        session.subdomains = SubdomainList::load(&source)?;
        session.subdomain_source = source;
        Ok(())
    }

    /// Sends the completion message, resolving the destination from the
    /// process environment when none was configured.
    pub async fn notify(
        &self,
        session: &ScanSession,
        gateway: &dyn NotificationGateway,
    ) -> NotifyOutcome {
        self.notify_with_env(session, gateway, |key| std::env::var(key).ok())
            .await
    }

    /// Like [`ScanService::notify`] with an explicit environment lookup.
    ///
    /// Never fails: every problem is logged and reported in the outcome.
    pub async fn notify_with_env<F>(
        &self,
        session: &ScanSession,
        gateway: &dyn NotificationGateway,
        lookup: F,
    ) -> NotifyOutcome
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(settings) = &self.config.notify else {
            return NotifyOutcome::Disabled;
        };
        let backend: Backend = settings.backend;

        let Some(destination) = resolve_destination(backend, settings.destination.as_deref(), lookup)
        else {
            let env_key: String = backend.env_key();
            info!("No webhook available for {backend}, skipping notification");
            info!("Either pass --webhook or set {env_key} in the environment");
            return NotifyOutcome::NoDestination { env_key };
        };

        match &destination {
            Destination::Explicit(_) => info!("Sending notification via {backend}..."),
            Destination::Environment { key, .. } => {
                info!("Sending notification via {backend} (from {key})...")
            }
        }

        let payload = NotificationPayload {
            domain: session.domain.to_string(),
            subdomain_count: session.subdomains.len(),
            live_host_count: session.live_hosts.len(),
            generated_at: Local::now(),
        };

        let result = match backend.delivery(destination.value(), &payload) {
            Ok(delivery) => gateway.deliver(&delivery).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                success!("Notification sent successfully");
                NotifyOutcome::Sent { backend }
            }
            Err(e) => {
                warn!("{e}");
                NotifyOutcome::Failed(e)
            }
        }
    }

    fn progress(&self, event: StageEvent) {
        if let Some(callback) = &self.on_progress {
            callback(event);
        }
    }
}
