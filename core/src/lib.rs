//! The scan pipeline.
//!
//! * [`runner`]: process-backed [`ToolRunner`](subprobe_common::tools::ToolRunner).
//! * [`enumeration`]: subdomain collection from the enumeration tool.
//! * [`probe`]: live-host probing of a subdomain list.
//! * [`service`]: sequences the stages for one [`ScanSession`](subprobe_common::models::session::ScanSession).
//! * [`report`]: the human-readable summary file.
//! * [`notifier`]: webhook delivery of the completion message.

pub mod enumeration;
pub mod notifier;
pub mod probe;
pub mod report;
pub mod runner;
pub mod service;
pub mod stage;
