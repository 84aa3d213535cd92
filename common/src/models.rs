//! # Models
//!
//! * [`domain::Domain`]: a validated scan target.
//! * [`subdomain::SubdomainList`]: ordered, de-duplicated enumeration results.
//! * [`live_host::LiveHostRecord`] / [`live_host::LiveHostSet`]: probing results.
//! * [`session::SessionFiles`] / [`session::ScanSession`]: per-scan file layout and results.

pub mod domain;
pub mod live_host;
pub mod session;
pub mod subdomain;
