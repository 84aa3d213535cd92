//! Shared building blocks for `subprobe`.
//!
//! Everything the scan pipeline passes between stages lives here: the models
//! written to and read back from the output directory, the error taxonomy,
//! the configuration threaded through every call, and the traits that the
//! `core` crate implements for external tools and notification delivery.

pub mod config;
pub mod error;
pub mod log;
pub mod models;
pub mod notify;
pub mod tools;

#[doc(hidden)]
pub use tracing as __tracing;
