//! Status-line macros.
//!
//! Every user-visible line goes through `tracing`; the terminal formatter in
//! the CLI turns the level (and the [`SUCCESS_TARGET`] target) into the
//! `[+]`, `[*]`, `[!]`, `[-]` tags.

/// Events emitted on this target are rendered as successes.
pub const SUCCESS_TARGET: &str = "subprobe::success";

/// Events emitted on this target are printed verbatim, without a tag.
pub const PRINT_TARGET: &str = "subprobe::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "subprobe::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::__tracing::debug!($($arg)*)
    };
}
