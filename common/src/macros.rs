//! Logging macros with fixed targets.
//!
//! The CLI formatter picks the prefix symbol from the target, so library code
//! should prefer these over calling `tracing` directly for user facing lines.

pub const TARGET_SUCCESS: &str = "airfresh::success";
pub const TARGET_INFO: &str = "airfresh::info";
pub const TARGET_WARN: &str = "airfresh::warn";
pub const TARGET_ERROR: &str = "airfresh::error";
pub const TARGET_PRINT: &str = "airfresh::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::macros::TARGET_SUCCESS, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::macros::TARGET_INFO, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: $crate::macros::TARGET_WARN, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: $crate::macros::TARGET_ERROR, $($arg)*)
    };
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
