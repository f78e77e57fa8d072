//! # airfresh-common
//!
//! Types shared by every crate of the workspace:
//!
//! * **[`config`]**: the YAML platform configuration and its validation.
//! * **[`token`]**: the 16 byte miIO device token.
//! * **[`device`]**: status model of the Air Fresh A1 (`dmaker.airfresh.a1`).
//! * **[`error`]**: typed errors for tokens and configuration.
//! * **[`utils`]**: small helpers (slugs for entity ids).
//!
//! Logging goes through the macros in [`macros`] so the CLI formatter can style them.

#[doc(hidden)]
pub use tracing;

pub mod macros;

pub mod config;
pub mod device;
pub mod error;
pub mod token;
pub mod utils;
