//! WebExtension compatibility report library.
//!
//! Fetches the WebExtension section of MDN's `browser-compat-data` and
//! reports every API feature that Chrome supports but Firefox does not.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`compat`] - Support statement classification and compat-tree walking
//! - [`source`] - Directory listing and concurrent file fetching
//! - [`report`] - Chrome-only filtering, sorting and text output
//! - [`pipeline`] - The end-to-end run tying the above together

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod compat;
pub mod pipeline;
pub mod report;
pub mod source;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use compat::{SupportEntry, SupportStatement, VersionAdded, format_version, is_supported, walk};
pub use pipeline::{RunSummary, run};
pub use report::{ChromeOnlyApi, collect_chrome_only_apis, render_report, sort_rows};
pub use source::{CompatSource, ConfigError, FetchOutcome, FetchStats, SourceConfig, SourceError};
