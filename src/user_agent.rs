//! User-Agent string for compat-data requests.
//!
//! GitHub's REST API rejects requests without a User-Agent, so every request
//! identifies the tool (good citizenship; RFC 9308).

/// Default User-Agent for listing and file requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("webext-compat/{version} (compat-report-tool)")
}
