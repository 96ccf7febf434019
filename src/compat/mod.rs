//! Browser-compat-data tree walking and support classification.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use webext_compat::compat::{SupportStatement, walk};
//!
//! let api = json!({
//!     "captureTab": {
//!         "__compat": { "support": { "chrome": true, "firefox": null } }
//!     }
//! });
//!
//! let entries = walk(&["tabs".to_string()], &api, "tabs.json");
//! assert_eq!(entries[0].feature_path(), "tabs.captureTab");
//!
//! let chrome = SupportStatement::from_optional(entries[0].browser("chrome"));
//! assert!(chrome.is_supported());
//! ```

mod support;
mod walker;

pub use support::{
    NOT_SUPPORTED, SUPPORTED, SupportStatement, VersionAdded, format_version, is_supported,
};
pub use walker::{COMPAT_KEY, SupportEntry, walk, walk_with};
