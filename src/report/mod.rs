//! Chrome-only API detection and the text report.
//!
//! A feature is reported when its `chrome` statement counts as supported and
//! its `firefox` statement does not.

use std::io::{self, Write};

use serde_json::Value;

use crate::compat::{SupportEntry, SupportStatement, walk_with};

/// Browser whose support makes a feature a candidate.
pub const PRIMARY_BROWSER: &str = "chrome";

/// Browser whose missing support makes a candidate a finding.
pub const COMPARISON_BROWSER: &str = "firefox";

/// Width of the `=` banner around the report title.
const BANNER_WIDTH: usize = 80;

const REPORT_TITLE: &str = "WebExtension APIs supported in Chrome but not Firefox:";
const NONE_FOUND: &str = "No APIs found that are supported in Chrome but not in Firefox.";

/// One reported feature.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromeOnlyApi {
    /// Dotted path such as `tabs.captureTab`.
    pub feature_path: String,
    /// Data file the feature was found in.
    pub source_file: String,
    /// Chrome support statement.
    pub chrome: SupportStatement,
    /// Firefox support statement.
    pub firefox: SupportStatement,
}

impl ChromeOnlyApi {
    /// Builds a row from a support entry when Chrome supports the feature and
    /// Firefox does not.
    #[must_use]
    pub fn from_entry(entry: &SupportEntry) -> Option<Self> {
        let chrome = SupportStatement::from_optional(entry.browser(PRIMARY_BROWSER));
        let firefox = SupportStatement::from_optional(entry.browser(COMPARISON_BROWSER));

        (chrome.is_supported() && !firefox.is_supported()).then(|| Self {
            feature_path: entry.feature_path(),
            source_file: entry.source.clone(),
            chrome,
            firefox,
        })
    }
}

/// Appends every Chrome-only feature in `document` to `rows`.
///
/// Features live under `webextensions.api.<name>`; documents without that
/// structure, and API entries that are not objects, contribute nothing.
pub fn collect_chrome_only_apis(filename: &str, document: &Value, rows: &mut Vec<ChromeOnlyApi>) {
    let Some(api_section) = document
        .get("webextensions")
        .and_then(|v| v.get("api"))
        .and_then(Value::as_object)
    else {
        return;
    };

    for (api_name, api_data) in api_section {
        if !api_data.is_object() {
            continue;
        }

        walk_with(
            std::slice::from_ref(api_name),
            api_data,
            filename,
            &mut |entry: SupportEntry| {
                if let Some(row) = ChromeOnlyApi::from_entry(&entry) {
                    rows.push(row);
                }
            },
        );
    }
}

/// Sorts rows by feature path, ignoring case.
pub fn sort_rows(rows: &mut [ChromeOnlyApi]) {
    rows.sort_by_cached_key(|row| row.feature_path.to_lowercase());
}

/// Writes the report for already-sorted `rows`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_report<W: Write + ?Sized>(rows: &[ChromeOnlyApi], out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    if rows.is_empty() {
        writeln!(out, "{NONE_FOUND}")?;
        return Ok(());
    }

    let banner = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{banner}")?;
    writeln!(out, "{REPORT_TITLE}")?;
    writeln!(out, "{banner}")?;
    writeln!(out)?;

    for row in rows {
        writeln!(out, "- {}", row.feature_path)?;
        writeln!(out, "    Source: {}", row.source_file)?;
        writeln!(out, "    Chrome: {}", row.chrome.format_version())?;
        writeln!(out, "    Firefox: {}", row.firefox.format_version())?;
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Total: {} Chrome-only APIs found", rows.len())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(rows: &[ChromeOnlyApi]) -> String {
        let mut out = Vec::new();
        render_report(rows, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn row(path: &str) -> ChromeOnlyApi {
        ChromeOnlyApi {
            feature_path: path.to_string(),
            source_file: "tabs.json".to_string(),
            chrome: SupportStatement::Flag(true),
            firefox: SupportStatement::Absent,
        }
    }

    #[test]
    fn test_collect_keeps_only_chrome_only_features() {
        let document = json!({
            "webextensions": {
                "api": {
                    "tabs": {
                        "captureTab": {
                            "__compat": { "support": { "chrome": true, "firefox": null } }
                        },
                        "query": {
                            "__compat": { "support": { "chrome": "10", "firefox": "57" } }
                        },
                        "discard": {
                            "__compat": { "support": { "chrome": false, "firefox": "58" } }
                        }
                    }
                }
            }
        });

        let mut rows = Vec::new();
        collect_chrome_only_apis("tabs.json", &document, &mut rows);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].feature_path, "tabs.captureTab");
        assert_eq!(rows[0].source_file, "tabs.json");
        assert_eq!(rows[0].chrome, SupportStatement::Flag(true));
        assert_eq!(rows[0].firefox, SupportStatement::Absent);
    }

    #[test]
    fn test_collect_missing_firefox_key_counts_as_unsupported() {
        let document = json!({
            "webextensions": { "api": { "offscreen": {
                "__compat": { "support": { "chrome": { "version_added": "109" } } }
            } } }
        });

        let mut rows = Vec::new();
        collect_chrome_only_apis("offscreen.json", &document, &mut rows);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].feature_path, "offscreen");
    }

    #[test]
    fn test_collect_mirrored_firefox_counts_as_unsupported() {
        let document = json!({
            "webextensions": { "api": { "sidePanel": {
                "__compat": { "support": {
                    "chrome": { "version_added": "114" },
                    "firefox": { "version_added": "mirrored" }
                } }
            } } }
        });

        let mut rows = Vec::new();
        collect_chrome_only_apis("sidePanel.json", &document, &mut rows);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].firefox.format_version(), "not supported");
    }

    #[test]
    fn test_collect_skips_malformed_documents() {
        let mut rows = Vec::new();
        for document in [
            json!({}),
            json!({ "webextensions": {} }),
            json!({ "webextensions": { "api": [] } }),
            json!({ "webextensions": { "api": { "tabs": "not an object" } } }),
            json!([1, 2]),
        ] {
            collect_chrome_only_apis("bad.json", &document, &mut rows);
        }
        assert!(rows.is_empty());
    }

    #[test]
    fn test_sort_rows_is_case_insensitive() {
        let mut rows = vec![row("tabs.query"), row("Alarms.create"), row("action.openPopup")];
        sort_rows(&mut rows);
        let paths: Vec<&str> = rows.iter().map(|r| r.feature_path.as_str()).collect();
        assert_eq!(paths, vec!["action.openPopup", "Alarms.create", "tabs.query"]);
    }

    #[test]
    fn test_render_report_with_rows() {
        let rows = vec![ChromeOnlyApi {
            feature_path: "tabs.captureTab".to_string(),
            source_file: "tabs.json".to_string(),
            chrome: SupportStatement::from_value(&json!([{ "version_added": "59" }, true])),
            firefox: SupportStatement::Absent,
        }];

        let banner = "=".repeat(80);
        let expected = format!(
            "\n{banner}\nWebExtension APIs supported in Chrome but not Firefox:\n{banner}\n\n\
             - tabs.captureTab\n    Source: tabs.json\n    Chrome: 59; supported\n    Firefox: not supported\n\n\
             \nTotal: 1 Chrome-only APIs found\n"
        );
        assert_eq!(render(&rows), expected);
    }

    #[test]
    fn test_render_report_without_rows() {
        assert_eq!(
            render(&[]),
            "\nNo APIs found that are supported in Chrome but not in Firefox.\n"
        );
    }
}
