//! Mock compat-data repository for integration tests.
//!
//! Mounts the listing endpoint and raw file endpoints at the paths the
//! default [`SourceConfig`](webext_compat::SourceConfig) builds.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING_PATH: &str = "/repos/mdn/browser-compat-data/contents/webextensions/api";

#[must_use]
pub fn file_path(filename: &str) -> String {
    format!("/mdn/browser-compat-data/main/webextensions/api/{filename}")
}

/// Mounts a listing that names `filenames` (plus a non-JSON entry that must be ignored).
pub async fn mount_listing(server: &MockServer, filenames: &[&str]) {
    let mut items: Vec<Value> = filenames
        .iter()
        .map(|name| json!({ "name": name, "type": "file" }))
        .collect();
    items.push(json!({ "name": "README.md", "type": "file" }));

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(items)))
        .mount(server)
        .await;
}

/// Mounts a listing endpoint that answers with `status`.
pub async fn mount_listing_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mounts one raw data file.
pub async fn mount_file(server: &MockServer, filename: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(file_path(filename)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts one raw data file that answers with `status`.
pub async fn mount_file_status(server: &MockServer, filename: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(file_path(filename)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// `tabs.json`: `tabs.captureTab` is Chrome-only.
#[must_use]
pub fn tabs_document() -> Value {
    json!({
        "webextensions": {
            "api": {
                "tabs": {
                    "captureTab": {
                        "__compat": { "support": { "chrome": true, "firefox": null } }
                    }
                }
            }
        }
    })
}

/// `storage.json`: `storage.sync` is supported by both browsers.
#[must_use]
pub fn storage_document() -> Value {
    json!({
        "webextensions": {
            "api": {
                "storage": {
                    "sync": {
                        "__compat": { "support": { "chrome": "10", "firefox": "57" } }
                    }
                }
            }
        }
    })
}
