//! Depth-first walk over a compat-data tree.
//!
//! Every node may carry a reserved `__compat` entry whose `support` map lists
//! per-browser support statements. The walker reports each such map together
//! with the dotted path of keys leading to it.

use serde_json::{Map, Value};

/// Key of the reserved compat entry on each node.
pub const COMPAT_KEY: &str = "__compat";

/// Prefix marking internal keys that are never descended into.
const RESERVED_PREFIX: &str = "__";

/// A support map located in a compat-data document.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportEntry {
    /// Keys from the API root down to the node holding the support map.
    pub path: Vec<String>,
    /// File the document was loaded from.
    pub source: String,
    /// Browser identifier to support statement.
    pub support: Map<String, Value>,
}

impl SupportEntry {
    /// Returns the dot-joined feature path, e.g. `tabs.captureTab`.
    #[must_use]
    pub fn feature_path(&self) -> String {
        self.path.join(".")
    }

    /// Returns the raw statement for `browser`, if the support map has one.
    #[must_use]
    pub fn browser(&self, browser: &str) -> Option<&Value> {
        self.support.get(browser)
    }
}

/// Collects every support map under `node`, in document order.
///
/// `path` is the path of `node` itself; for an API root it is usually the API
/// name (`["tabs"]`).
#[must_use]
pub fn walk(path: &[String], node: &Value, source: &str) -> Vec<SupportEntry> {
    let mut entries = Vec::new();
    walk_with(path, node, source, &mut |entry| entries.push(entry));
    entries
}

/// Calls `visit` for every support map under `node`, in document order.
pub fn walk_with<F>(path: &[String], node: &Value, source: &str, visit: &mut F)
where
    F: FnMut(SupportEntry),
{
    let mut current = path.to_vec();
    visit_node(&mut current, node, source, visit);
}

fn visit_node<F>(path: &mut Vec<String>, node: &Value, source: &str, visit: &mut F)
where
    F: FnMut(SupportEntry),
{
    let Value::Object(map) = node else {
        return;
    };

    if let Some(support) = map
        .get(COMPAT_KEY)
        .and_then(|compat| compat.get("support"))
        .and_then(Value::as_object)
    {
        visit(SupportEntry {
            path: path.clone(),
            source: source.to_string(),
            support: support.clone(),
        });
    }

    for (key, child) in map {
        if key.starts_with(RESERVED_PREFIX) {
            continue;
        }

        match child {
            Value::Object(_) => {
                path.push(key.clone());
                visit_node(path, child, source, visit);
                path.pop();
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if item.is_object() {
                        path.push(format!("{key}[{index}]"));
                        visit_node(path, item, source, visit);
                        path.pop();
                    }
                }
            }
            _ => {}
        }
    }
}
