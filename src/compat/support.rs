//! Support statement classification.
//!
//! Each browser entry under `__compat.support` comes in one of several JSON
//! shapes. [`SupportStatement`] names those shapes explicitly so the
//! supported/unsupported verdict and the display string are both a single
//! `match` over the same variants.

use serde_json::Value;

/// Display text for any statement that does not count as supported.
pub const NOT_SUPPORTED: &str = "not supported";

/// Display text for a bare `true` flag.
pub const SUPPORTED: &str = "supported";

/// A single browser's support statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SupportStatement {
    /// `null` or a missing browser key.
    Absent,
    /// A bare boolean.
    Flag(bool),
    /// A free-text version token such as `"57"` or `"≤79"`.
    Text(String),
    /// A record carrying a `version_added` field.
    Versioned(VersionAdded),
    /// Several statements; supported if any element is.
    List(Vec<SupportStatement>),
    /// Any other JSON value (e.g. a bare number).
    Other(Value),
}

/// The `version_added` field of a versioned support record.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionAdded {
    /// The field is absent or `null`.
    Missing,
    /// A boolean flag.
    Flag(bool),
    /// A version token, or one of the `"false"`/`"mirrored"` sentinels.
    Text(String),
    /// Anything else, kept for display.
    Other(Value),
}

impl SupportStatement {
    /// Builds a statement from a raw JSON value.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(flag) => Self::Flag(*flag),
            Value::String(text) => Self::Text(text.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_value).collect()),
            Value::Object(map) => Self::Versioned(VersionAdded::from_field(map.get("version_added"))),
            Value::Number(_) => Self::Other(value.clone()),
        }
    }

    /// Builds a statement from an optional value, treating `None` as absent.
    #[must_use]
    pub fn from_optional(value: Option<&Value>) -> Self {
        value.map_or(Self::Absent, Self::from_value)
    }

    /// Returns whether this statement marks the feature as supported.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Absent | Self::Other(_) => false,
            Self::Flag(flag) => *flag,
            Self::Text(text) => {
                let normalized = text.trim().to_lowercase();
                !matches!(normalized.as_str(), "" | "false" | "no")
            }
            Self::Versioned(version) => version.is_supported(),
            Self::List(items) => items.iter().any(Self::is_supported),
        }
    }

    /// Returns a human-readable description of this statement.
    #[must_use]
    pub fn format_version(&self) -> String {
        match self {
            Self::Absent | Self::Flag(false) => NOT_SUPPORTED.to_string(),
            Self::Flag(true) => SUPPORTED.to_string(),
            Self::Text(text) => non_empty_or_not_supported(text),
            Self::Versioned(version) => version.format_version(),
            Self::List(items) => items
                .iter()
                .map(Self::format_version)
                .collect::<Vec<_>>()
                .join("; "),
            Self::Other(value) => value.to_string(),
        }
    }
}

impl VersionAdded {
    fn from_field(field: Option<&Value>) -> Self {
        match field {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Bool(flag)) => Self::Flag(*flag),
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(other) => Self::Other(other.clone()),
        }
    }

    /// Returns whether this `version_added` value marks the feature as supported.
    ///
    /// Text sentinels are compared after trimming but without case folding.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Missing => false,
            Self::Flag(flag) => *flag,
            Self::Text(text) => !matches!(text.trim(), "" | "false" | "mirrored"),
            Self::Other(_) => true,
        }
    }

    /// Returns a human-readable description of this `version_added` value.
    ///
    /// Sentinel tokens (`"false"`, `"mirrored"`) render as "not supported" so
    /// the display never disagrees with [`is_supported`](Self::is_supported).
    #[must_use]
    pub fn format_version(&self) -> String {
        match self {
            Self::Missing | Self::Flag(false) => NOT_SUPPORTED.to_string(),
            Self::Flag(true) => SUPPORTED.to_string(),
            Self::Text(text) if self.is_supported() => text.trim().to_string(),
            Self::Text(_) => NOT_SUPPORTED.to_string(),
            Self::Other(value) => value.to_string(),
        }
    }
}

fn non_empty_or_not_supported(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NOT_SUPPORTED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Returns whether a raw JSON support statement counts as supported.
#[must_use]
pub fn is_supported(entry: &Value) -> bool {
    SupportStatement::from_value(entry).is_supported()
}

/// Returns a human-readable description of a raw JSON support statement.
#[must_use]
pub fn format_version(entry: &Value) -> String {
    SupportStatement::from_value(entry).format_version()
}
