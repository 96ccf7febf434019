//! Endpoint and client configuration for the compat-data source.
//!
//! Defaults point at the MDN `browser-compat-data` repository on GitHub.
//! Environment variables can override the endpoints (useful for mirrors and
//! tests) and the client limits.

use thiserror::Error;
use url::Url;

/// Default GitHub REST API base used for directory listings.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default base for raw file content.
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Default repository owner.
pub const DEFAULT_OWNER: &str = "mdn";

/// Default repository name.
pub const DEFAULT_REPO: &str = "browser-compat-data";

/// Default branch.
pub const DEFAULT_BRANCH: &str = "main";

/// Directory holding one JSON file per WebExtension API namespace.
pub const DEFAULT_API_PATH: &str = "webextensions/api";

/// Default number of in-flight file fetches.
pub const DEFAULT_CONCURRENCY: usize = 32;

/// Default HTTP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const MIN_CONCURRENCY: usize = 1;
const MAX_CONCURRENCY: usize = 100;
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Environment variable overriding [`SourceConfig::api_base`].
pub const ENV_API_BASE: &str = "WEBEXT_COMPAT_API_BASE";
/// Environment variable overriding [`SourceConfig::raw_base`].
pub const ENV_RAW_BASE: &str = "WEBEXT_COMPAT_RAW_BASE";
/// Environment variable overriding [`SourceConfig::branch`].
pub const ENV_BRANCH: &str = "WEBEXT_COMPAT_BRANCH";
/// Environment variable overriding [`SourceConfig::concurrency`].
pub const ENV_CONCURRENCY: &str = "WEBEXT_COMPAT_CONCURRENCY";
/// Environment variable overriding [`SourceConfig::connect_timeout_secs`].
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "WEBEXT_COMPAT_CONNECT_TIMEOUT_SECS";
/// Environment variable overriding [`SourceConfig::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "WEBEXT_COMPAT_TIMEOUT_SECS";

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A base URL did not parse or is not http(s).
    #[error("invalid config value for `{field}`: {value} is not an http(s) URL")]
    InvalidUrl {
        /// Config field name.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A numeric value did not parse or is out of range.
    #[error("invalid config value for `{field}`: {value}. Expected range: {min}..={max}")]
    OutOfRange {
        /// Config field name.
        field: &'static str,
        /// Rejected value.
        value: String,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// A text value was empty.
    #[error("invalid config value for `{field}`: must not be empty")]
    Empty {
        /// Config field name.
        field: &'static str,
    },
}

/// Where compat-data comes from and how it is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// REST API base for the directory listing.
    pub api_base: String,
    /// Base for raw file content.
    pub raw_base: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch or ref to read.
    pub branch: String,
    /// Directory inside the repository.
    pub api_path: String,
    /// Maximum in-flight file fetches (1-100).
    pub concurrency: usize,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    /// Builds a config from defaults plus process environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is malformed or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from defaults plus overrides supplied by `lookup`.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an override is malformed or out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(value) = get(ENV_API_BASE) {
            config.api_base = value;
        }
        if let Some(value) = get(ENV_RAW_BASE) {
            config.raw_base = value;
        }
        if let Some(value) = get(ENV_BRANCH) {
            config.branch = value;
        }
        if let Some(value) = get(ENV_CONCURRENCY) {
            config.concurrency = parse_in_range(
                "concurrency",
                &value,
                MIN_CONCURRENCY as u64,
                MAX_CONCURRENCY as u64,
            )
            .and_then(|parsed| {
                usize::try_from(parsed).map_err(|_| out_of_range("concurrency", &value, 1, 100))
            })?;
        }
        if let Some(value) = get(ENV_CONNECT_TIMEOUT_SECS) {
            config.connect_timeout_secs =
                parse_in_range("connect_timeout_secs", &value, 1, MAX_TIMEOUT_SECS)?;
        }
        if let Some(value) = get(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_in_range("timeout_secs", &value, 1, MAX_TIMEOUT_SECS)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Returns a copy pointing both endpoints at `base` (a mirror or mock server).
    #[must_use]
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.api_base.clone_from(&base);
        self.raw_base = base;
        self
    }

    /// Returns a copy with a different fetch concurrency.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_http_url("api_base", &self.api_base)?;
        validate_http_url("raw_base", &self.raw_base)?;
        for (field, value) in [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("branch", &self.branch),
            ("api_path", &self.api_path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&self.concurrency) {
            return Err(out_of_range(
                "concurrency",
                &self.concurrency.to_string(),
                MIN_CONCURRENCY as u64,
                MAX_CONCURRENCY as u64,
            ));
        }
        for (field, value) in [
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("timeout_secs", self.timeout_secs),
        ] {
            if !(1..=MAX_TIMEOUT_SECS).contains(&value) {
                return Err(out_of_range(field, &value.to_string(), 1, MAX_TIMEOUT_SECS));
            }
        }
        Ok(())
    }

    /// URL of the directory listing, e.g.
    /// `https://api.github.com/repos/mdn/browser-compat-data/contents/webextensions/api?ref=main`.
    #[must_use]
    pub fn listing_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.api_path.trim_matches('/'),
            self.branch
        )
    }

    /// URL of one raw data file, e.g.
    /// `https://raw.githubusercontent.com/mdn/browser-compat-data/main/webextensions/api/tabs.json`.
    #[must_use]
    pub fn file_url(&self, filename: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}",
            self.raw_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            self.api_path.trim_matches('/'),
            filename
        )
    }
}

fn validate_http_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_in_range(field: &'static str, value: &str, min: u64, max: u64) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(parsed) if (min..=max).contains(&parsed) => Ok(parsed),
        _ => Err(out_of_range(field, value, min, max)),
    }
}

fn out_of_range(field: &'static str, value: &str, min: u64, max: u64) -> ConfigError {
    ConfigError::OutOfRange {
        field,
        value: value.to_string(),
        min,
        max,
    }
}
