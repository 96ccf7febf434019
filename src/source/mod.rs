//! Remote compat-data access: directory listing and per-file fetching.
//!
//! # Features
//!
//! - Listing of `.json` data files through the repository contents API
//! - Concurrent raw-file fetches bounded by a semaphore
//! - Per-file failure isolation (a failed file is logged and dropped)
//! - Bodies parsed as JSON regardless of the declared content type

mod client;
mod config;
mod error;
mod http;

pub use client::{CompatSource, FetchOutcome, FetchStats, FetchedFile};
pub use config::{
    ConfigError, DEFAULT_API_BASE, DEFAULT_API_PATH, DEFAULT_BRANCH, DEFAULT_CONCURRENCY,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_OWNER, DEFAULT_RAW_BASE, DEFAULT_REPO,
    DEFAULT_TIMEOUT_SECS, ENV_API_BASE, ENV_BRANCH, ENV_CONCURRENCY, ENV_CONNECT_TIMEOUT_SECS,
    ENV_RAW_BASE, ENV_TIMEOUT_SECS, SourceConfig,
};
pub use error::SourceError;
