//! HTTP client construction for compat-data requests.
//!
//! Some restricted sandbox environments panic when reqwest queries system
//! proxy settings. The builder catches that and retries with proxies taken
//! only from the environment.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use super::SourceConfig;
use super::SourceError;
use crate::user_agent;

/// Builds the shared HTTP client from `config` timeouts.
///
/// # Errors
///
/// Returns [`SourceError::ClientBuild`] when client construction fails.
pub(crate) fn build_http_client(config: &SourceConfig) -> Result<Client, SourceError> {
    let timeouts = (config.connect_timeout_secs, config.timeout_secs);
    match try_build_client(timeouts, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            warn!("HTTP client hit system proxy panic; using env-proxy fallback builder");
            match try_build_client(timeouts, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(SourceError::client_build(
                    "HTTP client construction panicked while loading proxy settings",
                )),
                Err(BuildClientFailure::Build(error)) => {
                    Err(SourceError::client_build(error.to_string()))
                }
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(SourceError::client_build(error.to_string())),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    (connect_timeout_secs, timeout_secs): (u64, u64),
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(connect_timeout_secs, timeout_secs);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(connect_timeout_secs: u64, timeout_secs: u64) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent::default_user_agent())
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = find_first_proxy_var(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"])
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = find_first_proxy_var(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"])
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn find_first_proxy_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
