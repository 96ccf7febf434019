//! Directory listing and concurrent file fetching.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::error::SourceError;
use super::http::build_http_client;
use super::SourceConfig;

/// Extension of the data files kept from the directory listing.
const DATA_FILE_EXTENSION: &str = ".json";

/// One entry of a repository contents listing.
///
/// Anything that is not a record (a bare string, a number) lands in `Other`
/// so a single odd entry never fails the whole listing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingEntry {
    Record {
        #[serde(default)]
        name: Option<Value>,
    },
    Other(IgnoredAny),
}

impl ListingEntry {
    /// Returns the entry's name when it is a string ending in `.json`.
    fn into_data_file_name(self) -> Option<String> {
        match self {
            Self::Record {
                name: Some(Value::String(name)),
            } if name.ends_with(DATA_FILE_EXTENSION) => Some(name),
            _ => None,
        }
    }
}

/// A successfully fetched data file.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedFile {
    /// File name as it appeared in the listing.
    pub filename: String,
    /// Parsed JSON body.
    pub document: Value,
}

/// Counts from a [`CompatSource::fetch_all`] batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    fetched: usize,
    failed: usize,
}

impl FetchStats {
    /// Creates batch counts.
    #[must_use]
    pub fn new(fetched: usize, failed: usize) -> Self {
        Self { fetched, failed }
    }

    /// Returns the number of files fetched and parsed.
    #[must_use]
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Returns the number of files dropped because of an error.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Returns the number of files attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.fetched + self.failed
    }
}

/// Result of a fetch batch: every file that arrived, in listing order.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Files that were fetched and parsed.
    pub files: Vec<FetchedFile>,
    /// Batch counts.
    pub stats: FetchStats,
}

/// Remote compat-data repository.
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use webext_compat::source::{CompatSource, SourceConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = CompatSource::new(SourceConfig::default())?;
/// let files = source.list_files().await?;
/// let outcome = source.fetch_all(&files).await;
/// println!("fetched {} of {}", outcome.stats.fetched(), files.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CompatSource {
    client: Client,
    config: Arc<SourceConfig>,
}

impl CompatSource {
    /// Creates a source with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] for an invalid config and
    /// [`SourceError::ClientBuild`] when the HTTP client cannot be built.
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        config.validate()?;
        let client = build_http_client(&config)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a source around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, config: SourceConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Returns the source configuration.
    #[must_use]
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Lists the data files available in the configured directory.
    ///
    /// Only string names ending in `.json` are returned, in listing order.
    /// Entries without such a name are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on network failure, a non-2xx status, or a
    /// body that is not a JSON array of records.
    #[instrument(skip(self))]
    pub async fn list_files(&self) -> Result<Vec<String>, SourceError> {
        let url = self.config.listing_url();
        debug!(url = %url, "requesting directory listing");

        let entries: Vec<ListingEntry> = self.get_json(&url).await?;

        let files: Vec<String> = entries
            .into_iter()
            .filter_map(ListingEntry::into_data_file_name)
            .collect();

        debug!(count = files.len(), "directory listing parsed");
        Ok(files)
    }

    /// Fetches and parses one data file.
    ///
    /// The body is parsed as JSON whatever its declared content type.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on network failure, a non-2xx status, or a
    /// malformed body.
    #[instrument(skip(self), fields(file = %filename))]
    pub async fn fetch_file(&self, filename: &str) -> Result<Value, SourceError> {
        let url = self.config.file_url(filename);
        self.get_json(&url).await
    }

    /// Fetches every file concurrently and waits for the whole batch.
    ///
    /// Each file runs in its own task; at most `config.concurrency` requests
    /// are in flight. A failed file is logged and left out of the outcome; it
    /// never aborts the batch.
    #[instrument(skip(self, filenames), fields(count = filenames.len()))]
    pub async fn fetch_all(&self, filenames: &[String]) -> FetchOutcome {
        info!(
            count = filenames.len(),
            concurrency = self.config.concurrency,
            "Fetching files concurrently..."
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut handles = Vec::with_capacity(filenames.len());

        for filename in filenames {
            let source = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let filename = filename.clone();

            handles.push(tokio::spawn(async move {
                // Permit is dropped when this block exits (RAII)
                let _permit = semaphore.acquire_owned().await.ok();
                let result = source.fetch_file(&filename).await;
                (filename, result)
            }));
        }

        let mut outcome = FetchOutcome::default();
        for handle in handles {
            match handle.await {
                Ok((filename, Ok(document))) => {
                    outcome.stats.fetched += 1;
                    outcome.files.push(FetchedFile { filename, document });
                }
                Ok((filename, Err(error))) => {
                    warn!(file = %filename, error = %error, "Error fetching file");
                    outcome.stats.failed += 1;
                }
                Err(error) => {
                    warn!(error = %error, "fetch task panicked");
                    outcome.stats.failed += 1;
                }
            }
        }

        debug!(
            fetched = outcome.stats.fetched(),
            failed = outcome.stats.failed(),
            "fetch batch complete"
        );
        outcome
    }

    /// GETs `url` and parses the body as JSON, ignoring the declared content type.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "non-success status");
            return Err(SourceError::http_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::body(url, e))?;
        serde_json::from_slice(&body).map_err(|e| SourceError::json(url, e))
    }
}
