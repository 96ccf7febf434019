//! End-to-end run: list, fetch, walk, filter, report.

use std::io::{self, Write};

use tracing::{info, instrument, warn};

use crate::report::{ChromeOnlyApi, collect_chrome_only_apis, render_report, sort_rows};
use crate::source::{CompatSource, FetchOutcome};

/// Progress is logged after every this many processed files.
pub const PROGRESS_INTERVAL: usize = 10;

/// Counts from one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data files named by the listing.
    pub listed: usize,
    /// Files fetched and parsed.
    pub fetched: usize,
    /// Files dropped because of a fetch error.
    pub failed: usize,
    /// Rows written to the report.
    pub reported: usize,
}

/// Runs the whole analysis and writes the report to `out`.
///
/// A failed listing is logged and treated as an empty one: nothing is written
/// to `out` and the run still succeeds.
///
/// # Errors
///
/// Returns an error only when writing to `out` fails.
#[instrument(skip(source, out))]
pub async fn run<W: Write + ?Sized>(source: &CompatSource, out: &mut W) -> io::Result<RunSummary> {
    info!("Fetching API file list...");
    let files = match source.list_files().await {
        Ok(files) => files,
        Err(error) => {
            warn!(error = %error, "Failed to list API files");
            Vec::new()
        }
    };

    let mut summary = RunSummary {
        listed: files.len(),
        ..RunSummary::default()
    };

    if files.is_empty() {
        info!("No API files found.");
        return Ok(summary);
    }

    info!(count = files.len(), "Found API files. Processing...");
    let outcome = source.fetch_all(&files).await;
    summary.fetched = outcome.stats.fetched();
    summary.failed = outcome.stats.failed();

    let (mut rows, _) = collect_rows(&outcome, files.len());
    sort_rows(&mut rows);
    summary.reported = rows.len();

    render_report(&rows, out)?;
    out.flush()?;

    info!(
        listed = summary.listed,
        fetched = summary.fetched,
        failed = summary.failed,
        reported = summary.reported,
        "run complete"
    );
    Ok(summary)
}

/// Counts processed files and says when a progress line is due.
#[derive(Debug, Clone, Copy, Default)]
struct Progress {
    processed: usize,
}

impl Progress {
    /// Marks one file done; returns the running count on every
    /// [`PROGRESS_INTERVAL`]th file.
    fn advance(&mut self) -> Option<usize> {
        self.processed += 1;
        (self.processed % PROGRESS_INTERVAL == 0).then_some(self.processed)
    }
}

/// Walks every fetched document and gathers the Chrome-only rows.
///
/// Files that failed to fetch count as processed with no rows, so progress
/// always reaches `total`. Returns the rows and the processed count.
fn collect_rows(outcome: &FetchOutcome, total: usize) -> (Vec<ChromeOnlyApi>, usize) {
    let mut rows = Vec::new();
    let mut progress = Progress::default();

    let failed = std::iter::repeat_n(None, outcome.stats.failed());
    for file in outcome.files.iter().map(Some).chain(failed) {
        if let Some(file) = file {
            collect_chrome_only_apis(&file.filename, &file.document, &mut rows);
        }
        if let Some(processed) = progress.advance() {
            info!("Processed {processed}/{total} files...");
        }
    }

    info!("Completed processing all {} files", progress.processed);
    (rows, progress.processed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::source::{FetchStats, FetchedFile};
    use serde_json::json;

    fn tabs_file(feature: &str) -> FetchedFile {
        FetchedFile {
            filename: "tabs.json".to_string(),
            document: json!({ "webextensions": { "api": { "tabs": {
                feature: { "__compat": { "support": { "chrome": true } } }
            } } } }),
        }
    }

    fn outcome_of(fetched: usize, failed: usize) -> FetchOutcome {
        FetchOutcome {
            files: (0..fetched).map(|i| tabs_file(&format!("f{i}"))).collect(),
            stats: FetchStats::new(fetched, failed),
        }
    }

    #[test]
    fn test_progress_ticks_every_interval() {
        let mut progress = Progress::default();
        let ticks: Vec<usize> = (0..25).filter_map(|_| progress.advance()).collect();
        assert_eq!(ticks, vec![10, 20]);
        assert_eq!(progress.processed, 25);
    }

    #[test]
    fn test_collect_rows_walks_every_file() {
        let (rows, processed) = collect_rows(&outcome_of(25, 0), 25);
        assert_eq!(rows.len(), 25);
        assert_eq!(processed, 25);
        assert_eq!(rows[0].feature_path, "tabs.f0");
    }

    #[test]
    fn test_collect_rows_counts_failed_files_as_processed() {
        let (rows, processed) = collect_rows(&outcome_of(22, 3), 25);
        assert_eq!(rows.len(), 22);
        assert_eq!(processed, 25);
    }

    #[test]
    fn test_collect_rows_empty() {
        let (rows, processed) = collect_rows(&FetchOutcome::default(), 0);
        assert!(rows.is_empty());
        assert_eq!(processed, 0);
    }
}
