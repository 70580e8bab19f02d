//! Batch driver.
//!
//! One run walks every active tracked item: resolve adapter, extract,
//! append to history; then aggregates each distinct ISBN and hands the
//! grouped rows to the notifier. A failure in one item never aborts the
//! rest; failures are collected and surfaced in the run summary.

use std::collections::HashSet;
use std::fmt;

use reqwest::blocking::Client;
use rusqlite::Connection;

use crate::database;
use crate::error::{Result, WatchError};
use crate::models::{PriceRecord, TrackedItem};
use crate::notify::Notifier;
use crate::report;
use crate::stores::Bookstore;

/// A single item or ISBN that failed during a run.
#[derive(Debug)]
pub enum RunFailure {
    /// Extraction or persistence failed for one tracked listing
    Item {
        isbn: u64,
        bookstore: String,
        url: String,
        error: WatchError,
    },
    /// Aggregation failed for one ISBN
    Aggregation { isbn: u64, error: WatchError },
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunFailure::Item {
                isbn,
                bookstore,
                url,
                error,
            } => write!(f, "ISBN {} at {} ({}): {}", isbn, bookstore, url, error),
            RunFailure::Aggregation { isbn, error } => {
                write!(f, "ISBN {} aggregation: {}", isbn, error)
            }
        }
    }
}

/// Outcome of one batch run: what was captured, what failed and how many
/// report rows went out.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// (isbn, bookstore) pairs captured successfully
    pub succeeded: Vec<(u64, String)>,
    pub failures: Vec<RunFailure>,
    pub rows_reported: usize,
}

impl RunSummary {
    pub fn log_outcome(&self) {
        log::info!(
            "Run finished: {} captured, {} failed, {} rows reported",
            self.succeeded.len(),
            self.failures.len(),
            self.rows_reported
        );
        for failure in &self.failures {
            log::warn!("  failed: {}", failure);
        }
    }
}

/// Runs one full batch over every active tracked item.
pub fn run(conn: &Connection, client: &Client, notifier: &dyn Notifier) -> Result<RunSummary> {
    let tracked = report::dedup_tracked(database::scan_tracked_active(conn)?);
    log::info!("Starting batch over {} tracked items", tracked.len());

    let mut summary = RunSummary::default();

    for item in &tracked {
        match capture_item(conn, client, item) {
            Ok(record) => {
                log::info!(
                    "Captured ISBN {} at {}: {}{}",
                    record.isbn,
                    record.bookstore,
                    record.promo_price,
                    record.currency
                );
                summary.succeeded.push((item.isbn, item.bookstore.clone()));
            }
            Err(error) => {
                log::warn!("Skipping {} ({}): {}", item.url, item.bookstore, error);
                summary.failures.push(RunFailure::Item {
                    isbn: item.isbn,
                    bookstore: item.bookstore.clone(),
                    url: item.url.clone(),
                    error,
                });
            }
        }
    }

    let rows = aggregate_all(conn, &tracked, &mut summary);
    summary.rows_reported = rows.len();

    let groups = report::chunk_rows(rows);
    if !groups.is_empty() {
        notifier.notify(&groups)?;
    }

    summary.log_outcome();
    Ok(summary)
}

/// Resolve the adapter for one item, extract a record and append it to
/// the history.
fn capture_item(conn: &Connection, client: &Client, item: &TrackedItem) -> Result<PriceRecord> {
    let store = Bookstore::from_url(&item.url)?;
    let record = store.extract(client, &item.url)?;
    database::append_record(conn, &record)?;
    Ok(record)
}

/// Aggregate every distinct ISBN among the tracked items, in first-seen
/// order. Per-ISBN failures land in the summary and do not stop the rest.
fn aggregate_all(
    conn: &Connection,
    tracked: &[TrackedItem],
    summary: &mut RunSummary,
) -> Vec<crate::models::ReportRow> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();

    for item in tracked {
        if !seen.insert(item.isbn) {
            continue;
        }
        let result = database::history_for_isbn(conn, item.isbn).and_then(|history| {
            let active = database::active_store_count(conn, item.isbn)?;
            report::aggregate(item.isbn, &history, active)
        });
        match result {
            Ok(row) => rows.push(row),
            Err(error) => {
                log::warn!("Aggregation failed for ISBN {}: {}", item.isbn, error);
                summary.failures.push(RunFailure::Aggregation {
                    isbn: item.isbn,
                    error,
                });
            }
        }
    }

    rows
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
