//! Cross-store aggregation engine.
//!
//! Consumes the full price-history time series for a book and derives the
//! current best offer, the historical extremes and the remaining peer
//! offers. Grouping and comparison are always by ISBN; the same title in
//! many stores converges to one report row.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::HashSet;

use crate::error::{Result, WatchError};
use crate::models::{Offer, PriceExtreme, PriceRecord, ReportRow, TrackedItem};

/// Report rows are handed to the notifier in fixed groups of this size.
pub const REPORT_GROUP_SIZE: usize = 3;

/// Drops tracked rows that repeat an already-seen (isbn, url) pair, so a
/// single store listing is never counted twice in peer comparisons. First
/// occurrence wins; the operation is idempotent.
pub fn dedup_tracked(items: Vec<TrackedItem>) -> Vec<TrackedItem> {
    let mut seen: HashSet<(u64, String)> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert((item.isbn, item.url.clone())))
        .collect()
}

/// Aggregates a book's full price history into a report row.
///
/// `history` is the time series for one ISBN ordered by capture time;
/// `active_store_count` is the number of stores currently tracking it.
/// An empty history is an error the caller reports per ISBN.
pub fn aggregate(
    isbn: u64,
    history: &[PriceRecord],
    active_store_count: usize,
) -> Result<ReportRow> {
    if history.is_empty() {
        return Err(WatchError::InsufficientData(isbn));
    }

    // Historical extremes over the whole series, cheapest promo first.
    // Stable sort keeps ties in original sequence order.
    let mut by_price: Vec<&PriceRecord> = history.iter().collect();
    by_price.sort_by(|a, b| cmp_price(a.promo_price, b.promo_price));
    let lowest = PriceExtreme::from_record(by_price[0]);
    let highest = PriceExtreme::from_record(by_price[by_price.len() - 1]);

    // Current window: latest capture per store, capped to the most recent
    // `active_store_count` of those. One entry per store holds even when a
    // run captured a store zero or several times.
    let window = current_window(history, active_store_count);

    if window.is_empty() {
        return Err(WatchError::InsufficientData(isbn));
    }
    // First occurrence wins on price ties
    let mut best_idx = 0;
    for (i, record) in window.iter().enumerate().skip(1) {
        if record.promo_price < window[best_idx].promo_price {
            best_idx = i;
        }
    }
    let best = window[best_idx];

    let mut peers: Vec<&PriceRecord> = window
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != best_idx)
        .map(|(_, r)| *r)
        .collect();
    peers.sort_by(|a, b| cmp_price(a.promo_price, b.promo_price));

    Ok(ReportRow {
        current_discount: best.discount_percent(),
        best_offer: best.clone(),
        lowest,
        highest,
        other_offers: peers.iter().map(|r| Offer::from_record(r)).collect(),
    })
}

/// Latest record per store, newest first, truncated to `cap` entries.
/// A cap of zero means no truncation. Timestamp ties break on the store
/// name so the same history always yields the same window.
fn current_window(history: &[PriceRecord], cap: usize) -> Vec<&PriceRecord> {
    let mut latest: HashMap<&str, &PriceRecord> = HashMap::new();
    for record in history {
        match latest.get(record.bookstore.as_str()) {
            Some(existing) if existing.captured_at > record.captured_at => {}
            _ => {
                latest.insert(record.bookstore.as_str(), record);
            }
        }
    }

    let mut window: Vec<&PriceRecord> = latest.into_values().collect();
    window.sort_by(|a, b| {
        b.captured_at
            .cmp(&a.captured_at)
            .then_with(|| a.bookstore.cmp(&b.bookstore))
    });
    if cap > 0 {
        window.truncate(cap);
    }
    window
}

/// Splits a run's report rows into the fixed-size groups the notifier
/// renders.
pub fn chunk_rows(rows: Vec<ReportRow>) -> Vec<Vec<ReportRow>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for row in rows {
        current.push(row);
        if current.len() == REPORT_GROUP_SIZE {
            groups.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn cmp_price(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
