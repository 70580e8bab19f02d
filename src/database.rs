//! SQLite persistence for tracked books and price history.
//!
//! Two collections: `tracked_books` keyed by (isbn, bookstore) with a
//! watch flag, and `price_history` keyed by (isbn, bookstore, captured_at)
//! holding canonical price records. History is append-only; records are
//! never updated in place. Parameterized queries exclusively.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{PriceRecord, TrackedItem};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tracked_books (
            isbn INTEGER NOT NULL,
            bookstore TEXT NOT NULL,
            url TEXT NOT NULL,
            watch_status INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (isbn, bookstore)
        );

        -- Append-only price history, one row per (isbn, store, capture
        -- instant); two stores may well be captured at the same instant
        CREATE TABLE IF NOT EXISTS price_history (
            isbn INTEGER NOT NULL,
            captured_at TEXT NOT NULL,
            promo_price REAL NOT NULL,
            regular_price REAL NOT NULL,
            currency TEXT NOT NULL,
            bookstore TEXT NOT NULL,
            url TEXT NOT NULL,
            photo_url TEXT NOT NULL,
            PRIMARY KEY (isbn, bookstore, captured_at)
        );

        CREATE INDEX IF NOT EXISTS idx_price_history_isbn ON price_history(isbn);
        ",
    )?;

    log::info!("Database schema initialized");
    Ok(())
}

/// Register a book listing for tracking. Re-adding an existing
/// (isbn, bookstore) pair updates its URL and resumes watching.
pub fn add_tracked(conn: &Connection, isbn: u64, bookstore: &str, url: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO tracked_books (isbn, bookstore, url, watch_status)
         VALUES (?1, ?2, ?3, 1)",
        params![isbn as i64, bookstore, url],
    )?;
    log::info!("Tracking ISBN {} at {}", isbn, bookstore);
    Ok(())
}

/// All tracked items, watched or not.
pub fn list_tracked(conn: &Connection) -> Result<Vec<TrackedItem>> {
    let mut stmt = conn.prepare(
        "SELECT isbn, bookstore, url, watch_status FROM tracked_books
         ORDER BY isbn, bookstore",
    )?;
    let items = stmt
        .query_map([], row_to_tracked)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

/// Active tracked items only; the batch driver's input.
pub fn scan_tracked_active(conn: &Connection) -> Result<Vec<TrackedItem>> {
    let mut stmt = conn.prepare(
        "SELECT isbn, bookstore, url, watch_status FROM tracked_books
         WHERE watch_status = 1 ORDER BY isbn, bookstore",
    )?;
    let items = stmt
        .query_map([], row_to_tracked)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

/// Pause or resume watching an item. Returns false when no such item
/// exists.
pub fn set_watch_status(
    conn: &Connection,
    isbn: u64,
    bookstore: &str,
    watch: bool,
) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE tracked_books SET watch_status = ?3 WHERE isbn = ?1 AND bookstore = ?2",
        params![isbn as i64, bookstore, watch as i64],
    )?;
    Ok(changed > 0)
}

/// Delete a tracked item. Its price history stays.
pub fn remove_tracked(conn: &Connection, isbn: u64, bookstore: &str) -> Result<bool> {
    let changed = conn.execute(
        "DELETE FROM tracked_books WHERE isbn = ?1 AND bookstore = ?2",
        params![isbn as i64, bookstore],
    )?;
    Ok(changed > 0)
}

/// Append one captured price record to the history.
pub fn append_record(conn: &Connection, record: &PriceRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO price_history
         (isbn, captured_at, promo_price, regular_price, currency, bookstore, url, photo_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.isbn as i64,
            record.captured_at.to_rfc3339(),
            record.promo_price,
            record.regular_price,
            &record.currency,
            &record.bookstore,
            &record.url,
            &record.photo_url,
        ],
    )?;
    Ok(())
}

/// Full price history for one ISBN, oldest capture first.
pub fn history_for_isbn(conn: &Connection, isbn: u64) -> Result<Vec<PriceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT isbn, captured_at, promo_price, regular_price, currency, bookstore, url, photo_url
         FROM price_history WHERE isbn = ?1 ORDER BY captured_at",
    )?;
    let records = stmt
        .query_map(params![isbn as i64], row_to_record)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

/// Number of distinct stores actively tracking an ISBN; sizes the current
/// window during aggregation.
pub fn active_store_count(conn: &Connection, isbn: u64) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT bookstore) FROM tracked_books
         WHERE isbn = ?1 AND watch_status = 1",
        params![isbn as i64],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

fn row_to_tracked(row: &rusqlite::Row<'_>) -> rusqlite::Result<TrackedItem> {
    Ok(TrackedItem {
        isbn: row.get::<_, i64>(0)? as u64,
        bookstore: row.get(1)?,
        url: row.get(2)?,
        watch_status: row.get::<_, i64>(3)? != 0,
    })
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<PriceRecord> {
    let captured_raw: String = row.get(1)?;
    let captured_at = parse_timestamp(&captured_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("bad timestamp: {}", captured_raw).into(),
        )
    })?;
    Ok(PriceRecord {
        isbn: row.get::<_, i64>(0)? as u64,
        captured_at,
        promo_price: row.get(2)?,
        regular_price: row.get(3)?,
        currency: row.get(4)?,
        bookstore: row.get(5)?,
        url: row.get(6)?,
        photo_url: row.get(7)?,
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[path = "database_tests.rs"]
mod tests;
