//! Bookwatch - book price tracker
//!
//! Scrapes tracked book listings from online bookstores, appends each
//! captured price to a SQLite history and reports price trends: current
//! best offer per book, historical extremes and peer offers.

pub mod batch;
pub mod database;
pub mod error;
pub mod fetch;
pub mod models;
pub mod notify;
pub mod pricetext;
pub mod report;
pub mod stores;

// Re-export commonly used items
pub use batch::{RunFailure, RunSummary};
pub use error::{Result, WatchError};
pub use models::{Offer, PriceExtreme, PriceRecord, ReportRow, TrackedItem};
pub use notify::{LogNotifier, Notifier};
pub use report::{aggregate, chunk_rows, dedup_tracked, REPORT_GROUP_SIZE};
pub use stores::Bookstore;
