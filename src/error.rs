//! Error types for bookwatch operations

use std::fmt;

/// Unified error type for fetch, extraction, aggregation and database
/// operations.
#[derive(Debug)]
pub enum WatchError {
    /// HTTP request failed (network error, timeout, etc.)
    Fetch(reqwest::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// Page fetched but a required field could not be located (markup drift)
    Extraction {
        bookstore: &'static str,
        field: &'static str,
    },
    /// No adapter registered for the URL's domain
    UnknownStore(String),
    /// URL could not be parsed at all
    InvalidUrl(String),
    /// Aggregation requested for an ISBN with no price history
    InsufficientData(u64),
    /// Database operation failed
    Database(rusqlite::Error),
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchError::Fetch(e) => write!(f, "Fetch error: {}", e),
            WatchError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            WatchError::Extraction { bookstore, field } => {
                write!(f, "Extraction error: no {} found on {} page", field, bookstore)
            }
            WatchError::UnknownStore(domain) => {
                write!(f, "No adapter registered for domain: {}", domain)
            }
            WatchError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            WatchError::InsufficientData(isbn) => {
                write!(f, "No price history for ISBN {}", isbn)
            }
            WatchError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for WatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WatchError::Fetch(e) => Some(e),
            WatchError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WatchError {
    fn from(err: reqwest::Error) -> Self {
        WatchError::Fetch(err)
    }
}

impl From<rusqlite::Error> for WatchError {
    fn from(err: rusqlite::Error) -> Self {
        WatchError::Database(err)
    }
}

/// Result alias for bookwatch operations
pub type Result<T> = std::result::Result<T, WatchError>;
