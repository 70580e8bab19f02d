//! Notifier boundary.
//!
//! The batch driver hands fully-populated report rows over in fixed-size
//! groups; rendering transport (mail, chat, whatever) lives behind the
//! trait. The bundled implementation renders plain text to the log.

use crate::error::Result;
use crate::models::ReportRow;

pub trait Notifier {
    /// Deliver one run's report rows, already grouped for presentation.
    fn notify(&self, groups: &[Vec<ReportRow>]) -> Result<()>;
}

/// Renders report groups as plain text via the logger. Stands in for an
/// external transport in local runs.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, groups: &[Vec<ReportRow>]) -> Result<()> {
        for (i, group) in groups.iter().enumerate() {
            log::info!("Report group {}/{}", i + 1, groups.len());
            for row in group {
                log::info!("{}", format_row(row));
            }
        }
        Ok(())
    }
}

/// One-line summary of a report row.
pub fn format_row(row: &ReportRow) -> String {
    let best = &row.best_offer;
    let mut line = format!(
        "ISBN {}: best {}{} at {} ({:.0}% off)",
        best.isbn, best.promo_price, best.currency, best.bookstore, row.current_discount
    );
    line.push_str(&format!(
        " | low {}{} on {} at {} | high {}{} on {} at {}",
        row.lowest.price,
        row.lowest.currency,
        row.lowest.date,
        row.lowest.bookstore,
        row.highest.price,
        row.highest.currency,
        row.highest.date,
        row.highest.bookstore,
    ));
    if !row.other_offers.is_empty() {
        let peers: Vec<String> = row
            .other_offers
            .iter()
            .map(|o| format!("{} {}{}", o.bookstore, o.promo_price, o.currency))
            .collect();
        line.push_str(&format!(" | also: {}", peers.join(", ")));
    }
    line
}
