use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Normalized, store-agnostic snapshot of one book's price at one store at
/// one instant. Created exactly once per successful extraction and never
/// updated in place; history accumulates one record per
/// (isbn, bookstore, captured_at).
#[derive(Debug, Clone, Serialize)]
pub struct PriceRecord {
    /// ISBN-13 of the book; offers for the same title group on this key
    pub isbn: u64,
    /// Discounted price; equals `regular_price` when no discount is active
    pub promo_price: f64,
    /// Undiscounted price; `promo_price <= regular_price` always holds
    pub regular_price: f64,
    /// Currency symbol as scraped (stores differ, not normalized to ISO)
    pub currency: String,
    pub bookstore: String,
    pub url: String,
    /// Cover image address, absolute
    pub photo_url: String,
    pub captured_at: DateTime<Utc>,
}

impl PriceRecord {
    /// Discount of this snapshot in percent, computed against its own
    /// regular price. Zero when the regular price is zero or no discount
    /// applies.
    pub fn discount_percent(&self) -> f64 {
        if self.regular_price == 0.0 {
            return 0.0;
        }
        (1.0 - self.promo_price / self.regular_price) * 100.0
    }
}

/// A (book, store) pair currently under price surveillance. Read-only
/// input to the batch driver; `watch_status` gates inclusion in a run.
#[derive(Debug, Clone)]
pub struct TrackedItem {
    pub isbn: u64,
    pub bookstore: String,
    pub url: String,
    pub watch_status: bool,
}

/// A peer offer in the current window, presented as an alternative to the
/// best one.
#[derive(Debug, Clone, Serialize)]
pub struct Offer {
    pub bookstore: String,
    pub promo_price: f64,
    pub regular_price: f64,
    pub currency: String,
    pub url: String,
}

impl Offer {
    pub fn from_record(record: &PriceRecord) -> Self {
        Self {
            bookstore: record.bookstore.clone(),
            promo_price: record.promo_price,
            regular_price: record.regular_price,
            currency: record.currency.clone(),
            url: record.url.clone(),
        }
    }
}

/// One historical extreme (all-time low or high) with the context it was
/// recorded in.
#[derive(Debug, Clone, Serialize)]
pub struct PriceExtreme {
    pub price: f64,
    pub currency: String,
    pub date: NaiveDate,
    pub discount_percent: f64,
    pub bookstore: String,
}

impl PriceExtreme {
    pub fn from_record(record: &PriceRecord) -> Self {
        Self {
            price: record.promo_price,
            currency: record.currency.clone(),
            date: record.captured_at.date_naive(),
            discount_percent: record.discount_percent(),
            bookstore: record.bookstore.clone(),
        }
    }
}

/// Aggregated per-book summary: current best offer, historical extremes
/// and the remaining peer offers. Embeds the best offer's record rather
/// than extending it.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub best_offer: PriceRecord,
    /// Discount of the best offer in percent
    pub current_discount: f64,
    pub lowest: PriceExtreme,
    pub highest: PriceExtreme,
    /// Peer offers ascending by promo price, best offer excluded
    pub other_offers: Vec<Offer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(promo: f64, regular: f64) -> PriceRecord {
        PriceRecord {
            isbn: 9780134190440,
            promo_price: promo,
            regular_price: regular,
            currency: "€".to_string(),
            bookstore: "Wook".to_string(),
            url: "https://www.wook.pt/livro/x/1".to_string(),
            photo_url: "https://img.wook.pt/1.jpg".to_string(),
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn discount_percent_with_discount() {
        let r = record(15.0, 20.0);
        assert!((r.discount_percent() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn discount_percent_no_discount_is_zero() {
        let r = record(19.99, 19.99);
        assert_eq!(r.discount_percent(), 0.0);
    }

    #[test]
    fn discount_percent_zero_regular_price_is_zero() {
        let r = record(0.0, 0.0);
        assert_eq!(r.discount_percent(), 0.0);
    }

    #[test]
    fn report_row_serializes_for_external_transports() {
        let best = record(14.99, 19.99);
        let row = ReportRow {
            current_discount: best.discount_percent(),
            lowest: PriceExtreme::from_record(&best),
            highest: PriceExtreme::from_record(&best),
            other_offers: vec![Offer::from_record(&best)],
            best_offer: best,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["best_offer"]["isbn"], 9780134190440u64);
        assert_eq!(json["best_offer"]["promo_price"], 14.99);
        assert_eq!(json["lowest"]["bookstore"], "Wook");
        assert_eq!(json["other_offers"][0]["currency"], "€");
    }

    #[test]
    fn extreme_carries_record_context() {
        let r = record(10.0, 20.0);
        let extreme = PriceExtreme::from_record(&r);
        assert_eq!(extreme.price, 10.0);
        assert_eq!(extreme.bookstore, "Wook");
        assert!((extreme.discount_percent - 50.0).abs() < 1e-9);
        assert_eq!(extreme.date, r.captured_at.date_naive());
    }
}
