//! Shared extraction routines over fetched markup.
//!
//! Adapters are pure functions of the page: all store-specific knowledge
//! comes in through [`StoreProfile`] and everything here works the same
//! way for every store.

use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use super::profile::{IsbnRule, PriceLayout, PriceNode, PriceSource};
use super::Bookstore;
use crate::error::{Result, WatchError};
use crate::fetch;
use crate::models::PriceRecord;
use crate::pricetext::{parse_price, ParsedPrice};

/// Fetches the page at `url` and extracts a canonical price record.
pub fn extract(client: &Client, store: Bookstore, url: &str) -> Result<PriceRecord> {
    let html = fetch::get_page(client, url, store.profile().warm_up)?;
    extract_from_html(store, url, &html)
}

/// Extracts a canonical price record from already-fetched markup.
pub fn extract_from_html(store: Bookstore, url: &str, html: &str) -> Result<PriceRecord> {
    let profile = store.profile();
    let doc = Html::parse_document(html);

    let price = extract_price(&doc, &profile.price, profile.name)?;
    let isbn = extract_isbn(&doc, &profile.isbn, profile.name)?;
    let photo_url = extract_photo(&doc, profile.photo_selector, url, profile.name)?;

    log::debug!(
        "Extracted {}: isbn={} promo={} regular={}",
        profile.name,
        isbn,
        price.promo,
        price.regular
    );

    Ok(PriceRecord {
        isbn,
        promo_price: price.promo,
        regular_price: price.regular,
        currency: price.currency,
        bookstore: profile.name.to_string(),
        url: url.to_string(),
        photo_url,
        captured_at: Utc::now(),
    })
}

struct ExtractedPrice {
    promo: f64,
    regular: f64,
    currency: String,
}

fn extract_price(doc: &Html, layout: &PriceLayout, store: &'static str) -> Result<ExtractedPrice> {
    let missing = || WatchError::Extraction {
        bookstore: store,
        field: "price",
    };

    let (promo, regular, currency) = match layout {
        PriceLayout::Split { current, original } => {
            let cur = node_value(doc, current)
                .and_then(|raw| parse_price(&raw))
                .ok_or_else(missing)?;
            // Absence of the original-price node means no discount
            match node_value(doc, original).and_then(|raw| parse_price(&raw)) {
                Some(orig) => (cur.value, orig.value, cur.currency),
                None => (cur.value, cur.value, cur.currency),
            }
        }
        PriceLayout::Combined { node } => {
            let raw = node_value(doc, node).ok_or_else(missing)?;
            let prices: Vec<ParsedPrice> = raw
                .replace('\u{a0}', "")
                .split_whitespace()
                .filter_map(parse_price)
                .collect();
            match prices.as_slice() {
                [only] => (only.value, only.value, only.currency.clone()),
                [promo, regular, ..] => (promo.value, regular.value, promo.currency.clone()),
                [] => return Err(missing()),
            }
        }
        PriceLayout::WithSibling { node } => {
            let el = select_nth(doc, node.selector, node.index).ok_or_else(missing)?;
            let regular = parse_price(&element_text(&el)).ok_or_else(missing)?;
            // Promo follows as loose text; without it there is no discount
            let promo = el
                .next_siblings()
                .filter_map(|n| n.value().as_text())
                .find_map(|t| parse_price(t))
                .unwrap_or_else(|| regular.clone());
            (promo.value, regular.value, regular.currency.clone())
        }
    };

    // A struck-through price below the offer is markup drift, not a markup
    // discount; record it as no discount rather than violate the invariant
    let regular = if promo > regular { promo } else { regular };

    Ok(ExtractedPrice {
        promo,
        regular,
        currency,
    })
}

fn extract_isbn(doc: &Html, rule: &IsbnRule, store: &'static str) -> Result<u64> {
    let missing = || WatchError::Extraction {
        bookstore: store,
        field: "isbn",
    };

    let token = match rule {
        IsbnRule::Node { selector } => select_nth(doc, selector, 0).map(|el| element_text(&el)),
        IsbnRule::NodeAt { selector, index } => {
            select_nth(doc, selector, *index).map(|el| element_text(&el))
        }
        IsbnRule::Labelled { selector, label } => labelled_text(doc, selector, label),
    }
    .ok_or_else(missing)?;

    isbn_from_token(&token).ok_or_else(missing)
}

/// Finds the element whose text carries `label` and returns its parent's
/// full text, where the ISBN itself lives ("ISBN-13: 978-...").
fn labelled_text(doc: &Html, selector: &str, label: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    for el in doc.select(&sel) {
        if element_text(&el).contains(label) {
            let parent = el.parent().and_then(ElementRef::wrap)?;
            return Some(element_text(&parent));
        }
    }
    None
}

/// Reduces a labelled token to the ISBN-13 integer: hyphens stripped, the
/// first run of exactly 13 digits wins. Label digits ("ISBN-13") never
/// form such a run.
fn isbn_from_token(token: &str) -> Option<u64> {
    let stripped: String = token.chars().filter(|c| *c != '-').collect();
    let mut run = String::new();
    for c in stripped.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_digit() {
            run.push(c);
        } else {
            if run.len() == 13 {
                return run.parse().ok();
            }
            run.clear();
        }
    }
    None
}

fn extract_photo(doc: &Html, selector: &str, page_url: &str, store: &'static str) -> Result<String> {
    let missing = || WatchError::Extraction {
        bookstore: store,
        field: "photo",
    };

    let el = select_nth(doc, selector, 0).ok_or_else(missing)?;
    let src = el.value().attr("src").ok_or_else(missing)?;

    // Relative cover paths resolve against the page address
    let base = Url::parse(page_url).map_err(|_| WatchError::InvalidUrl(page_url.to_string()))?;
    let absolute = base
        .join(src)
        .map_err(|_| WatchError::InvalidUrl(src.to_string()))?;
    Ok(absolute.to_string())
}

fn node_value(doc: &Html, node: &PriceNode) -> Option<String> {
    let el = select_nth(doc, node.selector, node.index)?;
    match node.source {
        PriceSource::Text => Some(element_text(&el)),
        PriceSource::Attr(attr) => el.value().attr(attr).map(str::to_string),
    }
}

fn select_nth<'a>(doc: &'a Html, selector: &str, index: usize) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).nth(index)
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
