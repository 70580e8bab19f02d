//! Amazon: discount shown as a struck-through list price next to the
//! offer price; the currency symbol may lead or trail depending on the
//! marketplace. Product pages refuse bare library clients, so a warm-up
//! request against the site root comes first. The ISBN appears as inline
//! "ISBN-13:" text in the product details.

use super::profile::{IsbnRule, PriceLayout, PriceNode, StoreProfile};

pub(super) const PROFILE: StoreProfile = StoreProfile {
    name: "Amazon",
    price: PriceLayout::Split {
        current: PriceNode::text(".offer-price"),
        original: PriceNode::text("#buyBoxInner > ul > li > span > .a-text-strike"),
    },
    isbn: IsbnRule::Labelled {
        selector: "span.a-text-bold, b",
        label: "ISBN-13",
    },
    photo_selector: "#imgBlkFront",
    warm_up: true,
};
