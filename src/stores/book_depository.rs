//! Book Depository: sale price always present, list price only when a
//! discount is active. ISBN exposed as a structured `itemprop` attribute.

use super::profile::{IsbnRule, PriceLayout, PriceNode, StoreProfile};

pub(super) const PROFILE: StoreProfile = StoreProfile {
    name: "Book Depository",
    price: PriceLayout::Split {
        current: PriceNode::text(".sale-price"),
        original: PriceNode::text(".list-price"),
    },
    isbn: IsbnRule::Node {
        selector: "span[itemprop=\"isbn\"]",
    },
    photo_selector: ".item-img > .item-img-content > .book-img",
    warm_up: false,
};
