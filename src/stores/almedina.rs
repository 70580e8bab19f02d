//! Almedina: both prices live in one `content` attribute, promo first.
//! The ISBN sits in the fourth entry of the product details list behind
//! a label.

use super::profile::{IsbnRule, PriceLayout, PriceNode, StoreProfile};

pub(super) const PROFILE: StoreProfile = StoreProfile {
    name: "Almedina",
    price: PriceLayout::Combined {
        node: PriceNode::attr(".price-regular > span", "content"),
    },
    isbn: IsbnRule::NodeAt {
        selector: ".prod-details-wrapper > ul > li",
        index: 3,
    },
    photo_selector: ".product-image-wrapper > .product-image-container > img",
    warm_up: false,
};
