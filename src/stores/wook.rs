//! Wook: prices exposed as `data-price` attributes on the sale-action
//! nodes, the old-price node only present during a promotion. ISBN has a
//! dedicated details node.

use super::profile::{IsbnRule, PriceLayout, PriceNode, StoreProfile};

pub(super) const PROFILE: StoreProfile = StoreProfile {
    name: "Wook",
    price: PriceLayout::Split {
        current: PriceNode::attr(
            "#productPageRightSectionTop-saleAction-price-current",
            "data-price",
        ),
        original: PriceNode::attr(
            "#productPageRightSectionTop-saleAction-price-old",
            "data-price",
        ),
    },
    isbn: IsbnRule::Node {
        selector: "#productPageSectionDetails-collapseDetalhes-content-isbn > .info",
    },
    photo_selector: "#productPageLeftSectionTop-image img",
    warm_up: false,
};
