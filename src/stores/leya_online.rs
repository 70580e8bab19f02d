//! LeyaOnline: leading currency symbol, the pre-discount price lives in
//! the second span of the `.pvp` block when a promotion runs. Cover
//! images are relative paths.

use super::profile::{IsbnRule, PriceLayout, PriceNode, StoreProfile};

pub(super) const PROFILE: StoreProfile = StoreProfile {
    name: "LeyaOnline",
    price: PriceLayout::Split {
        current: PriceNode::text(".price"),
        original: PriceNode::text_at(".pvp > span", 1),
    },
    isbn: IsbnRule::Node {
        selector: "span[itemprop=\"identifier\"]",
    },
    photo_selector: ".img > a > img",
    warm_up: false,
};
