//! PACTOR: the price node's own text is the regular price and the
//! discounted price follows as loose text right after it. The ISBN sits
//! in the second cell of the odd specs-table row. Cover images are
//! relative paths.

use super::profile::{IsbnRule, PriceLayout, PriceNode, StoreProfile};

pub(super) const PROFILE: StoreProfile = StoreProfile {
    name: "PACTOR",
    price: PriceLayout::WithSibling {
        node: PriceNode::text(".precoDetalhe > span"),
    },
    isbn: IsbnRule::NodeAt {
        selector: "#listSpecsDetalhe .impar > td",
        index: 1,
    },
    photo_selector: "#tabLivro > .bgDetalheLivro > .capaLivroDetalhe > a > img",
    warm_up: false,
};
