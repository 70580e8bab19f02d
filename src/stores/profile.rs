//! Per-store extraction configuration.
//!
//! Stores differ in markup, currency placement and discount conventions;
//! each difference is captured here as data so the shared routines in
//! [`super::extract`] stay the only parsing logic.

/// Where a price node keeps its value.
#[derive(Debug, Clone, Copy)]
pub enum PriceSource {
    /// The node's own text content
    Text,
    /// A named attribute of the node
    Attr(&'static str),
}

/// One price-bearing node.
#[derive(Debug, Clone, Copy)]
pub struct PriceNode {
    pub selector: &'static str,
    pub source: PriceSource,
    /// Which match of the selector to use, 0-based
    pub index: usize,
}

impl PriceNode {
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            source: PriceSource::Text,
            index: 0,
        }
    }

    pub const fn attr(selector: &'static str, attr: &'static str) -> Self {
        Self {
            selector,
            source: PriceSource::Attr(attr),
            index: 0,
        }
    }

    pub const fn text_at(selector: &'static str, index: usize) -> Self {
        Self {
            selector,
            source: PriceSource::Text,
            index,
        }
    }
}

/// How a store's markup exposes the price pair.
#[derive(Debug, Clone, Copy)]
pub enum PriceLayout {
    /// Current price in one node, original (struck-through) price in
    /// another. The original node being absent means no discount is
    /// active and both prices are the current one.
    Split {
        current: PriceNode,
        original: PriceNode,
    },
    /// Both prices inside a single node value, promo first, regular
    /// second; a lone value means no discount.
    Combined { node: PriceNode },
    /// Regular price in the node's own text, promo price in the text
    /// immediately following the node; missing sibling text means no
    /// discount.
    WithSibling { node: PriceNode },
}

/// How a store labels the ISBN-13 token.
#[derive(Debug, Clone, Copy)]
pub enum IsbnRule {
    /// Digits of the first node matched by the selector
    Node { selector: &'static str },
    /// Digits of the n-th node matched by the selector, 0-based
    NodeAt {
        selector: &'static str,
        index: usize,
    },
    /// Scan nodes matched by the selector for one whose text carries the
    /// label, then take the digits of its parent's text
    Labelled {
        selector: &'static str,
        label: &'static str,
    },
}

/// Complete extraction profile for one store.
#[derive(Debug, Clone, Copy)]
pub struct StoreProfile {
    pub name: &'static str,
    pub price: PriceLayout,
    pub isbn: IsbnRule,
    /// Selector for the cover image node; its `src` may be relative and
    /// is resolved against the page URL
    pub photo_selector: &'static str,
    /// Issue a priming request against the site root before the fetch
    pub warm_up: bool,
}
