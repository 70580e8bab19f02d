//! Tests for adapter resolution by domain.

use super::*;

#[test]
fn resolves_each_store_domain() {
    let cases = [
        ("https://www.almedina.net/produto/x", Bookstore::Almedina),
        ("https://www.amazon.es/dp/0134190440", Bookstore::Amazon),
        (
            "https://www.bookdepository.com/book/9780134190440",
            Bookstore::BookDepository,
        ),
        ("https://www.leyaonline.com/pt/livros/x/", Bookstore::LeyaOnline),
        ("https://www.pactor.pt/pt/catalogo/x/", Bookstore::Pactor),
        ("https://www.wook.pt/livro/x/1", Bookstore::Wook),
    ];
    for (url, expected) in cases {
        assert_eq!(Bookstore::from_url(url).unwrap(), expected, "{url}");
    }
}

#[test]
fn resolves_without_www_prefix() {
    assert_eq!(
        Bookstore::from_url("https://wook.pt/livro/x/1").unwrap(),
        Bookstore::Wook
    );
}

#[test]
fn resolves_generic_second_level_registration() {
    assert_eq!(
        Bookstore::from_url("https://www.amazon.co.uk/dp/0134190440").unwrap(),
        Bookstore::Amazon
    );
}

#[test]
fn unknown_domain_is_reported() {
    match Bookstore::from_url("https://www.example.com/book/1") {
        Err(WatchError::UnknownStore(domain)) => assert_eq!(domain, "example"),
        other => panic!("Expected UnknownStore, got: {other:?}"),
    }
}

#[test]
fn unparseable_url_is_invalid() {
    match Bookstore::from_url("not a url") {
        Err(WatchError::InvalidUrl(_)) => {}
        other => panic!("Expected InvalidUrl, got: {other:?}"),
    }
}

#[test]
fn from_domain_covers_all_variants() {
    for store in Bookstore::all() {
        // Every variant must be reachable through the registry
        let domain = match store {
            Bookstore::Almedina => "almedina",
            Bookstore::Amazon => "amazon",
            Bookstore::BookDepository => "bookdepository",
            Bookstore::LeyaOnline => "leyaonline",
            Bookstore::Pactor => "pactor",
            Bookstore::Wook => "wook",
        };
        assert_eq!(Bookstore::from_domain(domain), Some(*store));
    }
    assert_eq!(Bookstore::from_domain("bertrand"), None);
}

#[test]
fn registrable_label_variants() {
    assert_eq!(registrable_label("www.wook.pt"), "wook");
    assert_eq!(registrable_label("wook.pt"), "wook");
    assert_eq!(registrable_label("www.amazon.co.uk"), "amazon");
    assert_eq!(registrable_label("localhost"), "localhost");
}
