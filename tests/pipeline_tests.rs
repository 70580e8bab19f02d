//! End-to-end pipeline tests: extract from static markup, persist,
//! aggregate and render, without touching the network.

use bookwatch::models::PriceRecord;
use bookwatch::stores::extract::extract_from_html;
use bookwatch::{database, notify, report, Bookstore};
use rusqlite::Connection;

fn wook_page(current: &str, old: Option<&str>, isbn: u64) -> String {
    let old_node = old
        .map(|p| {
            format!(
                r#"<span id="productPageRightSectionTop-saleAction-price-old" data-price="{p}"></span>"#
            )
        })
        .unwrap_or_default();
    format!(
        r#"<html><body>
        <div id="productPageLeftSectionTop-image"><img src="https://img.wook.pt/{isbn}.jpg"></div>
        {old_node}
        <span id="productPageRightSectionTop-saleAction-price-current" data-price="{current}"></span>
        <div id="productPageSectionDetails-collapseDetalhes-content-isbn">
            <span class="info">{isbn}</span>
        </div>
        </body></html>"#
    )
}

fn leya_page(price: &str, pvp: Option<&str>, isbn: u64) -> String {
    let pvp_block = pvp
        .map(|p| format!(r#"<div class="pvp"><span>PVP</span><span>{p}</span></div>"#))
        .unwrap_or_default();
    format!(
        r##"<html><body>
        <div class="img"><a href="#"><img src="/covers/{isbn}.jpg"></a></div>
        <span class="price">{price}</span>
        {pvp_block}
        <span itemprop="identifier">{isbn}</span>
        </body></html>"##
    )
}

fn capture(conn: &Connection, store: Bookstore, url: &str, html: &str) -> PriceRecord {
    let record = extract_from_html(store, url, html).unwrap();
    database::append_record(conn, &record).unwrap();
    record
}

#[test]
fn two_stores_end_to_end() {
    let conn = Connection::open_in_memory().unwrap();
    database::init_schema(&conn).unwrap();

    let isbn = 9789722060352u64;
    let wook_url = "https://www.wook.pt/livro/x/1";
    let leya_url = "https://www.leyaonline.com/pt/livros/x/";

    database::add_tracked(&conn, isbn, "Wook", wook_url).unwrap();
    database::add_tracked(&conn, isbn, "LeyaOnline", leya_url).unwrap();

    // Yesterday's run: Wook discounted, Leya at full price
    capture(
        &conn,
        Bookstore::Wook,
        wook_url,
        &wook_page("12,99€", Some("15,50€"), isbn),
    );
    std::thread::sleep(std::time::Duration::from_millis(5));
    capture(
        &conn,
        Bookstore::LeyaOnline,
        leya_url,
        &leya_page("€ 14,50", None, isbn),
    );
    std::thread::sleep(std::time::Duration::from_millis(5));

    // Today's run: Wook promotion over, Leya now cheapest
    capture(
        &conn,
        Bookstore::Wook,
        wook_url,
        &wook_page("15,50€", None, isbn),
    );
    std::thread::sleep(std::time::Duration::from_millis(5));
    capture(
        &conn,
        Bookstore::LeyaOnline,
        leya_url,
        &leya_page("€ 13,05", Some("€ 14,50"), isbn),
    );

    let history = database::history_for_isbn(&conn, isbn).unwrap();
    assert_eq!(history.len(), 4);

    let active = database::active_store_count(&conn, isbn).unwrap();
    assert_eq!(active, 2);

    let row = report::aggregate(isbn, &history, active).unwrap();

    // Current window ignores the stale 12.99 capture from Wook
    assert_eq!(row.best_offer.bookstore, "LeyaOnline");
    assert_eq!(row.best_offer.promo_price, 13.05);
    assert!((row.current_discount - 10.0).abs() < 0.1);
    assert_eq!(row.other_offers.len(), 1);
    assert_eq!(row.other_offers[0].bookstore, "Wook");
    assert_eq!(row.other_offers[0].promo_price, 15.50);

    // The expired promotion still holds the historical low
    assert_eq!(row.lowest.price, 12.99);
    assert_eq!(row.lowest.bookstore, "Wook");
    assert_eq!(row.highest.price, 15.50);

    let text = notify::format_row(&row);
    assert!(text.contains("9789722060352"));
    assert!(text.contains("LeyaOnline"));
}

#[test]
fn pausing_a_store_shrinks_the_window() {
    let conn = Connection::open_in_memory().unwrap();
    database::init_schema(&conn).unwrap();

    let isbn = 9780134190440u64;
    let wook_url = "https://www.wook.pt/livro/y/2";
    let leya_url = "https://www.leyaonline.com/pt/livros/y/";

    database::add_tracked(&conn, isbn, "Wook", wook_url).unwrap();
    database::add_tracked(&conn, isbn, "LeyaOnline", leya_url).unwrap();

    capture(
        &conn,
        Bookstore::Wook,
        wook_url,
        &wook_page("10,00€", None, isbn),
    );
    std::thread::sleep(std::time::Duration::from_millis(5));
    capture(
        &conn,
        Bookstore::LeyaOnline,
        leya_url,
        &leya_page("€ 11,00", None, isbn),
    );

    // Wook drops out of tracking; only Leya's latest capture competes
    database::set_watch_status(&conn, isbn, "Wook", false).unwrap();
    let active = database::active_store_count(&conn, isbn).unwrap();
    assert_eq!(active, 1);

    let history = database::history_for_isbn(&conn, isbn).unwrap();
    let row = report::aggregate(isbn, &history, active).unwrap();

    assert_eq!(row.best_offer.bookstore, "LeyaOnline");
    assert!(row.other_offers.is_empty());
    // History is untouched by the pause
    assert_eq!(row.lowest.price, 10.0);
}
