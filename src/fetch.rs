//! Blocking page fetcher.
//!
//! Every request carries a browser-like identity; some stores refuse the
//! default library user agent or require a priming request against the
//! site root before serving product pages.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use crate::error::{Result, WatchError};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Fedora; Linux x86_64; rv:79.0) Gecko/20100101 Firefox/79.0";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Request timeout; a slow or unreachable store fails its own item instead
/// of stalling the batch.
const TIMEOUT_SECS: u64 = 30;

/// Builds the shared blocking client used for a batch run.
pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()?)
}

/// Fetches a page's HTML.
///
/// With `warm_up` set, a spoofed-identity request against the site root is
/// issued first so anti-bot checks see a plausible session before the real
/// fetch.
pub fn get_page(client: &Client, url: &str, warm_up: bool) -> Result<String> {
    if warm_up {
        let root = site_root(url)?;
        log::debug!("Warm-up request: {}", root);
        let _ = get(client, &root)?;
    }

    log::debug!("Fetching page: {}", url);
    get(client, url)
}

fn get(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", ACCEPT)
        .send()?;

    if !response.status().is_success() {
        return Err(WatchError::HttpStatus(response.status()));
    }
    Ok(response.text()?)
}

/// Root address of the page's site, e.g. `https://www.amazon.es/`.
fn site_root(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| WatchError::InvalidUrl(url.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| WatchError::InvalidUrl(url.to_string()))?;
    match parsed.port() {
        Some(port) => Ok(format!("{}://{}:{}/", parsed.scheme(), host, port)),
        None => Ok(format!("{}://{}/", parsed.scheme(), host)),
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
