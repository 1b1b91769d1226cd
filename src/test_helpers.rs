use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::ports::page_fetcher::PageFetcher;

type PageFn = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

pub struct MockFetcher {
    page_fn: Mutex<PageFn>,
    requested: Mutex<Vec<String>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            page_fn: Mutex::new(Box::new(|_| Ok(search_page(&[])))),
            requested: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_page(self, f: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Self {
        *self.page_fn.lock().unwrap() = Box::new(f);
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        (self.page_fn.lock().unwrap())(url)
    }
}

// ---------------------------------------------------------------------------
// Factory helpers
// ---------------------------------------------------------------------------

/// A listing card in Booking.com's markup with name, location, price and a rating block.
pub fn listing_card(name: &str, location: &str, price: &str) -> String {
    format!(
        r#"<div role="listitem" data-testid="property-card">
            <a href="https://www.booking.com/hotel/nz/{slug}.html">
                <div class="b87c397a13 a3e0b4ffd1">{name}</div>
            </a>
            <span class="d823fbbeed f9b3563dd4">{location}</span>
            <div class="f63b14ab7a dff2e52086">8.4</div>
            <div class="f63b14ab7a f546354b44 becbee2f63">Very good</div>
            <div class="fff1944c52 fb14de7f14 eaa8455879">312 reviews</div>
            <span class="b87c397a13 f2f358d1de ab607752a2">{price}</span>
        </div>"#,
        slug = name.to_lowercase().replace(' ', "-"),
    )
}

/// Wrap cards in a minimal search-results page.
pub fn search_page(cards: &[String]) -> String {
    format!(
        r#"<!doctype html><html><head><title>Search results</title></head>
        <body><div role="list">{}</div></body></html>"#,
        cards.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_fetcher_records_urls() {
        let fetcher = MockFetcher::new();
        fetcher.fetch_html("https://a.test/").await.unwrap();
        fetcher.fetch_html("https://b.test/").await.unwrap();
        assert_eq!(
            fetcher.requested_urls(),
            ["https://a.test/", "https://b.test/"]
        );
    }

    #[test]
    fn listing_card_uses_slug_link() {
        let card = listing_card("Harbour View", "Auckland", "NZD 1");
        assert!(card.contains("/hotel/nz/harbour-view.html"));
    }
}
