use async_trait::async_trait;

use crate::error::Result;

/// Retrieves the HTML of a search-results page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the body text.
    ///
    /// Non-success statuses are reported as `BookingError::FetchStatus`.
    async fn fetch_html(&self, url: &str) -> Result<String>;
}
