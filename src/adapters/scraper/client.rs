use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::types::FetcherConfig;
use crate::error::{BookingError, Result};
use crate::ports::page_fetcher::PageFetcher;

/// Single-shot HTTP fetcher for Booking.com pages.
pub struct BookingClient {
    http: Client,
}

impl BookingClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for BookingClient {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching page");

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(error = %e, url, "HTTP request failed");
            BookingError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url, "Search page returned non-success status");
            return Err(BookingError::FetchStatus {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(BookingError::Http)
    }
}
