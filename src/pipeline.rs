use std::sync::Arc;

use tracing::info;
use url::Url;

use crate::adapters::scraper::listing_parser::ListingExtractor;
use crate::domain::csv_export::{CsvDownload, render_csv};
use crate::domain::listing::{LISTING_SCHEMA, ListingRecord};
use crate::error::{BookingError, Result};
use crate::ports::page_fetcher::PageFetcher;

/// Validated input for one scrape: a search URL and the download's base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub url: String,
    pub filename: String,
}

impl ScrapeRequest {
    pub fn new(url: &str, filename: &str) -> Result<Self> {
        let url = url.trim();
        let filename = filename.trim();
        if url.is_empty() || filename.is_empty() {
            return Err(BookingError::Missing("url or filename".into()));
        }

        let parsed = Url::parse(url).map_err(|e| BookingError::InvalidParams {
            reason: format!("invalid url '{url}': {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BookingError::InvalidParams {
                reason: format!("unsupported url scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            url: url.to_string(),
            filename: download_name(filename),
        })
    }
}

/// `my-hotels` → `my-hotels.csv`. The name is used as given.
fn download_name(base: &str) -> String {
    format!("{base}.csv")
}

/// Extract listings from `html` and render them as a CSV download.
pub fn html_to_csv(extractor: &ListingExtractor, html: &str, filename: &str) -> CsvDownload {
    let records = extractor.extract(html);
    records_to_csv(&records, filename)
}

pub fn records_to_csv(records: &[ListingRecord], filename: &str) -> CsvDownload {
    CsvDownload {
        filename: filename.to_string(),
        body: render_csv(records, &LISTING_SCHEMA),
        row_count: records.len(),
    }
}

/// Fetch → extract → render.
#[derive(Clone)]
pub struct ScrapePipeline {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<ListingExtractor>,
}

impl ScrapePipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: Arc<ListingExtractor>) -> Self {
        Self { fetcher, extractor }
    }

    pub async fn fetch_records(&self, url: &str) -> Result<Vec<ListingRecord>> {
        let html = self.fetcher.fetch_html(url).await?;
        Ok(self.extractor.extract(&html))
    }

    pub async fn scrape(&self, url: &str, filename: &str) -> Result<CsvDownload> {
        let request = ScrapeRequest::new(url, filename)?;
        let records = self.fetch_records(&request.url).await?;
        let download = records_to_csv(&records, &request.filename);
        info!(
            url = %request.url,
            filename = %download.filename,
            rows = download.row_count,
            "Scrape finished"
        );
        Ok(download)
    }
}

impl std::fmt::Debug for ScrapePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrapePipeline").finish_non_exhaustive()
    }
}
