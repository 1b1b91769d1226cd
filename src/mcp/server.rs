use std::fmt::Write as _;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};

use crate::domain::search_params::{SearchParams, SortOrder, build_search_url};
use crate::pipeline::{ScrapePipeline, ScrapeRequest, records_to_csv};

// ---------- Tool parameter types ----------

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BuildSearchUrlToolParams {
    /// City or region to search (e.g. "Auckland", "Queenstown")
    pub destination: String,
    /// Check-in date (YYYY-MM-DD format)
    pub checkin: String,
    /// Check-out date (YYYY-MM-DD format), after checkin
    pub checkout: String,
    /// Number of adult guests (default: 2)
    pub adults: Option<u32>,
    /// Number of rooms (default: 1)
    pub rooms: Option<u32>,
    /// Result order: "popularity" (default), "price" or "bayesian_review_score"
    pub sort: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScrapeToolParams {
    /// Booking.com search-results URL (build one with booking_build_search_url)
    pub url: String,
    /// Base name for the CSV file, without the .csv extension
    pub filename: String,
    /// Output format: "csv" (default) or "json"
    pub format: Option<String>,
}

#[derive(Clone)]
pub struct BookingMcpServer {
    pipeline: ScrapePipeline,
    base_url: String,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for BookingMcpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingMcpServer")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[tool_router]
impl BookingMcpServer {
    pub fn new(pipeline: ScrapePipeline, base_url: impl Into<String>) -> Self {
        Self {
            pipeline,
            base_url: base_url.into(),
            tool_router: Self::tool_router(),
        }
    }

    /// Build a Booking.com search-results URL from destination, dates and guests.
    #[tool(
        name = "booking_build_search_url",
        description = "Build a Booking.com search-results URL from a destination, check-in/check-out dates, guest and room counts, and sort order. Pass the URL to booking_scrape to download the results.",
        annotations(read_only_hint = true, open_world_hint = false)
    )]
    async fn booking_build_search_url(
        &self,
        Parameters(params): Parameters<BuildSearchUrlToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let sort = match params.sort.as_deref().unwrap_or_default().parse::<SortOrder>() {
            Ok(sort) => sort,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        let search = SearchParams {
            destination: params.destination,
            checkin: params.checkin,
            checkout: params.checkout,
            adults: params.adults.unwrap_or(2),
            rooms: params.rooms.unwrap_or(1),
            sort,
        };

        match build_search_url(&self.base_url, &search) {
            Ok(url) => Ok(CallToolResult::success(vec![Content::text(url)])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Could not build search URL: {e}"
            ))])),
        }
    }

    /// Scrape a search-results page and return the listings as CSV or JSON.
    #[tool(
        name = "booking_scrape",
        description = "Fetch a Booking.com search-results page and extract every hotel card (name, location, price, rating, score, review count, link). Returns CSV text by default, or JSON with format=\"json\". Missing ratings show as \"New to Booking.com\".",
        annotations(read_only_hint = true, open_world_hint = true)
    )]
    async fn booking_scrape(
        &self,
        Parameters(params): Parameters<ScrapeToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let as_json = match params.format.as_deref().map(str::trim) {
            None | Some("" | "csv") => false,
            Some("json") => true,
            Some(other) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Unknown format '{other}'. Use \"csv\" or \"json\"."
                ))]));
            }
        };

        let request = match ScrapeRequest::new(&params.url, &params.filename) {
            Ok(request) => request,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };

        let records = match self.pipeline.fetch_records(&request.url).await {
            Ok(records) => records,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Scrape failed: {e}. Check that the URL is a Booking.com search-results page."
                ))]));
            }
        };

        let download = records_to_csv(&records, &request.filename);
        let mut text = String::new();
        if records.is_empty() {
            text.push_str(
                "No listings found. The page may be a block/CAPTCHA page or the markup changed.\n",
            );
        } else {
            let _ = writeln!(
                text,
                "Scraped {} listings (suggested file: {})\n",
                download.row_count, download.filename
            );
        }

        if as_json {
            match serde_json::to_string_pretty(&records) {
                Ok(json) => text.push_str(&json),
                Err(e) => {
                    return Ok(CallToolResult::error(vec![Content::text(format!(
                        "Failed to serialize listings: {e}"
                    ))]));
                }
            }
        } else {
            text.push_str(&download.body);
        }

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for BookingMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Booking.com scraper that turns hotel search results into CSV.\n\
                 \n\
                 - booking_build_search_url: destination + dates + guests → search-results URL\n\
                 - booking_scrape: search-results URL → CSV (or JSON) of hotel name, location, \
                 price, rating, score, review count and link\n\
                 \n\
                 Extraction is best-effort: an empty result usually means Booking.com served a \
                 block page or changed its markup."
                    .into(),
            ),
        }
    }
}
