use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// HTML form front end with CSV downloads.
    #[default]
    Http,
    /// MCP JSON-RPC over stdin/stdout.
    Stdio,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: Transport,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Stripped from the front of the price text when present.
    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            currency_prefix: default_currency_prefix(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// CSS selectors locating listing cards and the fields inside each card.
///
/// Booking.com ships generated class names that change between deployments;
/// this table is the only place that knows about them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectorConfig {
    #[serde(default = "default_listing_block")]
    pub listing_block: String,
    #[serde(default = "default_hotel_name")]
    pub hotel_name: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_price")]
    pub price: String,
    #[serde(default = "default_review")]
    pub review: String,
    #[serde(default = "default_rating")]
    pub rating: String,
    #[serde(default = "default_score")]
    pub score: String,
    #[serde(default = "default_link")]
    pub link: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_block: default_listing_block(),
            hotel_name: default_hotel_name(),
            location: default_location(),
            price: default_price(),
            review: default_review(),
            rating: default_rating(),
            score: default_score(),
            link: default_link(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_base_url() -> String {
    "https://www.booking.com".into()
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_currency_prefix() -> String {
    "NZD ".into()
}

fn default_listing_block() -> String {
    r#"div[role="listitem"]"#.into()
}

fn default_hotel_name() -> String {
    "div.b87c397a13.a3e0b4ffd1".into()
}

fn default_location() -> String {
    "span.d823fbbeed.f9b3563dd4".into()
}

fn default_price() -> String {
    "span.b87c397a13.f2f358d1de.ab607752a2".into()
}

fn default_review() -> String {
    "div.fff1944c52.fb14de7f14.eaa8455879".into()
}

fn default_rating() -> String {
    "div.f63b14ab7a.f546354b44.becbee2f63".into()
}

fn default_score() -> String {
    "div.f63b14ab7a.dff2e52086".into()
}

fn default_link() -> String {
    "a[href]".into()
}
