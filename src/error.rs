use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse HTML response: {reason}")]
    Parse { reason: String },

    #[error("Failed to fetch page: {status}")]
    FetchStatus { status: u16 },

    #[error("Missing {0}")]
    Missing(String),

    #[error("Invalid input: {reason}")]
    InvalidParams { reason: String },

    #[error("Invalid selector for {name}: {reason}")]
    InvalidSelector { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, BookingError>;
