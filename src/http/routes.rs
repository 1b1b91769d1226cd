use axum::Form;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use maud::Markup;
use serde::Deserialize;
use tracing::{error, warn};

use crate::domain::csv_export::CSV_CONTENT_TYPE;
use crate::domain::search_params::{SearchParams, SortOrder, build_search_url};
use crate::error::BookingError;
use crate::http::AppState;
use crate::http::pages;

const LISTING_COUNT_HEADER: HeaderName = HeaderName::from_static("x-listing-count");

/// Maps pipeline errors onto status codes and plain-text bodies.
#[derive(Debug)]
pub struct HttpError(BookingError);

impl From<BookingError> for HttpError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            BookingError::Missing(_) | BookingError::InvalidParams { .. } => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            BookingError::FetchStatus { status } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                self.0.to_string(),
            ),
            other => {
                error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Unexpected error: {other}"),
                )
            }
        };
        (status, body).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BuildForm {
    pub destination: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub adults: Option<String>,
    pub rooms: Option<String>,
    pub sort: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeForm {
    pub url: Option<String>,
    pub filename: Option<String>,
}

pub async fn index() -> Markup {
    pages::index_page()
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn build(
    State(state): State<AppState>,
    Form(form): Form<BuildForm>,
) -> Result<Markup, HttpError> {
    let destination = trimmed(form.destination.as_deref());
    let checkin = trimmed(form.checkin.as_deref());
    let checkout = trimmed(form.checkout.as_deref());
    let filename = match trimmed(form.filename.as_deref()) {
        "" => "results",
        name => name,
    };

    if destination.is_empty() || checkin.is_empty() || checkout.is_empty() {
        return Err(BookingError::Missing("required fields".into()).into());
    }

    let params = SearchParams {
        destination: destination.to_string(),
        checkin: checkin.to_string(),
        checkout: checkout.to_string(),
        adults: parse_count("adults", form.adults.as_deref(), 2)?,
        rooms: parse_count("rooms", form.rooms.as_deref(), 1)?,
        sort: trimmed(form.sort.as_deref()).parse::<SortOrder>()?,
    };
    let url = build_search_url(&state.base_url, &params)?;

    Ok(pages::preview_page(&url, filename))
}

pub async fn scrape(
    State(state): State<AppState>,
    Form(form): Form<ScrapeForm>,
) -> Result<Response, HttpError> {
    let url = form.url.unwrap_or_default();
    let filename = form.filename.unwrap_or_default();

    let download = state.pipeline.scrape(&url, &filename).await?;
    if download.row_count == 0 {
        warn!(url = %url.trim(), "Scrape produced no listings");
    }

    let disposition = HeaderValue::from_bytes(download.content_disposition().as_bytes())
        .map_err(|_| BookingError::InvalidParams {
            reason: "filename contains characters not allowed in a header".into(),
        })?;

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (CONTENT_DISPOSITION, disposition),
            (LISTING_COUNT_HEADER, HeaderValue::from(download.row_count)),
        ],
        download.body,
    )
        .into_response())
}

fn trimmed(value: Option<&str>) -> &str {
    value.map(str::trim).unwrap_or_default()
}

fn parse_count(name: &str, value: Option<&str>, default: u32) -> Result<u32, BookingError> {
    match trimmed(value) {
        "" => Ok(default),
        raw => raw.parse().map_err(|_| BookingError::InvalidParams {
            reason: format!("{name} must be a whole number, got '{raw}'"),
        }),
    }
}
