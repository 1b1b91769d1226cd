use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BookingError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Popularity,
    Price,
    BayesianReviewScore,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Popularity => "popularity",
            SortOrder::Price => "price",
            SortOrder::BayesianReviewScore => "bayesian_review_score",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Popularity => "Most popular",
            SortOrder::Price => "Lowest price",
            SortOrder::BayesianReviewScore => "Top reviewed",
        }
    }

    pub const ALL: [SortOrder; 3] = [
        SortOrder::Popularity,
        SortOrder::Price,
        SortOrder::BayesianReviewScore,
    ];
}

impl std::str::FromStr for SortOrder {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "popularity" => Ok(SortOrder::Popularity),
            "price" => Ok(SortOrder::Price),
            "bayesian_review_score" => Ok(SortOrder::BayesianReviewScore),
            other => Err(BookingError::InvalidParams {
                reason: format!("unknown sort order '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub destination: String,
    pub checkin: String,
    pub checkout: String,
    pub adults: u32,
    pub rooms: u32,
    pub sort: SortOrder,
}

impl SearchParams {
    /// Check the inputs and return the parsed (checkin, checkout) dates.
    pub fn validate(&self) -> Result<(NaiveDate, NaiveDate)> {
        if self.destination.trim().is_empty() {
            return Err(BookingError::InvalidParams {
                reason: "destination is required".into(),
            });
        }

        let checkin = parse_date("checkin", &self.checkin)?;
        let checkout = parse_date("checkout", &self.checkout)?;
        if checkout <= checkin {
            return Err(BookingError::InvalidParams {
                reason: "checkout date must be after checkin date".into(),
            });
        }

        if self.adults == 0 {
            return Err(BookingError::InvalidParams {
                reason: "at least one adult is required".into(),
            });
        }
        if self.rooms == 0 {
            return Err(BookingError::InvalidParams {
                reason: "at least one room is required".into(),
            });
        }

        Ok((checkin, checkout))
    }

    pub fn to_query_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        let (checkin, checkout) = self.validate()?;
        Ok(vec![
            ("ss", self.destination.trim().to_string()),
            ("checkin_year", checkin.year().to_string()),
            ("checkin_month", checkin.month().to_string()),
            ("checkin_monthday", checkin.day().to_string()),
            ("checkout_year", checkout.year().to_string()),
            ("checkout_month", checkout.month().to_string()),
            ("checkout_monthday", checkout.day().to_string()),
            ("group_adults", self.adults.to_string()),
            ("no_rooms", self.rooms.to_string()),
            ("order", self.sort.as_str().to_string()),
        ])
    }
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BookingError::InvalidParams {
            reason: format!("invalid {name} date format '{value}', expected YYYY-MM-DD"),
        }
    })
}

/// Build a Booking.com search-results URL for `params`.
pub fn build_search_url(base_url: &str, params: &SearchParams) -> Result<String> {
    let pairs = params.to_query_pairs()?;
    let mut url = Url::parse(base_url)?.join("searchresults.html")?;
    url.query_pairs_mut().extend_pairs(&pairs);
    Ok(url.to_string())
}
