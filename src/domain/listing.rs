use serde::Serialize;

use crate::domain::csv_export::CsvRecord;

/// Shown in the Review column when a card has no review count.
pub const NO_REVIEWS_FALLBACK: &str = "No reviews yet";

/// Shown in the Rating and Score columns when a card has not been rated.
pub const UNRATED_FALLBACK: &str = "New to Booking.com";

/// Output columns, in CSV order.
pub const LISTING_SCHEMA: [&str; 7] = [
    "Hotel Name",
    "Location",
    "Price",
    "Rating",
    "Score",
    "Review",
    "Link",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    HotelName,
    Location,
    Price,
    Rating,
    Score,
    Review,
    Link,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::HotelName,
        Field::Location,
        Field::Price,
        Field::Rating,
        Field::Score,
        Field::Review,
        Field::Link,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::HotelName => "Hotel Name",
            Field::Location => "Location",
            Field::Price => "Price",
            Field::Rating => "Rating",
            Field::Score => "Score",
            Field::Review => "Review",
            Field::Link => "Link",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hotel card from a search-results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    #[serde(rename = "Hotel Name")]
    pub hotel_name: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Score")]
    pub score: String,
    #[serde(rename = "Review")]
    pub review: String,
    #[serde(rename = "Link")]
    pub link: String,
}

impl ListingRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::HotelName => &self.hotel_name,
            Field::Location => &self.location,
            Field::Price => &self.price,
            Field::Rating => &self.rating,
            Field::Score => &self.score,
            Field::Review => &self.review,
            Field::Link => &self.link,
        }
    }
}

impl CsvRecord for ListingRecord {
    fn field(&self, name: &str) -> Option<&str> {
        Field::from_name(name).map(|f| self.get(f))
    }
}
