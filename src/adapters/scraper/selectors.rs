use scraper::Selector;

use crate::config::types::SelectorConfig;
use crate::domain::listing::Field;
use crate::error::{BookingError, Result};

/// Where a field's value comes from inside the matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Text,
    Attribute(&'static str),
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: Field,
    pub selector: Selector,
    pub source: ValueSource,
}

/// Compiled form of [`SelectorConfig`]. Built once, shared read-only.
#[derive(Debug, Clone)]
pub struct SelectorTable {
    pub listing_block: Selector,
    pub rules: Vec<FieldRule>,
}

impl SelectorTable {
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        let listing_block = compile_selector("listing_block", &config.listing_block)?;

        let sources = [
            (Field::HotelName, "hotel_name", &config.hotel_name, ValueSource::Text),
            (Field::Location, "location", &config.location, ValueSource::Text),
            (Field::Price, "price", &config.price, ValueSource::Text),
            (Field::Rating, "rating", &config.rating, ValueSource::Text),
            (Field::Score, "score", &config.score, ValueSource::Text),
            (Field::Review, "review", &config.review, ValueSource::Text),
            (Field::Link, "link", &config.link, ValueSource::Attribute("href")),
        ];

        let rules = sources
            .into_iter()
            .map(|(field, name, css, source)| {
                Ok(FieldRule {
                    field,
                    selector: compile_selector(name, css)?,
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            listing_block,
            rules,
        })
    }
}

fn compile_selector(name: &str, css: &str) -> Result<Selector> {
    if css.trim().is_empty() {
        return Err(BookingError::InvalidSelector {
            name: name.into(),
            reason: "selector is empty".into(),
        });
    }
    Selector::parse(css).map_err(|e| BookingError::InvalidSelector {
        name: name.into(),
        reason: format!("invalid CSS selector '{css}': {e}"),
    })
}
