use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use crate::adapters::scraper::selectors::{SelectorTable, ValueSource};
use crate::config::types::ExtractionConfig;
use crate::domain::listing::{Field, ListingRecord, NO_REVIEWS_FALLBACK, UNRATED_FALLBACK};
use crate::error::{BookingError, Result};

/// Pulls hotel cards out of a Booking.com search-results page.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    table: SelectorTable,
    currency_prefix: String,
}

impl ListingExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            table: SelectorTable::compile(&config.selectors)?,
            currency_prefix: config.currency_prefix.clone(),
        })
    }

    /// Extract every non-empty listing card, in document order.
    ///
    /// Malformed markup is recovered by the HTML5 parser; a page without any
    /// listing blocks yields an empty vector.
    pub fn extract(&self, html: &str) -> Vec<ListingRecord> {
        let document = Html::parse_document(html);

        let mut records = Vec::new();
        let mut candidates = 0usize;
        for card in document.select(&self.table.listing_block) {
            candidates += 1;
            let raw = self.read_card(card);
            if raw.is_empty() {
                debug!(candidate = candidates, "Skipping listing block with no data");
                continue;
            }
            records.push(raw.into_record());
        }

        if candidates == 0 {
            warn!("No listing blocks found; page may be a block page or markup changed");
        } else {
            debug!(candidates, records = records.len(), "Extracted listings");
        }

        records
    }

    /// Like [`extract`](Self::extract) for raw bytes, failing only when they are not UTF-8.
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<Vec<ListingRecord>> {
        let html = std::str::from_utf8(bytes).map_err(|e| BookingError::Parse {
            reason: format!("document is not valid UTF-8: {e}"),
        })?;
        Ok(self.extract(html))
    }

    fn read_card(&self, card: ElementRef<'_>) -> RawListing {
        let mut raw = RawListing::default();
        for rule in &self.table.rules {
            let value = card
                .select(&rule.selector)
                .next()
                .map(|el| match rule.source {
                    ValueSource::Text => el.text().collect::<String>().trim().to_string(),
                    ValueSource::Attribute(attr) => {
                        el.value().attr(attr).unwrap_or_default().to_string()
                    }
                })
                .unwrap_or_default();
            raw.set(rule.field, value);
        }
        raw.price = strip_currency_prefix(&raw.price, &self.currency_prefix);
        raw
    }
}

/// Field values as found in the card, before fallbacks are applied.
#[derive(Debug, Default)]
struct RawListing {
    hotel_name: String,
    location: String,
    price: String,
    rating: String,
    score: String,
    review: String,
    link: String,
}

impl RawListing {
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::HotelName => &mut self.hotel_name,
            Field::Location => &mut self.location,
            Field::Price => &mut self.price,
            Field::Rating => &mut self.rating,
            Field::Score => &mut self.score,
            Field::Review => &mut self.review,
            Field::Link => &mut self.link,
        };
        *slot = value;
    }

    fn is_empty(&self) -> bool {
        [
            &self.hotel_name,
            &self.location,
            &self.price,
            &self.rating,
            &self.score,
            &self.review,
            &self.link,
        ]
        .iter()
        .all(|v| v.is_empty())
    }

    fn into_record(self) -> ListingRecord {
        ListingRecord {
            hotel_name: self.hotel_name,
            location: self.location,
            price: self.price,
            rating: or_fallback(self.rating, UNRATED_FALLBACK),
            score: or_fallback(self.score, UNRATED_FALLBACK),
            review: or_fallback(self.review, NO_REVIEWS_FALLBACK),
            link: self.link,
        }
    }
}

fn or_fallback(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn strip_currency_prefix(price: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return price.to_string();
    }
    price.strip_prefix(prefix).unwrap_or(price).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor() -> ListingExtractor {
        ListingExtractor::new(&ExtractionConfig::default()).unwrap()
    }

    fn card(inner: &str) -> String {
        format!(r#"<html><body><div role="list"><div role="listitem">{inner}</div></div></body></html>"#)
    }

    const FULL_CARD: &str = r#"
        <a href="https://www.booking.com/hotel/nz/harbour.html">
            <div class="b87c397a13 a3e0b4ffd1"> Harbour View Hotel </div>
        </a>
        <span class="d823fbbeed f9b3563dd4">Auckland CBD, Auckland</span>
        <span class="b87c397a13 f2f358d1de ab607752a2">NZD 350</span>
        <div class="f63b14ab7a dff2e52086">8.7</div>
        <div class="f63b14ab7a f546354b44 becbee2f63">Fabulous</div>
        <div class="fff1944c52 fb14de7f14 eaa8455879">1,204 reviews</div>
    "#;

    #[test]
    fn extracts_all_fields_from_full_card() {
        let records = extractor().extract(&card(FULL_CARD));
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            ListingRecord {
                hotel_name: "Harbour View Hotel".into(),
                location: "Auckland CBD, Auckland".into(),
                price: "350".into(),
                rating: "Fabulous".into(),
                score: "8.7".into(),
                review: "1,204 reviews".into(),
                link: "https://www.booking.com/hotel/nz/harbour.html".into(),
            }
        );
    }

    #[test]
    fn price_without_prefix_is_unchanged() {
        let html = card(r#"<span class="b87c397a13 f2f358d1de ab607752a2">420</span>"#);
        let records = extractor().extract(&html);
        assert_eq!(records[0].price, "420");
    }

    #[test]
    fn prefix_only_stripped_at_start() {
        assert_eq!(strip_currency_prefix("NZD 350", "NZD "), "350");
        assert_eq!(strip_currency_prefix("from NZD 350", "NZD "), "from NZD 350");
        assert_eq!(strip_currency_prefix("NZD 350", ""), "NZD 350");
    }

    #[test]
    fn unrated_card_gets_fallbacks_and_is_kept() {
        let html = card(r#"<div class="b87c397a13 a3e0b4ffd1">Brand New Lodge</div>"#);
        let records = extractor().extract(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hotel_name, "Brand New Lodge");
        assert_eq!(records[0].rating, UNRATED_FALLBACK);
        assert_eq!(records[0].score, UNRATED_FALLBACK);
        assert_eq!(records[0].review, NO_REVIEWS_FALLBACK);
        assert_eq!(records[0].link, "");
    }

    #[test]
    fn card_without_any_field_is_skipped() {
        let html = card(r#"<p>Sponsored</p><div class="unrelated">ad</div>"#);
        assert!(extractor().extract(&html).is_empty());
    }

    #[test]
    fn whitespace_only_fields_count_as_empty() {
        let html = card(
            r#"<div class="b87c397a13 a3e0b4ffd1">   </div><div class="f63b14ab7a dff2e52086">
            </div>"#,
        );
        assert!(extractor().extract(&html).is_empty());
    }

    #[test]
    fn rating_alone_keeps_card() {
        let html = card(r#"<div class="f63b14ab7a f546354b44 becbee2f63">Good</div>"#);
        let records = extractor().extract(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, "Good");
        assert_eq!(records[0].review, NO_REVIEWS_FALLBACK);
        assert_eq!(records[0].hotel_name, "");
    }

    #[test]
    fn link_alone_keeps_card() {
        let records = extractor().extract(&card(r#"<a href="/hotel/nz/x.html"></a>"#));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].link, "/hotel/nz/x.html");
        assert_eq!(records[0].hotel_name, "");
        assert_eq!(records[0].rating, UNRATED_FALLBACK);
        assert_eq!(records[0].score, UNRATED_FALLBACK);
        assert_eq!(records[0].review, NO_REVIEWS_FALLBACK);
    }

    #[test]
    fn review_alone_keeps_card() {
        let html = card(r#"<div class="fff1944c52 fb14de7f14 eaa8455879">3 reviews</div>"#);
        let records = extractor().extract(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].review, "3 reviews");
        assert_eq!(records[0].rating, UNRATED_FALLBACK);
        assert_eq!(records[0].link, "");
    }

    #[test]
    fn score_alone_keeps_card() {
        let html = card(r#"<div class="f63b14ab7a dff2e52086">Scored 6.2</div>"#);
        let records = extractor().extract(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, "Scored 6.2");
        assert_eq!(records[0].rating, UNRATED_FALLBACK);
        assert_eq!(records[0].review, NO_REVIEWS_FALLBACK);
    }

    #[test]
    fn location_alone_keeps_card() {
        let html = card(r#"<span class="d823fbbeed f9b3563dd4">Rotorua</span>"#);
        let records = extractor().extract(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "Rotorua");
    }

    #[test]
    fn price_alone_keeps_card() {
        let html = card(r#"<span class="b87c397a13 f2f358d1de ab607752a2">NZD 99</span>"#);
        let records = extractor().extract(&html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, "99");
    }

    #[test]
    fn first_matching_descendant_wins() {
        let html = card(
            r#"<div class="b87c397a13 a3e0b4ffd1">First</div>
               <div class="b87c397a13 a3e0b4ffd1">Second</div>
               <a href="/one">one</a><a href="/two">two</a>"#,
        );
        let records = extractor().extract(&html);
        assert_eq!(records[0].hotel_name, "First");
        assert_eq!(records[0].link, "/one");
    }

    #[test]
    fn anchor_without_href_is_ignored() {
        let html = card(r#"<a name="top">anchor</a><a href="/hotel">hotel</a>"#);
        let records = extractor().extract(&html);
        assert_eq!(records[0].link, "/hotel");
    }

    #[test]
    fn cards_emitted_in_document_order() {
        let html = r#"<html><body>
            <div role="listitem"><div class="b87c397a13 a3e0b4ffd1">Alpha</div></div>
            <div role="listitem"></div>
            <div role="listitem"><div class="b87c397a13 a3e0b4ffd1">Bravo</div></div>
            <div role="listitem"><div class="b87c397a13 a3e0b4ffd1">Charlie</div></div>
        </body></html>"#;
        let names: Vec<String> = extractor()
            .extract(html)
            .into_iter()
            .map(|r| r.hotel_name)
            .collect();
        assert_eq!(names, ["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn page_without_listings_is_empty_not_error() {
        let html = "<html><body><h1>Are you a robot?</h1></body></html>";
        assert!(extractor().extract(html).is_empty());
    }

    #[test]
    fn malformed_markup_is_recovered() {
        let html = r#"<div role="listitem"><div class="b87c397a13 a3e0b4ffd1">Unclosed <b>Inn"#;
        let records = extractor().extract(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hotel_name, "Unclosed Inn");
    }

    #[test]
    fn extract_bytes_rejects_invalid_utf8() {
        let err = extractor().extract_bytes(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap_err();
        assert!(matches!(err, BookingError::Parse { .. }));
    }

    #[test]
    fn extract_bytes_accepts_utf8() {
        let html = card(r#"<div class="b87c397a13 a3e0b4ffd1">Hôtel Mākaurau</div>"#);
        let records = extractor().extract_bytes(html.as_bytes()).unwrap();
        assert_eq!(records[0].hotel_name, "Hôtel Mākaurau");
    }

    #[test]
    fn custom_selector_table_is_honoured() {
        let mut config = ExtractionConfig::default();
        config.selectors.listing_block = "article.hotel".into();
        config.selectors.hotel_name = "h3".into();
        config.currency_prefix = "AUD ".into();
        config.selectors.price = ".price".into();
        let extractor = ListingExtractor::new(&config).unwrap();

        let html = r#"<article class="hotel"><h3>Bondi Stay</h3><span class="price">AUD 210</span></article>"#;
        let records = extractor.extract(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hotel_name, "Bondi Stay");
        assert_eq!(records[0].price, "210");
    }

    #[test]
    fn extraction_is_deterministic() {
        let html = card(FULL_CARD);
        let ex = extractor();
        assert_eq!(ex.extract(&html), ex.extract(&html));
    }
}
