#![no_main]
use libfuzzer_sys::fuzz_target;

use booking_csv::adapters::scraper::listing_parser::ListingExtractor;
use booking_csv::config::types::ExtractionConfig;

fuzz_target!(|data: &[u8]| {
    let extractor = ListingExtractor::new(&ExtractionConfig::default()).unwrap();
    let _ = extractor.extract_bytes(data);
});
