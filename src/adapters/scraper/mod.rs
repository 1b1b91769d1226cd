pub mod client;
pub mod listing_parser;
pub mod selectors;
