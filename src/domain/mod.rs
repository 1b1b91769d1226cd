pub mod csv_export;
pub mod listing;
pub mod search_params;
