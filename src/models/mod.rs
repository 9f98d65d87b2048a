pub mod market_report;
pub mod place;
pub mod place_type;
pub mod search_request;
