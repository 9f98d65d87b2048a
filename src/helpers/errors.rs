use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    /// Places API answered with a status other than OK or ZERO_RESULTS.
    #[error("Error fetching place data: {status}{}", format_detail(.detail))]
    RemoteService {
        status: String,
        detail: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("Failed to reach the places API: {0}")]
    Http(#[from] reqwest::Error),
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(" ({})", detail),
        None => String::new(),
    }
}
