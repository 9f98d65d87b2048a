use std::time::Duration;
use clap::Parser;
use crate::helpers::backoff::BackoffPolicy;
use crate::repositories::google_places_repo::{PlacesSettings, NEARBY_SEARCH_URL};

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    /// Comma separated list of origins allowed through CORS
    #[clap(env, long, default_value = "http://localhost:8501")]
    pub origin_urls: String,

    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,

    #[clap(env = "GOOGLE_MAPS_API_KEY", long)]
    pub google_maps_api_key: Option<String>,

    #[clap(env, long, default_value = NEARBY_SEARCH_URL)]
    pub places_endpoint: String,

    /// Delay before each continuation page request, Google rejects tokens used too early
    #[clap(env, long, default_value_t = 2000)]
    pub page_delay_ms: u64,
}

impl Config {
    pub fn places_settings(&self) -> PlacesSettings {
        let backoff = if self.page_delay_ms == 0 {
            BackoffPolicy::Disabled
        } else {
            BackoffPolicy::Fixed(Duration::from_millis(self.page_delay_ms))
        };

        PlacesSettings {
            api_key: self.google_maps_api_key.clone().filter(|key| !key.trim().is_empty()),
            endpoint: self.places_endpoint.clone(),
            backoff,
        }
    }
}
