use std::net::SocketAddr;
use std::sync::Arc;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::{Extension, Router};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::google_places_repo::PlacesSettings;

pub mod health_check;
pub mod market_controller;

#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
    pub places_settings: Arc<PlacesSettings>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = Client::builder()
            .build()
            .context("Failed to build the places HTTP client")?;

        Ok(Self {
            http_client,
            places_settings: Arc::new(config.places_settings()),
        })
    }
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let app_state = AppState::new(config)?;
    if app_state.places_settings.api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY is not set, every market analysis will fail until it is");
    }

    let origins: Vec<HeaderValue> = config
        .origin_urls
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| match s.trim().parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!("Ignoring invalid origin url {}: {}", s, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::OPTIONS])
                        .allow_origin(origins)
                        .allow_headers([CONTENT_TYPE])
                )
                .layer(CompressionLayer::new())
        );

    let port = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Market research API listening on: {} ({})", port, config.environment);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    Router::new()
        .merge(health_check::router())
        .nest("/market", market_controller::router())
        .layer(Extension(app_state))
        .fallback(page_not_found_handler)
}
