use axum::extract::Query;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use crate::controller::AppState;
use crate::helpers::csv_export::{places_to_csv, EXPORT_FILE_NAME};
use crate::helpers::errors::PlacesError;
use crate::models::place::Location;
use crate::models::place_type::ALLOWED_PLACE_TYPES;
use crate::services::market_analysis::{analyze_market, AnalysisOutcome, MarketQuery};

pub fn router() -> Router {
    Router::new()
        .route("/analyze", get(analyze))
        .route("/export", get(export))
        .route("/place-types", get(list_place_types))
}

/// Dashboard sidebar controls. `place_types` is comma separated.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct MarketParams {
    #[serde(default = "default_lat")]
    pub lat: f64,
    #[serde(default = "default_lng")]
    pub lng: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default = "default_place_types")]
    pub place_types: String,
    #[serde(default)]
    pub only_with_photo: bool,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_lat() -> f64 {
    13.0196719
}

fn default_lng() -> f64 {
    80.2688418
}

fn default_radius_km() -> f64 {
    2.0
}

fn default_place_types() -> String {
    "restaurant,cafe".to_string()
}

fn default_max_results() -> usize {
    20
}

impl From<MarketParams> for MarketQuery {
    fn from(params: MarketParams) -> Self {
        let mut place_types: Vec<String> = Vec::new();
        for place_type in params.place_types.split(',').map(str::trim) {
            if !place_type.is_empty() && !place_types.iter().any(|t| t == place_type) {
                place_types.push(place_type.to_string());
            }
        }

        Self {
            location: Location { lat: params.lat, lng: params.lng },
            radius_km: params.radius_km,
            place_types,
            only_with_photo: params.only_with_photo,
            max_results: params.max_results,
        }
    }
}

pub async fn analyze(
    Extension(app_state): Extension<AppState>,
    Query(params): Query<MarketParams>,
) -> Response {
    let query = MarketQuery::from(params);
    match analyze_market(&app_state.http_client, &app_state.places_settings, &query).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn export(
    Extension(app_state): Extension<AppState>,
    Query(params): Query<MarketParams>,
) -> Response {
    let query = MarketQuery::from(params);
    let report = match analyze_market(&app_state.http_client, &app_state.places_settings, &query).await {
        Ok(AnalysisOutcome::Report(report)) => report,
        Ok(_) => return StatusCode::NO_CONTENT.into_response(),
        Err(e) => return error_response(e),
    };

    match places_to_csv(&report.records) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME)),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            warn!("Something went wrong exporting market research data: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to export market research data, please try again." })),
            )
                .into_response()
        }
    }
}

pub async fn list_place_types() -> impl IntoResponse {
    (StatusCode::OK, Json(ALLOWED_PLACE_TYPES.to_vec()))
}

fn error_response(e: PlacesError) -> Response {
    let status = match &e {
        PlacesError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        PlacesError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PlacesError::RemoteService { .. } | PlacesError::Http(_) => StatusCode::BAD_GATEWAY,
    };
    warn!("An error occurred during market analysis: {}", e);
    (
        status,
        Json(json!({ "error": format!("An error occurred during analysis: {}", e) })),
    )
        .into_response()
}
